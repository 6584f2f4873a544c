use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::outbound::database::RequestDb;
use crate::user::errors::UserError;

/// User repository over the request's SQLite connection.
pub struct SqliteUserRepository {
    db: RequestDb,
}

impl SqliteUserRepository {
    pub fn new(db: RequestDb) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.password,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<UserId, UserError> {
        let mut connection = self.db.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO user (username, password)
            VALUES (?, ?)
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash)
        .execute(&mut *connection)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::DuplicateUsername(username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let mut connection = self.db.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password
            FROM user
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&mut *connection)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let mut connection = self.db.acquire().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password
            FROM user
            WHERE username = ?
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&mut *connection)
        .await?;

        row.map(User::try_from).transpose()
    }
}
