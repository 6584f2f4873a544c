use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::SqliteConnection;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;
use tokio::sync::OnceCell;

/// Schema applied by `init-db`. Recreates the tables from scratch.
pub const SCHEMA: &str = include_str!("../../../schema.sql");

/// Handle to the single-file SQLite store.
///
/// Holds connection settings only. Connections are opened per request through
/// [`Database::request_scope`]; there is no pool and no process-wide connection.
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    /// Point at a database file, creating it on first connection if missing.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        Self { options }
    }

    /// Drop and recreate the schema.
    ///
    /// Bootstrap only; every existing user is lost.
    pub async fn init_db(&self) -> Result<(), sqlx::Error> {
        let mut connection = SqliteConnection::connect_with(&self.options).await?;
        connection.execute(SCHEMA).await?;
        connection.close().await?;

        tracing::info!(database = "sqlite", "Database schema initialized");
        Ok(())
    }

    /// Start a request scope. Nothing is opened until the first query.
    pub fn request_scope(&self) -> RequestDb {
        RequestDb {
            inner: Arc::new(Scope {
                options: self.options.clone(),
                connection: OnceCell::new(),
            }),
        }
    }
}

struct Scope {
    options: SqliteConnectOptions,
    connection: OnceCell<Mutex<SqliteConnection>>,
}

/// Store connection owned by one request.
///
/// Cloning shares the same scope. The connection is opened on the first
/// [`RequestDb::acquire`] and released by [`RequestDb::close`] at the end of
/// the request, or when the last clone is dropped if the request unwinds
/// before reaching that point.
#[derive(Clone)]
pub struct RequestDb {
    inner: Arc<Scope>,
}

impl RequestDb {
    /// Borrow the request's connection, opening it on first use.
    ///
    /// # Errors
    /// Connecting to the database file failed
    pub async fn acquire(&self) -> Result<MutexGuard<'_, SqliteConnection>, sqlx::Error> {
        let connection = self
            .inner
            .connection
            .get_or_try_init(|| async {
                tracing::debug!(database = "sqlite", "Opening request connection");
                SqliteConnection::connect_with(&self.inner.options)
                    .await
                    .map(Mutex::new)
            })
            .await?;

        Ok(connection.lock().await)
    }

    /// Whether a connection has been opened in this scope.
    pub fn is_open(&self) -> bool {
        self.inner.connection.initialized()
    }

    /// Release the connection at the end of the request.
    ///
    /// If other clones of this scope are still alive the connection is
    /// released when the last of them drops instead.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        let Ok(scope) = Arc::try_unwrap(self.inner) else {
            tracing::debug!(database = "sqlite", "Request scope still shared; closing on drop");
            return Ok(());
        };

        if let Some(connection) = scope.connection.into_inner() {
            connection.into_inner().close().await?;
            tracing::debug!(database = "sqlite", "Request connection closed");
        }

        Ok(())
    }
}

impl std::fmt::Debug for RequestDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDb")
            .field("open", &self.is_open())
            .finish()
    }
}
