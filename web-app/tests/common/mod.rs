use std::sync::Arc;

use auth::SessionCodec;
use axum::Router;
use tempfile::TempDir;
use web_app::inbound::http::router::create_router;
use web_app::inbound::http::templates::JsonRenderer;
use web_app::Database;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-session-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub session_codec: Arc<SessionCodec>,
}

/// Throwaway SQLite file with the schema applied
pub struct TestDb {
    pub database: Database,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database = Database::new(dir.path().join("instance").join("web_app.sqlite"));

        std::fs::create_dir_all(dir.path().join("instance")).expect("Failed to create instance dir");
        database
            .init_db()
            .await
            .expect("Failed to initialize schema");

        Self {
            database,
            _dir: dir,
        }
    }

    pub async fn count_users(&self, username: &str) -> i64 {
        let scope = self.database.request_scope();
        let mut connection = scope.acquire().await.expect("Failed to connect");
        sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE username = ?")
            .bind(username)
            .fetch_one(&mut *connection)
            .await
            .expect("Failed to count users")
    }
}

pub fn router(db: &TestDb, session_codec: Arc<SessionCodec>) -> Router {
    create_router(
        db.database.clone(),
        session_codec,
        Arc::new(JsonRenderer),
        false,
    )
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;
        let session_codec = Arc::new(SessionCodec::new(TEST_SECRET, 24));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let app = router(&db, Arc::clone(&session_codec));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            session_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to POST a urlencoded form
    pub fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::RequestBuilder {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .form(fields)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post_form(
            "/auth/register",
            &[("username", username), ("password", password)],
        )
        .send()
        .await
        .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post_form(
            "/auth/login",
            &[("username", username), ("password", password)],
        )
        .send()
        .await
        .expect("Failed to execute request")
    }

    /// Current user as seen by the index page, `Null` when anonymous.
    pub async fn current_user(&self) -> serde_json::Value {
        let body: serde_json::Value = self
            .get("/")
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        body["context"]["user"].clone()
    }
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
