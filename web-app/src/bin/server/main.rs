use std::sync::Arc;

use auth::SessionCodec;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use web_app::config::Config;
use web_app::inbound::http::router::create_router;
use web_app::inbound::http::templates::JsonRenderer;
use web_app::Database;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Run the HTTP server
    #[default]
    Serve,
    /// Drop and recreate the database schema
    InitDb,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    tracing::info!(
        database_path = %config.database.path.display(),
        http_port = config.server.http_port,
        session_lifetime_hours = config.session.lifetime_hours,
        "Configuration loaded"
    );

    config.database.ensure_instance_dir()?;
    let database = Database::new(&config.database.path);

    match cli.command.unwrap_or_default() {
        Command::InitDb => {
            database.init_db().await?;
            println!("Initialized the database.");
            Ok(())
        }
        Command::Serve => serve(config, database).await,
    }
}

async fn serve(config: Config, database: Database) -> Result<(), anyhow::Error> {
    tracing::info!(
        service = "web-app",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let session_codec = Arc::new(SessionCodec::new(
        config.session.secret.as_bytes(),
        config.session.lifetime_hours,
    ));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        database,
        session_codec,
        Arc::new(JsonRenderer),
        config.session.cookie_secure,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
