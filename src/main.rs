//! identity-gateway - an HTTP service for identity and event records
//!
//! This is the main entry point for the identity-gateway application.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;

use identity_gateway::auth::{
    AuthClient, BasicAuthorizer, Credentials, HmacJwt, TokenService,
};
use identity_gateway::config::Config;
use identity_gateway::database::SqliteDatabase;
use identity_gateway::identity::IdentityService;
use identity_gateway::logging::init_tracing;
use identity_gateway::server::router::AppState;
use identity_gateway::server::Server;

/// identity-gateway - an HTTP service for identity and event records
#[derive(Parser, Debug)]
#[command(name = "identity-gateway")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "IDENTITY_GATEWAY_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    init_tracing(&config.logging.level)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting identity-gateway"
    );

    // Initialize database
    let database = SqliteDatabase::new(&config.database.path).await?;
    let database = Arc::new(database);
    info!(path = %config.database.path, "Database initialized");

    // Wire the auth surface: basic-auth extraction plus JWT issuance
    let token_service = TokenService::new(Arc::new(HmacJwt::new(
        config.auth.jwt_secret.clone(),
    )));
    let auth_client = Arc::new(AuthClient::new(
        Arc::new(BasicAuthorizer::new()),
        token_service,
    ));
    info!("Auth client initialized");

    let state = AppState {
        auth_client,
        gate_credentials: Credentials::new(&config.auth.username, &config.auth.password),
        identity: Arc::new(IdentityService::new(Arc::clone(&database))),
        database,
    };

    let server = Server::new(config.server.clone(), state);

    info!(
        host = %config.server.host,
        port = %config.server.port,
        "Starting HTTP server"
    );

    server.run(shutdown_signal()).await?;

    info!("identity-gateway shutdown complete");

    Ok(())
}

/// Load configuration from file or environment
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from file: {}", path);
            Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
        None => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from environment variables");
            Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
    }
}

/// Create a future that resolves when a shutdown signal is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
