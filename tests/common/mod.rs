//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use identity_gateway::auth::{AuthClient, BasicAuthorizer, Credentials, HmacJwt, TokenService};
use identity_gateway::database::SqliteDatabase;
use identity_gateway::identity::IdentityService;
use identity_gateway::server::router::{build_router, AppState};

/// Signing secret used by every test server
pub const TEST_SECRET: &str = "integration-test-secret";

/// Basic-auth pair every test server accepts
pub const TEST_USERNAME: &str = "tony";
pub const TEST_PASSWORD: &str = "house";

/// Create an in-memory database for testing
pub async fn create_test_database() -> Arc<SqliteDatabase> {
    Arc::new(
        SqliteDatabase::in_memory()
            .await
            .expect("Failed to create test database"),
    )
}

/// Create a test auth client over the shared secret
pub fn create_test_auth_client() -> Arc<AuthClient> {
    Arc::new(AuthClient::new(
        Arc::new(BasicAuthorizer::new()),
        TokenService::new(Arc::new(HmacJwt::new(TEST_SECRET))),
    ))
}

/// Create a test application state
pub async fn create_test_state() -> AppState<SqliteDatabase> {
    let database = create_test_database().await;

    AppState {
        auth_client: create_test_auth_client(),
        gate_credentials: Credentials::new(TEST_USERNAME, TEST_PASSWORD),
        identity: Arc::new(IdentityService::new(Arc::clone(&database))),
        database,
    }
}

/// Run a test server in the background and return the address
/// The server will be shut down when the returned shutdown sender is dropped or sent
pub async fn run_test_server(
    state: AppState<SqliteDatabase>,
) -> (std::net::SocketAddr, tokio::sync::oneshot::Sender<()>) {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local address");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("Server error");
    });

    // Give the server a moment to start (100ms is sufficient for slow CI systems)
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    (addr, shutdown_tx)
}

/// Authorization header value for the accepted basic-auth pair
pub fn valid_basic_auth() -> String {
    basic_auth(TEST_USERNAME, TEST_PASSWORD)
}

/// Authorization header value for an arbitrary pair
pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}
