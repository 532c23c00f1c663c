//! HTTP server
//!
//! Owns the listener lifecycle: bind, serve the router, and drain
//! gracefully when the shutdown future resolves.

pub mod middleware;
pub mod router;

use std::future::Future;

use thiserror::Error;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::Database;
use router::{build_router, AppState};

/// Errors raised while running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// The identity-gateway HTTP server
pub struct Server<D: Database> {
    config: ServerConfig,
    state: AppState<D>,
}

impl<D: Database + 'static> Server<D> {
    /// Create a new server over the given configuration and state
    pub fn new(config: ServerConfig, state: AppState<D>) -> Self {
        Self { config, state }
    }

    /// The address the server will listen on
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind and serve until the shutdown future resolves
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!(addr = %addr, "listening");

        let app = build_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("server stopped");
        Ok(())
    }
}
