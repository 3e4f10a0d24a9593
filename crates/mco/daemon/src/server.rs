//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use mco_core::{Generator, Nomenclature};
use std::sync::Arc;
use tokio::net::TcpListener;

/// MCO mock API server
pub struct Server {
    config: DaemonConfig,
    generator: Arc<Generator>,
}

impl Server {
    /// Create a new server with the given configuration.
    ///
    /// The dimension registry is built here, once; it is immutable afterwards
    /// and shared read-only by every request handler.
    pub fn new(config: DaemonConfig) -> Self {
        let generator = Arc::new(Generator::new(Nomenclature::builtin()));
        Self { config, generator }
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        // Create app state and router
        let state = AppState::new(self.generator.clone(), self.config.generator.seed);
        let app = create_router(state, self.config.server.enable_cors);

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("MCO mock API listening on {}", addr);
        match self.config.generator.seed {
            Some(seed) => tracing::info!("Deterministic generation enabled (seed {})", seed),
            None => tracing::info!("Nondeterministic generation (no seed configured)"),
        }

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("MCO mock API shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
