//! HTTP front-end: question form, paper generation and result rendering.

pub mod pages;
pub mod routes;

use std::net::SocketAddr;

use crate::composer::PaperComposer;

/// Web server for paper generation.
pub struct PaperServer {
    composer: PaperComposer,
    debug: bool,
}

impl PaperServer {
    /// Create a new server.
    #[must_use]
    pub const fn new(composer: PaperComposer, debug: bool) -> Self {
        Self { composer, debug }
    }

    /// Build the router without binding a socket.
    #[must_use]
    pub fn router(self) -> axum::Router {
        routes::create_router(self.composer, self.debug)
    }

    /// Run the HTTP server until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound or the server fails.
    pub async fn run_http(self, addr: SocketAddr) -> anyhow::Result<()> {
        let debug_mode = self.debug;
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            debug = debug_mode,
            "HTTP server listening on http://{}",
            listener.local_addr()?
        );

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for PaperServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperServer").field("debug", &self.debug).finish_non_exhaustive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
