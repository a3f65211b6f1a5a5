//! HTTP server lifecycle

use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::ServerConfig,
    error::ServerResult,
    routes,
    state::AppState,
};

/// Completion API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Build the server and its engine from `config`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let state = AppState::from_config(&config)?;
        Ok(Self { config, state })
    }

    pub fn router(&self) -> axum::Router {
        routes::app(self.state.clone(), &self.config)
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        info!(
            "Completion server listening on {} (cache: {})",
            listener.local_addr()?,
            if self.state.engine.cache_enabled() { "enabled" } else { "disabled" }
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Completion server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
