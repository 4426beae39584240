use crate::{
    algebra::{
        client::SalesapClient,
        dispatcher::{DispatchDuplication, TaskDispatcher},
    },
    domain::config::WebhookConfig,
    router,
};
use anyhow::{anyhow, Result as AnyhowResult};
use axum::Router;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;

pub struct AppState {
    pub config: WebhookConfig,
    pub dispatcher: Arc<dyn DispatchDuplication + Send + Sync>,
}

#[derive(Clone)]
pub struct Server {
    pub state: Arc<AppState>,
}

impl Server {
    /// Production wiring: every accepted webhook spawns a duplication task
    /// talking to the configured SalesAp API.
    pub fn init(config: WebhookConfig) -> AnyhowResult<Self> {
        let client = SalesapClient::new(&config)?;
        let dispatcher = Arc::new(TaskDispatcher::new(client));

        Ok(Self::new(config, dispatcher))
    }

    pub fn new(
        config: WebhookConfig,
        dispatcher: Arc<dyn DispatchDuplication + Send + Sync>,
    ) -> Self {
        Self {
            state: Arc::new(AppState { config, dispatcher }),
        }
    }

    pub fn router(&self) -> Router {
        router::get_router().with_state(self.state.clone())
    }

    pub async fn run(&self) -> AnyhowResult<()> {
        let listener = TcpListener::bind(&self.state.config.address)
            .await
            .map_err(|e| anyhow!("Failed to bind to address: {}", e))?;

        self.serve(listener).await
    }

    pub async fn serve(&self, listener: TcpListener) -> AnyhowResult<()> {
        info!("Webhook server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow!("Server error: {}", e))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, shutting down...");
}
