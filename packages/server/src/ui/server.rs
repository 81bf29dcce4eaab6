//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    usecase::{ConnectClientUseCase, DisconnectClientUseCase, RelayMessageUseCase},
};

use super::{handler::entry_handler, signal::shutdown_signal, state::AppState};

/// Fatal server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     relay_message_usecase,
/// );
/// server.run(&config).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    relay_message_usecase: Arc<RelayMessageUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            relay_message_usecase,
        }
    }

    /// Build the router.
    ///
    /// Every path is handled by the same entry handler: WebSocket upgrades
    /// join the relay, other requests get the health text.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            relay_message_usecase: self.relay_message_usecase,
        });

        Router::new()
            .fallback(entry_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), ServerError> {
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|source| ServerError::Bind {
                addr: config.bind_addr(),
                source,
            })?;

        match listener.local_addr() {
            Ok(addr) => tracing::info!("WebSocket server listening on ws://{}", addr),
            Err(_) => tracing::info!("WebSocket server listening on ws://{}", config.bind_addr()),
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)
    }
}
