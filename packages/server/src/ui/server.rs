//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetPollHistoryUseCase, GetSessionStateUseCase,
    HandleClientEventUseCase,
};

use super::{
    handler::{debug_session_state, get_poll_history, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket poll server
///
/// This struct holds the use cases and exposes them over axum.
///
/// # Example
///
/// ```ignore
/// let server = classpoll_server::bootstrap::build_server(SessionConfig::default());
/// server.run("0.0.0.0".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        handle_client_event_usecase: Arc<HandleClientEventUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_session_state_usecase: Arc<GetSessionStateUseCase>,
        get_poll_history_usecase: Arc<GetPollHistoryUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                handle_client_event_usecase,
                disconnect_client_usecase,
                get_session_state_usecase,
                get_poll_history_usecase,
            }),
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/api/polls/history", get(get_poll_history))
            .route("/debug/session", get(debug_session_state))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the poll server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;
        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!("Poll server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
