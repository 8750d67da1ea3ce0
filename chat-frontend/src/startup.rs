use crate::config::Settings;
use crate::handlers;
use crate::models::ChatState;
use crate::services::EngineClient;
use axum::{
    routing::{get, post},
    Router,
};
use chat_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatState>,
    pub engine: Arc<EngineClient>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let engine = Arc::new(EngineClient::new(&settings.engine)?);
        let state = AppState {
            chat: Arc::new(ChatState::new()),
            engine,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/files",
                post(handlers::select_file).delete(handlers::clear_selection),
            )
            .route("/upload", post(handlers::upload))
            .route("/query", post(handlers::submit_query))
            .route("/session", get(handlers::session_view))
            .route("/transcript", get(handlers::transcript))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], settings.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
