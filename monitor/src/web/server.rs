use anyhow::Result;
use axum::{routing::get, Router};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::web::{handlers, AppState};

pub async fn start_web_server(state: AppState, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    tracing::info!("Web server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/monitor", get(handlers::get_monitor_state))
        .route("/api/status", get(handlers::get_status_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
