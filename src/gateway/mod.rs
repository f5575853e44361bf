//! HTTP Gateway
//!
//! axum surface over [`LibraryCoordinator`]. Identity arrives pre-verified in
//! `X-User-Name`; the gateway does not authenticate.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::library::LibraryCoordinator;
use state::AppState;

/// Build the complete router, docs included
pub fn router(coordinator: Arc<LibraryCoordinator>) -> Router {
    let state = Arc::new(AppState::new(coordinator));

    let api_routes = Router::new()
        .route("/libraries", get(handlers::list_libraries))
        .route(
            "/libraries/{libraryUid}/books",
            get(handlers::list_library_books),
        )
        .route(
            "/reservations",
            get(handlers::list_reservations).post(handlers::reserve_book),
        )
        .route(
            "/reservations/{reservationUid}/return",
            post(handlers::return_book),
        )
        .route("/rating", get(handlers::get_rating));

    Router::new()
        .route("/manage/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        // Without a signal handler, serve until the process is killed
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Serve on `host:port` until Ctrl-C
pub async fn run_server(
    host: &str,
    port: u16,
    coordinator: Arc<LibraryCoordinator>,
) -> std::io::Result<()> {
    let app = router(coordinator);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    info!(addr = %addr, "gateway listening");
    info!("API docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
