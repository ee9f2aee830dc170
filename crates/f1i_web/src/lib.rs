use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use f1i_core::Result;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/drivers", get(handlers::list_drivers))
        .route("/api/drivers/:number/results", get(handlers::driver_results))
        .route(
            "/api/drivers/:number/performance",
            get(handlers::driver_performance),
        )
        .route("/api/calendar/:year", get(handlers::race_calendar))
        .route("/api/compare", post(handlers::compare_drivers))
        .route("/api/news/analyze", post(handlers::analyze_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("🏁 F1 Insights listening on http://{}:{}", host, port);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use f1i_core::{Article, Error, Result};
}
