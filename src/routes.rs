use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::AppState;
use crate::handlers::{initialize, report, transaction};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/initialize-database", get(initialize::initialize_database))
        .route("/api/transactions", get(transaction::list_transactions))
        .route("/api/statistics", get(report::get_statistics))
        .route("/api/bar-chart", get(report::get_bar_chart))
        .route("/api/pie-chart", get(report::get_pie_chart))
        .route("/api/combined-data", get(report::get_combined_data))
}

/// The full application: API routes, health probe and middleware
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
