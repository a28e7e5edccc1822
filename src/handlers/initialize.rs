use axum::{Json, extract::State};
use tracing::{error, info};

use crate::AppState;
use crate::error::AppError;
use crate::models::common::InitializeResponse;

/// GET /api/initialize-database
///
/// Fetches the seed records and appends all of them to the store. Calling it
/// again appends the same records again.
pub async fn initialize_database(
    State(state): State<AppState>,
) -> Result<Json<InitializeResponse>, AppError> {
    let records = state
        .seed_source
        .fetch()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to fetch seed data"))?;

    let inserted = state.store.seed(records).await.map_err(|e| {
        error!(error = %e, "Failed to seed database");
        AppError::from(e)
    })?;

    info!(inserted, "Database initialized");

    Ok(Json(InitializeResponse {
        message: "Database initialized with seed data".to_string(),
        inserted,
    }))
}
