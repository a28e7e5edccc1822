use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::Condition;
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::AppError;
use crate::models::transaction::{TransactionRecord, TransactionsQuery};
use crate::services::query_builder::{Pagination, build_month_range_filter, build_search_filter};

/// GET /api/transactions
///
/// # Query Parameters
///
/// - `month` - `YYYY-MM`, required
/// - `search` - matches title or description (case-insensitive substring) or an exact price
/// - `page` - 1-based page number (default: 1)
/// - `perPage` - page size (default: 10)
///
/// Returns a JSON array of records in insertion order.
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    info!(
        month = query.month,
        search = query.search,
        page = query.page,
        per_page = query.per_page,
        "Transactions request received"
    );

    let (range, pagination) = build_month_range_filter(query.month.as_deref())
        .and_then(|range| {
            Pagination::from_params(query.page.as_deref(), query.per_page.as_deref())
                .map(|pagination| (range, pagination))
        })
        .inspect_err(|e| warn!(error = %e, "Invalid transactions query"))?;

    let mut filter = Condition::all().add(range.half_open());
    if let Some(search) = build_search_filter(query.search.as_deref().unwrap_or_default()) {
        filter = filter.add(search);
    }

    let records = state.store.find(filter, pagination).await.map_err(|e| {
        error!(error = %e, "Failed to query transactions");
        AppError::from(e)
    })?;

    info!(count = records.len(), "Transactions returned");

    Ok(Json(records.into_iter().map(TransactionRecord::from).collect()))
}
