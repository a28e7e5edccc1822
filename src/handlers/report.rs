//! Month-scoped report handlers
//!
//! GET /api/statistics, /api/bar-chart, /api/pie-chart and /api/combined-data.
//! All take a required `month=YYYY-MM` query parameter.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::AppError;
use crate::models::report::{BarChart, CombinedReport, MonthQuery, PieChart, Statistics};
use crate::services::query_builder::{MonthRange, build_month_range_filter};
use crate::services::record_store::StoreError;
use crate::services::reports;

fn month_range(report: &'static str, query: &MonthQuery) -> Result<MonthRange, AppError> {
    info!(report, month = query.month, "Report request received");

    build_month_range_filter(query.month.as_deref())
        .inspect_err(|e| warn!(report, error = %e, "Invalid report query"))
}

fn store_failure(report: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |e| {
        error!(report, error = %e, "Failed to build report");
        AppError::from(e)
    }
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, AppError> {
    let range = month_range("statistics", &query)?;

    let statistics = reports::statistics(&state.store, &range)
        .await
        .map_err(store_failure("statistics"))?;

    Ok(Json(statistics))
}

pub async fn get_bar_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<BarChart>, AppError> {
    let range = month_range("bar-chart", &query)?;

    let bar_chart = reports::bar_chart(&state.store, &range)
        .await
        .map_err(store_failure("bar-chart"))?;

    Ok(Json(bar_chart))
}

pub async fn get_pie_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<PieChart>, AppError> {
    let range = month_range("pie-chart", &query)?;

    let pie_chart = reports::pie_chart(&state.store, &range)
        .await
        .map_err(store_failure("pie-chart"))?;

    Ok(Json(pie_chart))
}

/// Statistics, bar chart and pie chart for one month in a single response
pub async fn get_combined_data(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, AppError> {
    let range = month_range("combined-data", &query)?;

    let combined = reports::combined(&state.store, &range)
        .await
        .map_err(store_failure("combined-data"))?;

    Ok(Json(combined))
}
