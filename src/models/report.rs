//! Report request/response models
//!
//! Shared by the statistics, bar-chart, pie-chart and combined-data endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters for every month-scoped report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    /// Calendar month as `YYYY-MM`
    pub month: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale_amount: f64,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

/// One non-empty price bucket of the bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChartEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: u64,
}

pub type BarChart = Vec<BarChartEntry>;

/// Category name to number of records in that category
pub type PieChart = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub statistics: Statistics,
    pub bar_chart: BarChart,
    pub pie_chart: PieChart,
}
