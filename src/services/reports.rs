//! Report Aggregator
//!
//! Month-scoped statistics, price histogram and category breakdown, plus the
//! combined report that bundles all three.

use tracing::debug;

use crate::entities::products;
use crate::models::report::{BarChart, BarChartEntry, CombinedReport, PieChart, Statistics};
use crate::services::query_builder::MonthRange;
use crate::services::record_store::{RecordStore, StoreError};

/// Fixed price ranges of the bar chart, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceBucket {
    UpTo100,
    UpTo200,
    UpTo300,
    UpTo400,
    UpTo500,
    UpTo600,
    UpTo700,
    UpTo800,
    UpTo900,
    Above900,
}

impl PriceBucket {
    const BOUNDED: [(f64, PriceBucket); 9] = [
        (100.0, PriceBucket::UpTo100),
        (200.0, PriceBucket::UpTo200),
        (300.0, PriceBucket::UpTo300),
        (400.0, PriceBucket::UpTo400),
        (500.0, PriceBucket::UpTo500),
        (600.0, PriceBucket::UpTo600),
        (700.0, PriceBucket::UpTo700),
        (800.0, PriceBucket::UpTo800),
        (900.0, PriceBucket::UpTo900),
    ];

    /// First bucket whose upper bound the price does not exceed; a price on
    /// a boundary belongs to the lower bucket.
    pub fn for_price(price: f64) -> Self {
        Self::BOUNDED
            .iter()
            .find(|(upper, _)| price <= *upper)
            .map(|(_, bucket)| *bucket)
            .unwrap_or(PriceBucket::Above900)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBucket::UpTo100 => "0 - 100",
            PriceBucket::UpTo200 => "101 - 200",
            PriceBucket::UpTo300 => "201 - 300",
            PriceBucket::UpTo400 => "301 - 400",
            PriceBucket::UpTo500 => "401 - 500",
            PriceBucket::UpTo600 => "501 - 600",
            PriceBucket::UpTo700 => "601 - 700",
            PriceBucket::UpTo800 => "701 - 800",
            PriceBucket::UpTo900 => "801 - 900",
            PriceBucket::Above900 => "901-above",
        }
    }
}

/// Total sale amount and item counts for the month.
///
/// `total_not_sold_items` counts records in range with a NULL sale date.
/// Sale dates are never NULL, so it is always 0.
pub async fn statistics(store: &RecordStore, range: &MonthRange) -> Result<Statistics, StoreError> {
    let filter = range.through_last_day();

    let total_sale_amount = store
        .sum_field(filter.clone(), products::Column::Price)
        .await?;
    let total_sold_items = store.count_matching(filter.clone()).await?;
    let total_not_sold_items = store.count_missing_sale_date(filter).await?;

    debug!(
        total_sale_amount,
        total_sold_items, total_not_sold_items, "Computed statistics"
    );

    Ok(Statistics {
        total_sale_amount,
        total_sold_items,
        total_not_sold_items,
    })
}

/// Non-empty price buckets in ascending order
pub async fn bar_chart(store: &RecordStore, range: &MonthRange) -> Result<BarChart, StoreError> {
    let buckets = store
        .aggregate_by_bucket(range.through_last_day(), |record| {
            Some(PriceBucket::for_price(record.price))
        })
        .await?;

    Ok(buckets
        .into_iter()
        .map(|(bucket, count)| BarChartEntry {
            id: bucket.label().to_string(),
            count,
        })
        .collect())
}

pub async fn pie_chart(store: &RecordStore, range: &MonthRange) -> Result<PieChart, StoreError> {
    store
        .aggregate_by_bucket(range.half_open(), |record| Some(record.category.clone()))
        .await
}

/// All three reports for the same month, computed concurrently
pub async fn combined(store: &RecordStore, range: &MonthRange) -> Result<CombinedReport, StoreError> {
    let (statistics, bar_chart, pie_chart) = tokio::try_join!(
        statistics(store, range),
        bar_chart(store, range),
        pie_chart(store, range),
    )?;

    Ok(CombinedReport {
        statistics,
        bar_chart,
        pie_chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries_go_to_lower_bucket() {
        assert_eq!(PriceBucket::for_price(100.0), PriceBucket::UpTo100);
        assert_eq!(PriceBucket::for_price(200.0), PriceBucket::UpTo200);
        assert_eq!(PriceBucket::for_price(900.0), PriceBucket::UpTo900);
    }

    #[test]
    fn test_bucket_just_above_boundary() {
        assert_eq!(PriceBucket::for_price(100.01).label(), "101 - 200");
        assert_eq!(PriceBucket::for_price(800.5).label(), "801 - 900");
    }

    #[test]
    fn test_bucket_above_900() {
        assert_eq!(PriceBucket::for_price(900.5), PriceBucket::Above900);
        assert_eq!(PriceBucket::for_price(901.0).label(), "901-above");
        assert_eq!(PriceBucket::for_price(12_500.0).label(), "901-above");
    }

    #[test]
    fn test_bucket_low_prices() {
        assert_eq!(PriceBucket::for_price(0.0).label(), "0 - 100");
        assert_eq!(PriceBucket::for_price(-5.0).label(), "0 - 100");
    }

    #[test]
    fn test_buckets_sort_by_price() {
        let mut buckets = vec![
            PriceBucket::for_price(950.0),
            PriceBucket::for_price(10.0),
            PriceBucket::for_price(450.0),
        ];
        buckets.sort();
        let labels: Vec<&str> = buckets.iter().map(PriceBucket::label).collect();
        assert_eq!(labels, vec!["0 - 100", "401 - 500", "901-above"]);
    }
}
