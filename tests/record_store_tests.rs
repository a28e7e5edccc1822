mod common;

use sea_orm::Condition;
use transaction_dashboard::entities::products;
use transaction_dashboard::services::query_builder::{Pagination, build_month_range_filter};
use transaction_dashboard::services::record_store::StoreError;

use crate::common::{raw_record, setup_store};

#[tokio::test]
async fn test_seed_empty_batch() {
    let store = setup_store().await;
    assert_eq!(store.seed(vec![]).await.unwrap(), 0);
    assert_eq!(store.count_matching(Condition::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_reports_offending_record() {
    let store = setup_store().await;
    let mut bad = raw_record("No price", "missing price", 1.0, "A", "2024-01-01");
    bad.price = None;

    let records = vec![
        raw_record("Fine", "ok", 1.0, "A", "2024-01-01"),
        bad,
    ];

    match store.seed(records).await {
        Err(StoreError::InvalidRecord { index, reason }) => {
            assert_eq!(index, 1);
            assert_eq!(reason, "price is required");
        }
        other => panic!("expected InvalidRecord, got {:?}", other),
    }
    assert_eq!(store.count_matching(Condition::all()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_large_batch_spans_chunks() {
    let store = setup_store().await;
    let records = (0..1234)
        .map(|i| raw_record(&format!("Item {}", i), "bulk", 1.0, "bulk", "2024-02-10"))
        .collect();

    assert_eq!(store.seed(records).await.unwrap(), 1234);

    let range = build_month_range_filter(Some("2024-02")).unwrap();
    assert_eq!(store.count_matching(range.half_open()).await.unwrap(), 1234);
    assert_eq!(
        store
            .sum_field(range.half_open(), products::Column::Price)
            .await
            .unwrap(),
        1234.0
    );
}

#[tokio::test]
async fn test_find_keeps_insertion_order() {
    let store = setup_store().await;
    store
        .seed(vec![
            raw_record("third by date", "x", 3.0, "A", "2024-08-30"),
            raw_record("first by date", "x", 1.0, "A", "2024-08-01"),
            raw_record("second by date", "x", 2.0, "A", "2024-08-15"),
        ])
        .await
        .unwrap();

    let range = build_month_range_filter(Some("2024-08")).unwrap();
    let records = store.find(range.half_open(), Pagination::default()).await.unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["third by date", "first by date", "second by date"]);
}

#[tokio::test]
async fn test_sum_field_is_zero_without_matches() {
    let store = setup_store().await;
    store
        .seed(vec![raw_record("x", "x", 99.0, "A", "2024-01-15")])
        .await
        .unwrap();

    let range = build_month_range_filter(Some("2019-01")).unwrap();
    let total = store
        .sum_field(range.half_open(), products::Column::Price)
        .await
        .unwrap();
    assert_eq!(total, 0.0);
}

#[tokio::test]
async fn test_missing_sale_date_count_is_always_zero() {
    let store = setup_store().await;
    store
        .seed(vec![
            raw_record("x", "x", 5.0, "A", "2024-01-15"),
            raw_record("y", "y", 6.0, "B", "2024-01-16"),
        ])
        .await
        .unwrap();

    let range = build_month_range_filter(Some("2024-01")).unwrap();
    assert_eq!(store.count_matching(range.through_last_day()).await.unwrap(), 2);
    assert_eq!(
        store
            .count_missing_sale_date(range.through_last_day())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_aggregate_by_bucket_skips_unbucketed_records() {
    let store = setup_store().await;
    store
        .seed(vec![
            raw_record("a", "a", 5.0, "keep", "2024-01-02"),
            raw_record("b", "b", 6.0, "skip", "2024-01-03"),
            raw_record("c", "c", 7.0, "keep", "2024-01-04"),
        ])
        .await
        .unwrap();

    let range = build_month_range_filter(Some("2024-01")).unwrap();
    let buckets = store
        .aggregate_by_bucket(range.half_open(), |record| {
            (record.category != "skip").then(|| record.category.clone())
        })
        .await
        .unwrap();

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets.get("keep"), Some(&2));
}
