#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

use transaction_dashboard::{
    AppState,
    error::AppError,
    models::transaction::RawRecord,
    routes::build_router,
    services::{record_store::RecordStore, seed_source::SeedSource},
};

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn setup_store() -> RecordStore {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    RecordStore::new(db)
}

pub fn raw_record(title: &str, description: &str, price: f64, category: &str, date: &str) -> RawRecord {
    RawRecord {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        price: Some(price),
        category: Some(category.to_string()),
        date_of_sale: Some(date.to_string()),
    }
}

/// Seed source serving a fixed list of records
pub struct StaticSeedSource {
    pub records: Vec<RawRecord>,
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, AppError> {
        Ok(self.records.clone())
    }
}

/// Seed source that is always unreachable
pub struct FailingSeedSource;

#[async_trait]
impl SeedSource for FailingSeedSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, AppError> {
        Err(AppError::UpstreamFetch("connection refused".to_string()))
    }
}

/// Seed source that answers only after `delay`
pub struct SlowSeedSource {
    pub delay: Duration,
}

#[async_trait]
impl SeedSource for SlowSeedSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![])
    }
}

pub fn build_app(store: RecordStore, seed_source: Arc<dyn SeedSource>) -> Router {
    let state = AppState { store, seed_source };
    build_router(state, Duration::from_secs(30))
}

/// App over a store pre-seeded with `records`; the seed source serves nothing.
pub async fn build_seeded_app(records: Vec<RawRecord>) -> (Router, RecordStore) {
    let store = setup_store().await;
    store.seed(records).await.expect("Failed to seed test records");
    let app = build_app(
        store.clone(),
        Arc::new(StaticSeedSource { records: vec![] }),
    );
    (app, store)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("{} returned non-JSON body ({}): {:?}", uri, e, body));
    (status, json)
}
