//! Seed source for GET /api/initialize-database
//!
//! Fetches the raw transaction records that get bulk-inserted into the store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::error::AppError;
use crate::models::transaction::RawRecord;

pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Every record the source currently serves.
    ///
    /// Fails with [`AppError::UpstreamFetch`].
    async fn fetch(&self) -> Result<Vec<RawRecord>, AppError>;
}

/// Seed source backed by a JSON array served over HTTP
#[derive(Clone)]
pub struct HttpSeedSource {
    client: Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, AppError> {
        info!(url = %self.url, "Fetching seed data");

        let response = self
            .client
            .get(&self.url)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamFetch(format!(
                "seed source returned {}: {}",
                status, error_text
            )));
        }

        let records: Vec<RawRecord> = response.json().await?;
        info!(count = records.len(), "Fetched seed records");

        Ok(records)
    }
}
