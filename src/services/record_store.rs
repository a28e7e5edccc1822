//! Record Store
//!
//! Owns the `products` table. Every read the HTTP layer needs goes through
//! here: filtered find with pagination, count, sum and bucket aggregation.

use std::collections::BTreeMap;

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info};

use crate::entities::{prelude::Products, products};
use crate::models::transaction::RawRecord;
use crate::services::query_builder::Pagination;

/// Rows per INSERT statement when seeding
const INSERT_CHUNK_SIZE: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    /// A seed record broke the record invariants. Nothing was written.
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

#[derive(Clone)]
pub struct RecordStore {
    db: DatabaseConnection,
}

impl RecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append all records in a single transaction.
    ///
    /// Every record is validated before anything is written, so a bad record
    /// leaves the table untouched. There is no de-duplication: seeding twice
    /// stores everything twice.
    pub async fn seed(&self, records: Vec<RawRecord>) -> Result<u64, StoreError> {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                raw.validate()
                    .map_err(|reason| StoreError::InvalidRecord { index, reason })
            })
            .collect::<Result<Vec<products::ActiveModel>, StoreError>>()?;

        if rows.is_empty() {
            return Ok(0);
        }

        let total = rows.len() as u64;
        let txn = self.db.begin().await?;

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            Products::insert_many(chunk.to_vec()).exec(&txn).await?;
            debug!(rows = chunk.len(), "Inserted seed chunk");
        }

        txn.commit().await?;
        info!(inserted = total, "Seeded products");

        Ok(total)
    }

    /// One page of matching records in insertion order
    pub async fn find(
        &self,
        filter: Condition,
        pagination: Pagination,
    ) -> Result<Vec<products::Model>, StoreError> {
        let records = Products::find()
            .filter(filter)
            .order_by_asc(products::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit())
            .all(&self.db)
            .await?;

        Ok(records)
    }

    pub async fn count_matching(&self, filter: Condition) -> Result<u64, StoreError> {
        let count = Products::find().filter(filter).count(&self.db).await?;
        Ok(count)
    }

    /// `SUM(field)` over matching records, 0 when nothing matches
    pub async fn sum_field(
        &self,
        filter: Condition,
        field: products::Column,
    ) -> Result<f64, StoreError> {
        let total = Products::find()
            .select_only()
            .column_as(Expr::col(field).sum(), "total")
            .filter(filter)
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    /// Tally matching records per bucket.
    ///
    /// Records for which `bucket_fn` returns `None` are not counted. Buckets
    /// with no records never appear in the result.
    pub async fn aggregate_by_bucket<K, F>(
        &self,
        filter: Condition,
        bucket_fn: F,
    ) -> Result<BTreeMap<K, u64>, StoreError>
    where
        K: Ord,
        F: Fn(&products::Model) -> Option<K>,
    {
        let records = Products::find()
            .filter(filter)
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;

        let mut buckets = BTreeMap::new();
        for record in &records {
            if let Some(key) = bucket_fn(record) {
                *buckets.entry(key).or_insert(0) += 1;
            }
        }

        Ok(buckets)
    }

    /// Matching records whose sale date is NULL.
    ///
    /// `date_of_sale` is NOT NULL, so within any date range this is always 0.
    pub async fn count_missing_sale_date(&self, filter: Condition) -> Result<u64, StoreError> {
        let filter = Condition::all()
            .add(filter)
            .add(products::Column::DateOfSale.is_null());
        self.count_matching(filter).await
    }
}
