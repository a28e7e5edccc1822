// src/lib.rs

use std::sync::Arc;

use services::{record_store::RecordStore, seed_source::SeedSource};

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub seed_source: Arc<dyn SeedSource>,
}

pub mod entities {
    pub mod prelude;
    pub mod products;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub mod services {
    pub mod query_builder;
    pub mod record_store;
    pub mod reports;
    pub mod seed_source;
}
