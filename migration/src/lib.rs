pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_products;
mod m20260301_000002_add_products_date_of_sale_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_products::Migration),
            Box::new(m20260301_000002_add_products_date_of_sale_index::Migration),
        ]
    }
}
