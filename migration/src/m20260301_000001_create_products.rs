use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Products::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::Price)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::DateOfSale)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Title,
    Description,
    Price,
    Category,
    DateOfSale,
}
