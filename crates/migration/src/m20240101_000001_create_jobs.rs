//! Create `jobs` table.
//!
//! Single table backing the job directory; `tags` holds a comma-delimited list.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(pk_auto(Jobs::Id))
                    .col(string_len(Jobs::Title, 100).not_null())
                    .col(string_len(Jobs::Company, 100).not_null())
                    .col(string_len(Jobs::LocationCountry, 100).not_null())
                    .col(string_len(Jobs::LocationCity, 100).not_null())
                    .col(string_len_null(Jobs::SalaryRange, 50))
                    .col(string_len_null(Jobs::Tags, 200))
                    .col(
                        timestamp_with_time_zone(Jobs::PostedTime)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Jobs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Jobs {
    Table,
    Id,
    Title,
    Company,
    LocationCountry,
    LocationCity,
    SalaryRange,
    Tags,
    PostedTime,
}
