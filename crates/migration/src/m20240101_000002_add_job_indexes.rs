//! Indexes for the listing query: the three equality filters and the
//! default sort key.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_jobs::Jobs;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Jobs); 4] = [
    ("idx_jobs_location_country", Jobs::LocationCountry),
    ("idx_jobs_location_city", Jobs::LocationCity),
    ("idx_jobs_company", Jobs::Company),
    ("idx_jobs_posted_time", Jobs::PostedTime),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Jobs::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().if_exists().name(name).table(Jobs::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
