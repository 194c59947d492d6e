use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use models::job;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect};

use crate::errors::ServiceError;
use crate::jobs::domain::{FilterCounts, Job, JobFields};
use crate::jobs::query::{FilterField, JobQuery, SortKey, SortOrder};
use crate::jobs::repository::JobRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmJobRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmJobRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn count_by(&self, col: job::Column) -> Result<BTreeMap<String, u64>, ServiceError> {
        let rows: Vec<(String, i64)> = job::Entity::find()
            .select_only()
            .column(col)
            .column_as(job::Column::Id.count(), "count")
            .group_by(col)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(|(value, n)| (value, n.max(0) as u64)).collect())
    }
}

fn filter_column(field: FilterField) -> job::Column {
    match field {
        FilterField::LocationCountry => job::Column::LocationCountry,
        FilterField::LocationCity => job::Column::LocationCity,
        FilterField::Company => job::Column::Company,
    }
}

fn sort_column(key: SortKey) -> job::Column {
    match key {
        SortKey::Title => job::Column::Title,
        SortKey::Company => job::Column::Company,
        SortKey::LocationCountry => job::Column::LocationCountry,
        SortKey::LocationCity => job::Column::LocationCity,
        SortKey::PostedTime => job::Column::PostedTime,
    }
}

fn sea_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[async_trait::async_trait]
impl JobRepository for SeaOrmJobRepository {
    async fn list(&self, query: &JobQuery) -> Result<Vec<Job>, ServiceError> {
        let mut finder = job::Entity::find();
        for field in FilterField::ALL {
            if let Some(value) = query.filter.get(field) {
                finder = finder.filter(filter_column(field).eq(value));
            }
        }
        let rows = finder
            .order_by(sort_column(query.sort.key), sea_order(query.sort.order))
            .order_by(job::Column::Id, sea_order(query.sort.order))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn counts(&self) -> Result<FilterCounts, ServiceError> {
        let (countries, cities, companies) = tokio::try_join!(
            self.count_by(job::Column::LocationCountry),
            self.count_by(job::Column::LocationCity),
            self.count_by(job::Column::Company),
        )?;
        Ok(FilterCounts { countries, cities, companies })
    }

    async fn get(&self, id: i32) -> Result<Option<Job>, ServiceError> {
        let found = job::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Job::from))
    }

    async fn create(&self, fields: JobFields, posted_time: DateTime<Utc>) -> Result<Job, ServiceError> {
        let created = job::create(&self.db, fields, posted_time).await?;
        Ok(Job::from(created))
    }

    async fn replace(&self, id: i32, fields: JobFields) -> Result<Option<Job>, ServiceError> {
        let updated = job::replace(&self.db, id, fields).await?;
        Ok(updated.map(Job::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = job::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
