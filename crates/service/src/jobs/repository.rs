use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::domain::{FilterCounts, Job, JobFields};
use super::query::JobQuery;
use crate::errors::ServiceError;

/// Repository abstraction over the `jobs` table.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// All jobs matching the filter, in query order.
    async fn list(&self, query: &JobQuery) -> Result<Vec<Job>, ServiceError>;
    /// Per-value counts of country, city and company over every row.
    async fn counts(&self) -> Result<FilterCounts, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Job>, ServiceError>;
    async fn create(&self, fields: JobFields, posted_time: DateTime<Utc>) -> Result<Job, ServiceError>;
    /// Full replace of the mutable columns; `None` if the id does not exist.
    async fn replace(&self, id: i32, fields: JobFields) -> Result<Option<Job>, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples.
///
/// Rows are kept in their stored form, so tags go through the same
/// join/split codec as the database path.
pub mod mock {
    use super::*;
    use models::job::{join_tags, Model};
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        last_id: i32,
        jobs: BTreeMap<i32, Model>,
    }

    fn to_row(id: i32, fields: JobFields, posted_time: DateTime<Utc>) -> Model {
        Model {
            id,
            tags: join_tags(&fields.tags),
            title: fields.title,
            company: fields.company,
            location_country: fields.location_country,
            location_city: fields.location_city,
            salary_range: fields.salary_range,
            posted_time: posted_time.into(),
        }
    }

    #[derive(Default)]
    pub struct MockJobRepository {
        rows: Mutex<Rows>,
    }

    impl MockJobRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
        }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.jobs.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        /// Raw stored `tags` column for a row.
        pub fn stored_tags(&self, id: i32) -> Option<String> {
            self.rows.lock().ok().and_then(|r| r.jobs.get(&id).and_then(|m| m.tags.clone()))
        }
    }

    #[async_trait]
    impl JobRepository for MockJobRepository {
        async fn list(&self, query: &JobQuery) -> Result<Vec<Job>, ServiceError> {
            let rows = self.rows()?;
            let mut out: Vec<Job> = rows
                .jobs
                .values()
                .cloned()
                .map(Job::from)
                .filter(|j| query.filter.matches(j))
                .collect();
            out.sort_by(|a, b| query.sort.compare(a, b));
            Ok(out)
        }

        async fn counts(&self) -> Result<FilterCounts, ServiceError> {
            let rows = self.rows()?;
            let mut counts = FilterCounts::default();
            for m in rows.jobs.values() {
                *counts.countries.entry(m.location_country.clone()).or_default() += 1;
                *counts.cities.entry(m.location_city.clone()).or_default() += 1;
                *counts.companies.entry(m.company.clone()).or_default() += 1;
            }
            Ok(counts)
        }

        async fn get(&self, id: i32) -> Result<Option<Job>, ServiceError> {
            Ok(self.rows()?.jobs.get(&id).cloned().map(Job::from))
        }

        async fn create(&self, fields: JobFields, posted_time: DateTime<Utc>) -> Result<Job, ServiceError> {
            let mut rows = self.rows()?;
            rows.last_id += 1;
            let row = to_row(rows.last_id, fields, posted_time);
            rows.jobs.insert(row.id, row.clone());
            Ok(Job::from(row))
        }

        async fn replace(&self, id: i32, fields: JobFields) -> Result<Option<Job>, ServiceError> {
            let mut rows = self.rows()?;
            let Some(slot) = rows.jobs.get_mut(&id) else { return Ok(None) };
            let posted_time = slot.posted_time.with_timezone(&Utc);
            *slot = to_row(id, fields, posted_time);
            Ok(Some(Job::from(slot.clone())))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows()?.jobs.remove(&id).is_some())
        }
    }
}
