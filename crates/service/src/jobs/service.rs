use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::domain::{FilterCounts, Job, JobListing, JobPayload};
use super::query::JobQuery;
use super::repository::JobRepository;
use crate::errors::ServiceError;

/// Job directory business service independent of web framework.
///
/// Holds no state of its own; every call goes straight to the injected repository.
#[derive(Clone)]
pub struct JobService {
    repo: Arc<dyn JobRepository>,
}

impl JobService {
    pub fn new(repo: Arc<dyn JobRepository>) -> Self { Self { repo } }

    /// List jobs matching the query, ages computed against the current clock.
    pub async fn list(&self, query: &JobQuery) -> Result<Vec<JobListing>, ServiceError> {
        self.list_at(query, Utc::now()).await
    }

    #[instrument(skip(self, query), fields(sort_by = query.sort.key.as_str(), order = query.sort.order.as_str()))]
    pub async fn list_at(&self, query: &JobQuery, now: DateTime<Utc>) -> Result<Vec<JobListing>, ServiceError> {
        let jobs = self.repo.list(query).await?;
        debug!(count = jobs.len(), filtered = !query.filter.is_empty(), "jobs_listed");
        Ok(jobs.into_iter().map(|j| j.listing_at(now)).collect())
    }

    /// Distinct-value counts over the whole table, ignoring any listing filter.
    pub async fn filter_counts(&self) -> Result<FilterCounts, ServiceError> {
        self.repo.counts().await
    }

    /// Validate and store a new job stamped with the current instant.
    ///
    /// # Examples
    /// ```
    /// use service::jobs::{domain::JobPayload, repository::mock::MockJobRepository, JobService};
    /// use std::sync::Arc;
    /// let svc = JobService::new(Arc::new(MockJobRepository::default()));
    /// let payload = JobPayload {
    ///     title: Some("Engineer".into()),
    ///     company: Some("Acme".into()),
    ///     location_country: Some("Germany".into()),
    ///     location_city: Some("Berlin".into()),
    ///     ..Default::default()
    /// };
    /// let job = tokio_test::block_on(svc.create(payload)).unwrap();
    /// assert_eq!(job.company, "Acme");
    /// assert!(job.tags.is_empty());
    /// ```
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: JobPayload) -> Result<Job, ServiceError> {
        let fields = payload.into_fields()?;
        let job = self.repo.create(fields, Utc::now()).await?;
        info!(job_id = job.id, company = %job.company, "job_created");
        Ok(job)
    }

    /// Replace every field of an existing job except its id and posting time.
    /// Existence is checked before the payload.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: JobPayload) -> Result<Job, ServiceError> {
        if self.repo.get(id).await?.is_none() {
            return Err(ServiceError::not_found("job"));
        }
        let fields = payload.into_fields()?;
        let job = self
            .repo
            .replace(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("job"))?;
        info!(job_id = job.id, "job_updated");
        Ok(job)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("job"));
        }
        info!(job_id = id, "job_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::repository::mock::MockJobRepository;
    use chrono::Duration;

    fn payload(title: &str, company: &str, country: &str, city: &str) -> JobPayload {
        JobPayload {
            title: Some(title.into()),
            company: Some(company.into()),
            location_country: Some(country.into()),
            location_city: Some(city.into()),
            salary_range: None,
            tags: None,
        }
    }

    fn setup() -> (Arc<MockJobRepository>, JobService) {
        let repo = Arc::new(MockJobRepository::default());
        let svc = JobService::new(repo.clone());
        (repo, svc)
    }

    #[tokio::test]
    async fn tags_round_trip_through_listing() {
        let (_, svc) = setup();
        let p = JobPayload { tags: Some(vec!["a".into(), "b".into()]), ..payload("T", "Acme", "DE", "Berlin") };
        svc.create(p).await.unwrap();
        let list = svc.list(&JobQuery::default()).await.unwrap();
        assert_eq!(list[0].tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn tags_are_stored_comma_joined() {
        let (repo, svc) = setup();
        let p = JobPayload { tags: Some(vec!["rust".into(), "remote".into()]), ..payload("T", "Acme", "DE", "Berlin") };
        let job = svc.create(p).await.unwrap();
        assert_eq!(repo.stored_tags(job.id).as_deref(), Some("rust,remote"));

        let bare = svc.create(payload("T", "Acme", "DE", "Berlin")).await.unwrap();
        assert_eq!(repo.stored_tags(bare.id), None);
    }

    #[tokio::test]
    async fn tag_containing_delimiter_comes_back_split() {
        let (_, svc) = setup();
        let p = JobPayload { tags: Some(vec!["a,b".into()]), ..payload("T", "Acme", "DE", "Berlin") };
        svc.create(p).await.unwrap();
        let list = svc.list(&JobQuery::default()).await.unwrap();
        assert_eq!(list[0].tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn single_empty_tag_lists_as_no_tags() {
        let (_, svc) = setup();
        let p = JobPayload { tags: Some(vec![String::new()]), ..payload("T", "Acme", "DE", "Berlin") };
        svc.create(p).await.unwrap();
        let list = svc.list(&JobQuery::default()).await.unwrap();
        assert!(list[0].tags.is_empty());
    }

    #[tokio::test]
    async fn age_in_hours_never_decreases() {
        let (repo, svc) = setup();
        let posted = Utc::now() - Duration::minutes(150);
        let fields = payload("T", "Acme", "DE", "Berlin").into_fields().unwrap();
        repo.create(fields, posted).await.unwrap();

        let q = JobQuery::default();
        let now = Utc::now();
        let first = svc.list_at(&q, now).await.unwrap()[0].posted_time;
        let later = svc.list_at(&q, now + Duration::hours(1)).await.unwrap()[0].posted_time;
        assert_eq!(first, 2);
        assert_eq!(later, 3);
    }

    #[tokio::test]
    async fn filters_intersect() {
        let (_, svc) = setup();
        svc.create(payload("A", "Acme", "Germany", "Berlin")).await.unwrap();
        svc.create(payload("B", "Acme", "France", "Paris")).await.unwrap();
        svc.create(payload("C", "Globex", "Germany", "Berlin")).await.unwrap();

        let by_country = svc.list(&JobQuery::from_pairs([("location_country", "Germany")])).await.unwrap();
        assert_eq!(by_country.len(), 2);
        assert!(by_country.iter().all(|j| j.location_country == "Germany"));

        let both = svc
            .list(&JobQuery::from_pairs([("location_country", "Germany"), ("company", "Acme")]))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "A");

        let none = svc.list(&JobQuery::from_pairs([("company", "acme")])).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn title_ascending_and_default_order() {
        let (repo, svc) = setup();
        let now = Utc::now();
        for (i, title) in ["Mid", "Alpha", "Zeta"].iter().enumerate() {
            let fields = payload(title, "Acme", "DE", "Berlin").into_fields().unwrap();
            repo.create(fields, now - Duration::hours(10 - i as i64)).await.unwrap();
        }

        let asc = svc.list(&JobQuery::from_pairs([("sort_by", "title"), ("order", "asc")])).await.unwrap();
        let titles: Vec<&str> = asc.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Mid", "Zeta"]);

        let implicit = svc.list(&JobQuery::default()).await.unwrap();
        let explicit = svc
            .list(&JobQuery::from_pairs([("sort_by", "posted_time"), ("order", "desc")]))
            .await
            .unwrap();
        assert_eq!(implicit, explicit);
        assert_eq!(implicit[0].title, "Zeta");

        let bogus = svc.list(&JobQuery::from_pairs([("sort_by", "salary_range")])).await.unwrap();
        assert_eq!(bogus, implicit);
    }

    #[tokio::test]
    async fn create_missing_company_persists_nothing() {
        let (repo, svc) = setup();
        let p = JobPayload { company: None, ..payload("T", "Acme", "DE", "Berlin") };
        let err = svc.create(p).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingFields(ref m) if m == &vec!["company"]));
        assert!(repo.is_empty());
        assert!(svc.list(&JobQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_a_full_replace() {
        let (_, svc) = setup();
        let p = JobPayload {
            salary_range: Some("50k-70k".into()),
            tags: Some(vec!["x".into()]),
            ..payload("T", "Acme", "DE", "Berlin")
        };
        let created = svc.create(p).await.unwrap();

        let updated = svc.update(created.id, payload("T2", "Globex", "FR", "Paris")).await.unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.company, "Globex");
        assert_eq!(updated.salary_range, None);
        assert!(updated.tags.is_empty());
        assert_eq!(updated.posted_time, created.posted_time);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_changes_nothing() {
        let (_, svc) = setup();
        svc.create(payload("T", "Acme", "DE", "Berlin")).await.unwrap();
        let before = svc.list(&JobQuery::default()).await.unwrap();

        let err = svc.update(999, payload("X", "Y", "Z", "W")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        // existence wins over validation
        let err = svc.update(999, JobPayload::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        assert_eq!(svc.list(&JobQuery::default()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_with_missing_field_is_rejected() {
        let (_, svc) = setup();
        let created = svc.create(payload("T", "Acme", "DE", "Berlin")).await.unwrap();
        let err = svc.update(created.id, JobPayload { title: None, ..payload("", "", "", "") }).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingFields(_)));
    }

    #[tokio::test]
    async fn delete_twice() {
        let (_, svc) = setup();
        let created = svc.create(payload("T", "Acme", "DE", "Berlin")).await.unwrap();
        svc.delete(created.id).await.unwrap();
        assert!(svc.list(&JobQuery::default()).await.unwrap().is_empty());
        let err = svc.delete(created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn counts_cover_whole_table() {
        let (_, svc) = setup();
        for _ in 0..3 {
            svc.create(payload("T", "Acme", "Germany", "Berlin")).await.unwrap();
        }
        svc.create(payload("T", "Globex", "France", "Paris")).await.unwrap();

        let counts = svc.filter_counts().await.unwrap();
        assert_eq!(counts.companies.get("Acme"), Some(&3));
        assert_eq!(counts.companies.get("Globex"), Some(&1));
        assert_eq!(counts.companies.len(), 2);
        assert_eq!(counts.countries.get("Germany"), Some(&3));
        assert_eq!(counts.cities.get("Paris"), Some(&1));
    }
}
