use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use models::job::JobFields;

use crate::errors::ServiceError;

/// Fields that must be present in a create or update body.
pub const REQUIRED_FIELDS: [&str; 4] = ["title", "company", "location_country", "location_city"];

/// Create/update request body.
///
/// Every field is optional at the type level so that missing keys surface as a
/// `MissingFields` error instead of a deserialization failure. Only presence is
/// checked: an empty string counts as present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPayload {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    pub salary_range: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl JobPayload {
    /// Check required-field presence and produce the column values to store.
    /// Omitted optional fields become absent, which is what a full replace needs.
    pub fn into_fields(self) -> Result<JobFields, ServiceError> {
        match (self.title, self.company, self.location_country, self.location_city) {
            (Some(title), Some(company), Some(location_country), Some(location_city)) => Ok(JobFields {
                title,
                company,
                location_country,
                location_city,
                salary_range: self.salary_range,
                tags: self.tags.unwrap_or_default(),
            }),
            (title, company, country, city) => {
                let present = [title.is_some(), company.is_some(), country.is_some(), city.is_some()];
                let missing = REQUIRED_FIELDS
                    .iter()
                    .zip(present)
                    .filter(|(_, p)| !p)
                    .map(|(name, _)| *name)
                    .collect();
                Err(ServiceError::MissingFields(missing))
            }
        }
    }
}

/// Stored job with tags unpacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Vec<String>,
    pub posted_time: DateTime<Utc>,
}

impl From<models::job::Model> for Job {
    fn from(m: models::job::Model) -> Self {
        let tags = m.tag_list();
        Self {
            id: m.id,
            title: m.title,
            company: m.company,
            location_country: m.location_country,
            location_city: m.location_city,
            salary_range: m.salary_range,
            tags,
            posted_time: m.posted_time.with_timezone(&Utc),
        }
    }
}

impl Job {
    /// Listing view as seen at `now`.
    pub fn listing_at(self, now: DateTime<Utc>) -> JobListing {
        JobListing {
            posted_time: hours_since(self.posted_time, now),
            id: self.id,
            title: self.title,
            company: self.company,
            location_country: self.location_country,
            location_city: self.location_city,
            salary_range: self.salary_range,
            tags: self.tags,
        }
    }
}

/// Job as returned by the listing endpoint: `posted_time` is the age in whole hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Vec<String>,
    pub posted_time: i64,
}

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// `floor((now - posted) / 1h)`, rounding toward negative infinity for future postings.
pub fn hours_since(posted: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - posted).num_milliseconds().div_euclid(MILLIS_PER_HOUR)
}

/// Per-value job counts over the whole table, for building filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    pub countries: BTreeMap<String, u64>,
    pub cities: BTreeMap<String, u64>,
    pub companies: BTreeMap<String, u64>,
}
