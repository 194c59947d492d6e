//! Listing query: whitelisted equality filters plus an enumerated sort.

use std::cmp::Ordering;

use super::domain::Job;

/// The columns a listing may be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    LocationCountry,
    LocationCity,
    Company,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [
        FilterField::LocationCountry,
        FilterField::LocationCity,
        FilterField::Company,
    ];

    pub fn from_param(name: &str) -> Option<Self> {
        match name {
            "location_country" => Some(FilterField::LocationCountry),
            "location_city" => Some(FilterField::LocationCity),
            "company" => Some(FilterField::Company),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::LocationCountry => "location_country",
            FilterField::LocationCity => "location_city",
            FilterField::Company => "company",
        }
    }

    pub fn value_of(self, job: &Job) -> &str {
        match self {
            FilterField::LocationCountry => &job.location_country,
            FilterField::LocationCity => &job.location_city,
            FilterField::Company => &job.company,
        }
    }
}

/// Exact, case-sensitive equality filters, AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    pub company: Option<String>,
}

impl JobFilter {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::LocationCountry => self.location_country.as_deref(),
            FilterField::LocationCity => self.location_city.as_deref(),
            FilterField::Company => self.company.as_deref(),
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::LocationCountry => &mut self.location_country,
            FilterField::LocationCity => &mut self.location_city,
            FilterField::Company => &mut self.company,
        }
    }

    /// Set a filter unless one is already present for this field.
    pub fn set_if_absent(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(value.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn matches(&self, job: &Job) -> bool {
        FilterField::ALL
            .iter()
            .all(|f| self.get(*f).map_or(true, |want| f.value_of(job) == want))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Company,
    LocationCountry,
    LocationCity,
    #[default]
    PostedTime,
}

impl SortKey {
    /// Unrecognized or absent values fall back to `PostedTime`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortKey::Title,
            Some("company") => SortKey::Company,
            Some("location_country") => SortKey::LocationCountry,
            Some("location_city") => SortKey::LocationCity,
            _ => SortKey::PostedTime,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Company => "company",
            SortKey::LocationCountry => "location_country",
            SortKey::LocationCity => "location_city",
            SortKey::PostedTime => "posted_time",
        }
    }

    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Company => a.company.cmp(&b.company),
            SortKey::LocationCountry => a.location_country.cmp(&b.location_country),
            SortKey::LocationCity => a.location_city.cmp(&b.location_city),
            SortKey::PostedTime => a.posted_time.cmp(&b.posted_time),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only `asc` sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl JobSort {
    /// Sort key first, then id in the same direction.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        let ord = self.key.compare(a, b).then_with(|| a.id.cmp(&b.id));
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub filter: JobFilter,
    pub sort: JobSort,
}

impl JobQuery {
    /// Build from raw query-string pairs. For repeated keys the first
    /// occurrence wins; keys outside the whitelist are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = JobFilter::default();
        let mut sort_by: Option<String> = None;
        let mut order: Option<String> = None;
        for (k, v) in pairs {
            match k.as_ref() {
                "sort_by" => {
                    if sort_by.is_none() {
                        sort_by = Some(v.into());
                    }
                }
                "order" => {
                    if order.is_none() {
                        order = Some(v.into());
                    }
                }
                other => {
                    if let Some(field) = FilterField::from_param(other) {
                        filter.set_if_absent(field, v);
                    }
                }
            }
        }
        Self {
            filter,
            sort: JobSort {
                key: SortKey::parse(sort_by.as_deref()),
                order: SortOrder::parse(order.as_deref()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn job(id: i32, title: &str, company: &str, country: &str, city: &str, age_h: i64) -> Job {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Job {
            id,
            title: title.into(),
            company: company.into(),
            location_country: country.into(),
            location_city: city.into(),
            salary_range: None,
            tags: vec![],
            posted_time: base - Duration::hours(age_h),
        }
    }

    #[test]
    fn defaults_are_posted_time_desc() {
        let q = JobQuery::from_pairs(Vec::<(String, String)>::new());
        assert_eq!(q.sort, JobSort { key: SortKey::PostedTime, order: SortOrder::Desc });
        assert!(q.filter.is_empty());
    }

    #[test]
    fn unknown_sort_and_order_fall_back() {
        let q = JobQuery::from_pairs([("sort_by", "salary_range"), ("order", "ASC")]);
        assert_eq!(q.sort.key, SortKey::PostedTime);
        assert_eq!(q.sort.order, SortOrder::Desc);
    }

    #[test]
    fn whitelisted_filters_only() {
        let q = JobQuery::from_pairs([
            ("company", "Acme"),
            ("title", "Engineer"),
            ("location_city", "Berlin"),
            ("sort_by", "title"),
            ("order", "asc"),
        ]);
        assert_eq!(q.filter.company.as_deref(), Some("Acme"));
        assert_eq!(q.filter.location_city.as_deref(), Some("Berlin"));
        assert_eq!(q.filter.location_country, None);
        assert_eq!(q.sort, JobSort { key: SortKey::Title, order: SortOrder::Asc });
    }

    #[test]
    fn first_occurrence_wins() {
        let q = JobQuery::from_pairs([("company", "Acme"), ("company", "Globex"), ("order", "asc"), ("order", "desc")]);
        assert_eq!(q.filter.company.as_deref(), Some("Acme"));
        assert_eq!(q.sort.order, SortOrder::Asc);
    }

    #[test]
    fn filter_matching_is_exact_and_anded() {
        let a = job(1, "A", "Acme", "Germany", "Berlin", 1);
        let b = job(2, "B", "Acme", "France", "Paris", 1);
        let mut f = JobFilter::default();
        f.set_if_absent(FilterField::Company, "Acme");
        assert!(f.matches(&a) && f.matches(&b));
        f.set_if_absent(FilterField::LocationCountry, "Germany");
        assert!(f.matches(&a));
        assert!(!f.matches(&b));

        let mut case = JobFilter::default();
        case.set_if_absent(FilterField::Company, "acme");
        assert!(!case.matches(&a));
    }

    #[test]
    fn sort_ties_break_on_id() {
        let x = job(1, "Same", "Acme", "DE", "Berlin", 1);
        let y = job(2, "Same", "Acme", "DE", "Berlin", 1);
        let asc = JobSort { key: SortKey::Title, order: SortOrder::Asc };
        let desc = JobSort { key: SortKey::Title, order: SortOrder::Desc };
        assert_eq!(asc.compare(&x, &y), Ordering::Less);
        assert_eq!(desc.compare(&x, &y), Ordering::Greater);
    }

    #[test]
    fn newest_first_by_default() {
        let old = job(1, "Old", "Acme", "DE", "Berlin", 10);
        let new = job(2, "New", "Acme", "DE", "Berlin", 1);
        let mut v = vec![old.clone(), new.clone()];
        let s = JobSort::default();
        v.sort_by(|a, b| s.compare(a, b));
        assert_eq!(v[0].id, new.id);
    }
}
