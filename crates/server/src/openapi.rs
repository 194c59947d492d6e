use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub details: Option<String> }

/// Create/update body. The four location and identity fields are required.
#[derive(ToSchema)]
pub struct JobPayloadDoc {
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct JobListingDoc {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location_country: String,
    pub location_city: String,
    pub salary_range: Option<String>,
    pub tags: Vec<String>,
    /// Whole hours since the job was posted.
    pub posted_time: i64,
}

#[derive(ToSchema)]
pub struct FilterCountsDoc {
    pub countries: BTreeMap<String, u64>,
    pub cities: BTreeMap<String, u64>,
    pub companies: BTreeMap<String, u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::jobs::filters,
        crate::routes::jobs::list,
        crate::routes::jobs::create,
        crate::routes::jobs::update,
        crate::routes::jobs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            JobPayloadDoc,
            JobListingDoc,
            FilterCountsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "jobs")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_job_paths() {
        let doc = ApiDoc::openapi();
        for p in ["/filters", "/jobs", "/jobs/{id}", "/health"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }
}
