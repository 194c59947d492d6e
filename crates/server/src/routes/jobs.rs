use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use service::jobs::{
    domain::{FilterCounts, JobListing, JobPayload},
    query::JobQuery,
};
use tracing::info;

use crate::{errors::JsonApiError, observability, state::ServerState};

#[utoipa::path(
    get, path = "/filters", tag = "jobs",
    responses(
        (status = 200, description = "Job counts per country, city and company", body = crate::openapi::FilterCountsDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn filters(State(state): State<ServerState>) -> Result<Json<FilterCounts>, JsonApiError> {
    let res = state.jobs.filter_counts().await.map(Json).map_err(JsonApiError::from);
    observability::record("filters", observability::outcome_of(&res));
    res
}

#[utoipa::path(
    get, path = "/jobs", tag = "jobs",
    params(
        ("sort_by" = Option<String>, Query, description = "title, company, location_country, location_city or posted_time (default)"),
        ("order" = Option<String>, Query, description = "asc; anything else sorts descending"),
        ("location_country" = Option<String>, Query, description = "Exact country match"),
        ("location_city" = Option<String>, Query, description = "Exact city match"),
        ("company" = Option<String>, Query, description = "Exact company match")
    ),
    responses(
        (status = 200, description = "Matching jobs; posted_time is the age in whole hours", body = [crate::openapi::JobListingDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<JobListing>>, JsonApiError> {
    let query = JobQuery::from_pairs(pairs);
    let res = state.jobs.list(&query).await.map_err(JsonApiError::from);
    observability::record("list", observability::outcome_of(&res));
    let jobs = res?;
    info!(count = jobs.len(), "list jobs");
    Ok(Json(jobs))
}

#[utoipa::path(
    post, path = "/jobs", tag = "jobs",
    request_body = crate::openapi::JobPayloadDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing required fields", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<JobPayload>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let res = state.jobs.create(payload).await.map_err(JsonApiError::from);
    observability::record("create", observability::outcome_of(&res));
    res?;
    Ok((StatusCode::CREATED, Json(Message::new("Job added successfully"))))
}

#[utoipa::path(
    put, path = "/jobs/{id}", tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    request_body = crate::openapi::JobPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing required fields", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Job not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<JobPayload>,
) -> Result<Json<Message>, JsonApiError> {
    let res = state.jobs.update(id, payload).await.map_err(JsonApiError::from);
    observability::record("update", observability::outcome_of(&res));
    res?;
    Ok(Json(Message::new("Job updated successfully")))
}

#[utoipa::path(
    delete, path = "/jobs/{id}", tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Job not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Message>, JsonApiError> {
    let res = state.jobs.delete(id).await.map_err(JsonApiError::from);
    observability::record("delete", observability::outcome_of(&res));
    res?;
    Ok(Json(Message::new("Job deleted successfully")))
}
