use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::applications::repository::ApplicationRepository;
use crate::marketplace::identity::{bearer_identity, AuthError, AuthService};
use crate::marketplace::search::JobFilter;
use crate::marketplace::store::RepositoryError;
use crate::marketplace::users::repository::CompanyRepository;

use super::domain::{ExperienceLevel, JobDraft, JobId, JobPatch, JobType};
use super::repository::JobRepository;
use super::service::{JobService, JobServiceError};

/// Shared state for the job routes: the lifecycle service plus the
/// credential verifier.
pub struct JobRoutes<J, C, A> {
    service: Arc<JobService<J, C, A>>,
    auth: Arc<dyn AuthService>,
}

impl<J, C, A> JobRoutes<J, C, A> {
    pub fn new(service: Arc<JobService<J, C, A>>, auth: Arc<dyn AuthService>) -> Self {
        Self { service, auth }
    }
}

impl<J, C, A> Clone for JobRoutes<J, C, A> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// Router builder for the posting surface.
pub fn job_router<J, C, A>(routes: JobRoutes<J, C, A>) -> Router
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_handler::<J, C, A>).get(list_handler::<J, C, A>),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(get_handler::<J, C, A>)
                .patch(update_handler::<J, C, A>)
                .delete(delete_handler::<J, C, A>),
        )
        .route(
            "/api/v1/jobs/:job_id/toggle",
            post(toggle_handler::<J, C, A>),
        )
        .with_state(routes)
}

/// Query-string form of the listing filter; `skills` arrives as a
/// comma-separated list.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobListQuery {
    query: Option<String>,
    location: Option<String>,
    job_type: Option<JobType>,
    experience: Option<ExperienceLevel>,
    skills: Option<String>,
    is_remote: Option<bool>,
    salary_min: Option<u32>,
    salary_max: Option<u32>,
    page: Option<u32>,
    limit: Option<u32>,
}

impl JobListQuery {
    fn into_filter(self) -> JobFilter {
        let skills = self
            .skills
            .map(|raw| {
                raw.split(',')
                    .map(|skill| skill.trim().to_string())
                    .filter(|skill| !skill.is_empty())
                    .collect::<Vec<String>>()
            })
            .filter(|list| !list.is_empty());
        JobFilter {
            query: self.query,
            location: self.location,
            job_type: self.job_type,
            experience: self.experience,
            skills,
            is_remote: self.is_remote,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            page: self.page,
            limit: self.limit,
        }
    }
}

pub(crate) fn unauthenticated(err: AuthError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn job_error(err: JobServiceError) -> Response {
    let status = match &err {
        JobServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        JobServiceError::NotFound => StatusCode::NOT_FOUND,
        JobServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        JobServiceError::HasApplications => StatusCode::CONFLICT,
        JobServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        JobServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        JobServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn create_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.create(&identity, draft) {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(err) => job_error(err),
    }
}

async fn list_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    Query(query): Query<JobListQuery>,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match routes.service.list(&query.into_filter()) {
        Ok(page) => (
            StatusCode::OK,
            Json(json!({ "jobs": page.items, "pagination": page.pagination })),
        )
            .into_response(),
        Err(err) => job_error(err),
    }
}

async fn get_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match routes.service.get(&JobId(job_id)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => job_error(err),
    }
}

async fn update_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<JobPatch>,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.update(&identity, &JobId(job_id), patch) {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(err) => job_error(err),
    }
}

async fn delete_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.delete(&identity, &JobId(job_id)) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "deleted" }))).into_response(),
        Err(err) => job_error(err),
    }
}

async fn toggle_handler<J, C, A>(
    State(routes): State<JobRoutes<J, C, A>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.toggle_active(&identity, &JobId(job_id)) {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(err) => job_error(err),
    }
}
