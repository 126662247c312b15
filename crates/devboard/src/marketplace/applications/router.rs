use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::identity::{bearer_identity, AuthService};
use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::jobs::router::unauthenticated;
use crate::marketplace::search::{ApplicationFilter, Page};
use crate::marketplace::store::RepositoryError;

use super::domain::{Application, ApplicationDraft, ApplicationId, ApplicationStatus};
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};

/// Shared state for the application routes.
pub struct ApplicationRoutes<A, J> {
    service: Arc<ApplicationService<A, J>>,
    auth: Arc<dyn AuthService>,
}

impl<A, J> ApplicationRoutes<A, J> {
    pub fn new(service: Arc<ApplicationService<A, J>>, auth: Arc<dyn AuthService>) -> Self {
        Self { service, auth }
    }
}

impl<A, J> Clone for ApplicationRoutes<A, J> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// Router builder for the application surface.
pub fn application_router<A, J>(routes: ApplicationRoutes<A, J>) -> Router
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<A, J>).get(job_applications_handler::<A, J>),
        )
        .route("/api/v1/applications/mine", get(mine_handler::<A, J>))
        .route(
            "/api/v1/applications/received",
            get(received_handler::<A, J>),
        )
        .route("/api/v1/applications/all", get(all_handler::<A, J>))
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<A, J>),
        )
        .route(
            "/api/v1/applications/:application_id/withdraw",
            post(withdraw_handler::<A, J>),
        )
        .with_state(routes)
}

#[derive(Debug, Deserialize)]
struct StatusChangeRequest {
    status: ApplicationStatus,
}

fn application_error(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ApplicationServiceError::NotFound => StatusCode::NOT_FOUND,
        ApplicationServiceError::AlreadyApplied => StatusCode::CONFLICT,
        ApplicationServiceError::JobInactive => StatusCode::BAD_REQUEST,
        ApplicationServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ApplicationServiceError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn page_response(page: Page<Application>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "applications": page.items, "pagination": page.pagination })),
    )
        .into_response()
}

async fn apply_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.apply(&identity, &JobId(job_id), draft) {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => application_error(err),
    }
}

async fn job_applications_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Path(job_id): Path<String>,
    Query(filter): Query<ApplicationFilter>,
    headers: HeaderMap,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes
        .service
        .list_for_job(&identity, &JobId(job_id), &filter)
    {
        Ok(page) => page_response(page),
        Err(err) => application_error(err),
    }
}

async fn mine_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Query(filter): Query<ApplicationFilter>,
    headers: HeaderMap,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.list_mine(&identity, &filter) {
        Ok(page) => page_response(page),
        Err(err) => application_error(err),
    }
}

async fn received_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Query(filter): Query<ApplicationFilter>,
    headers: HeaderMap,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.list_for_employer(&identity, &filter) {
        Ok(page) => page_response(page),
        Err(err) => application_error(err),
    }
}

async fn all_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Query(filter): Query<ApplicationFilter>,
    headers: HeaderMap,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.list_all(&identity, &filter) {
        Ok(page) => page_response(page),
        Err(err) => application_error(err),
    }
}

async fn status_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<StatusChangeRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes
        .service
        .update_status(&identity, &ApplicationId(application_id), request.status)
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => application_error(err),
    }
}

async fn withdraw_handler<A, J>(
    State(routes): State<ApplicationRoutes<A, J>>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes
        .service
        .withdraw(&identity, &ApplicationId(application_id))
    {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => application_error(err),
    }
}
