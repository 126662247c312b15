use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::applications::repository::ApplicationRepository;
use crate::marketplace::identity::{bearer_identity, AuthService, Role, UserId};
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::jobs::router::unauthenticated;
use crate::marketplace::store::RepositoryError;

use super::domain::{CompanyDraft, UserDraft};
use super::repository::{CompanyRepository, UserRepository};
use super::service::{UserService, UserServiceError};

/// Shared state for the account routes.
pub struct UserRoutes<U, C, J, A> {
    service: Arc<UserService<U, C, J, A>>,
    auth: Arc<dyn AuthService>,
}

impl<U, C, J, A> UserRoutes<U, C, J, A> {
    pub fn new(service: Arc<UserService<U, C, J, A>>, auth: Arc<dyn AuthService>) -> Self {
        Self { service, auth }
    }
}

impl<U, C, J, A> Clone for UserRoutes<U, C, J, A> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            auth: self.auth.clone(),
        }
    }
}

/// Router builder for the account surface.
pub fn user_router<U, C, J, A>(routes: UserRoutes<U, C, J, A>) -> Router
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/users", post(register_handler::<U, C, J, A>))
        .route(
            "/api/v1/users/:user_id",
            axum::routing::delete(delete_handler::<U, C, J, A>),
        )
        .route(
            "/api/v1/users/:user_id/role",
            patch(role_handler::<U, C, J, A>),
        )
        .route("/api/v1/company", put(company_handler::<U, C, J, A>))
        .with_state(routes)
}

#[derive(Debug, Deserialize)]
struct RoleChangeRequest {
    role: Role,
}

fn user_error(err: UserServiceError) -> Response {
    let status = match &err {
        UserServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        UserServiceError::NotFound => StatusCode::NOT_FOUND,
        UserServiceError::HasDependents => StatusCode::CONFLICT,
        UserServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        UserServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        UserServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        UserServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

async fn register_handler<U, C, J, A>(
    State(routes): State<UserRoutes<U, C, J, A>>,
    Json(draft): Json<UserDraft>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match routes.service.register(draft) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => user_error(err),
    }
}

async fn role_handler<U, C, J, A>(
    State(routes): State<UserRoutes<U, C, J, A>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RoleChangeRequest>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes
        .service
        .change_role(&identity, &UserId(user_id), request.role)
    {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => user_error(err),
    }
}

async fn delete_handler<U, C, J, A>(
    State(routes): State<UserRoutes<U, C, J, A>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.delete(&identity, &UserId(user_id)) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "deleted" }))).into_response(),
        Err(err) => user_error(err),
    }
}

async fn company_handler<U, C, J, A>(
    State(routes): State<UserRoutes<U, C, J, A>>,
    headers: HeaderMap,
    Json(draft): Json<CompanyDraft>,
) -> Response
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let identity = match bearer_identity(routes.auth.as_ref(), &headers) {
        Ok(identity) => identity,
        Err(err) => return unauthenticated(err),
    };
    match routes.service.upsert_company(&identity, draft) {
        Ok(company) => (StatusCode::OK, Json(company)).into_response(),
        Err(err) => user_error(err),
    }
}
