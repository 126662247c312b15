use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use devboard::marketplace::applications::{
    application_router, ApplicationRepository, ApplicationRoutes,
};
use devboard::marketplace::jobs::{job_router, JobRepository, JobRoutes};
use devboard::marketplace::users::{user_router, CompanyRepository, UserRepository, UserRoutes};

/// Compose the marketplace surfaces with the operational endpoints.
pub(crate) fn marketplace_router<J, C, A, U>(
    jobs: JobRoutes<J, C, A>,
    applications: ApplicationRoutes<A, J>,
    users: UserRoutes<U, C, J, A>,
) -> Router
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    job_router(jobs)
        .merge(application_router(applications))
        .merge(user_router(users))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
