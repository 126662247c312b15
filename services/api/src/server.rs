use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryCompanyRepository, InMemoryJobRepository,
    InMemoryUserRepository, StaticTokenAuth,
};
use crate::routes::marketplace_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use devboard::config::AppConfig;
use devboard::error::AppError;
use devboard::marketplace::applications::{ApplicationRoutes, ApplicationService};
use devboard::marketplace::identity::{AuthService, Identity, Role};
use devboard::marketplace::jobs::{JobRoutes, JobService};
use devboard::marketplace::users::{UserRoutes, UserService};
use devboard::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let jobs = Arc::new(InMemoryJobRepository::default());
    let companies = Arc::new(InMemoryCompanyRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());

    // Stand-in for the external auth collaborator: fixed bearer tokens for
    // one account per role.
    let auth = Arc::new(StaticTokenAuth::default());
    auth.grant(
        "token-employer",
        Identity::new("user-employer", Role::Employer),
    );
    auth.grant(
        "token-developer",
        Identity::new("user-developer", Role::Developer),
    );
    auth.grant("token-admin", Identity::new("user-admin", Role::Admin));
    let auth: Arc<dyn AuthService> = auth;

    let job_service = Arc::new(JobService::new(
        jobs.clone(),
        companies.clone(),
        applications.clone(),
        config.search.clone(),
    ));
    let application_service = Arc::new(ApplicationService::new(
        applications.clone(),
        jobs.clone(),
        config.search.clone(),
    ));
    let user_service = Arc::new(UserService::new(users, companies, jobs, applications));

    let app = marketplace_router(
        JobRoutes::new(job_service, auth.clone()),
        ApplicationRoutes::new(application_service, auth.clone()),
        UserRoutes::new(user_service, auth),
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job marketplace service ready");
    info!("static demo credentials provisioned: token-employer, token-developer, token-admin");

    axum::serve(listener, app).await?;
    Ok(())
}
