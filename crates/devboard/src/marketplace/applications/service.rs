use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::SearchConfig;
use crate::marketplace::identity::{Identity, Role};
use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::policy::{self, DenyReason};
use crate::marketplace::search::{self, ApplicationFilter, Page, PageRequest};
use crate::marketplace::store::RepositoryError;
use crate::marketplace::validate::ValidationError;

use super::domain::{
    Application, ApplicationDraft, ApplicationForm, ApplicationId, ApplicationStatus,
    InvalidTransition,
};
use super::repository::ApplicationRepository;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Service owning the application state machine: applying, employer-driven
/// status transitions, withdrawal, and the listing surfaces.
pub struct ApplicationService<A, J> {
    applications: Arc<A>,
    jobs: Arc<J>,
    search: SearchConfig,
}

impl<A, J> ApplicationService<A, J>
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    pub fn new(applications: Arc<A>, jobs: Arc<J>, search: SearchConfig) -> Self {
        Self {
            applications,
            jobs,
            search,
        }
    }

    /// Submit an application against an active job. The `(job, applicant)`
    /// slot is occupied forever once this succeeds, withdrawal included.
    pub fn apply(
        &self,
        identity: &Identity,
        job_id: &JobId,
        draft: ApplicationDraft,
    ) -> Result<Application, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(ApplicationServiceError::NotFound)?;
        let already_applied = self
            .applications
            .for_pair(job_id, &identity.user_id)?
            .is_some();
        policy::can_apply(identity, &job, already_applied).map_err(|reason| match reason {
            DenyReason::AlreadyApplied => ApplicationServiceError::AlreadyApplied,
            DenyReason::JobInactive => ApplicationServiceError::JobInactive,
            other => ApplicationServiceError::Forbidden(other),
        })?;

        let form = ApplicationForm::parse(draft)?;
        let now = Utc::now();
        let application = Application {
            id: next_application_id(),
            job_id: job_id.clone(),
            applicant: identity.user_id.clone(),
            form,
            status: ApplicationStatus::Pending,
            applied_at: now,
            updated_at: now,
        };
        // A concurrent duplicate slips past the pre-check; the store's
        // uniqueness surfaces as the same conflict.
        match self.applications.insert(application) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Conflict) => Err(ApplicationServiceError::AlreadyApplied),
            Err(other) => Err(other.into()),
        }
    }

    /// Move an application along the employer's side of the state machine.
    /// The allowed `Reviewing -> Reviewing` no-op still advances
    /// `updated_at`.
    pub fn update_status(
        &self,
        identity: &Identity,
        id: &ApplicationId,
        target: ApplicationStatus,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::NotFound)?;
        let job = self
            .jobs
            .fetch(&application.job_id)?
            .ok_or(ApplicationServiceError::NotFound)?;
        policy::can_mutate_application(identity, &job)
            .map_err(ApplicationServiceError::Forbidden)?;

        if !application.status.employer_can_move_to(target) {
            return Err(InvalidTransition {
                from: application.status,
                to: target,
            }
            .into());
        }

        application.status = target;
        application.updated_at = Utc::now();
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// Withdraw an application. Locked once the employer reached a
    /// terminal verdict; withdrawing twice is an invalid transition.
    pub fn withdraw(
        &self,
        identity: &Identity,
        id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self
            .applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::NotFound)?;
        policy::can_withdraw(identity, &application).map_err(ApplicationServiceError::Forbidden)?;

        if !application.status.applicant_can_withdraw() {
            return Err(InvalidTransition {
                from: application.status,
                to: ApplicationStatus::Withdrawn,
            }
            .into());
        }

        application.status = ApplicationStatus::Withdrawn;
        application.updated_at = Utc::now();
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// The caller's own applications. Callers outside the developer role
    /// simply own none and receive an empty page.
    pub fn list_mine(
        &self,
        identity: &Identity,
        filter: &ApplicationFilter,
    ) -> Result<Page<Application>, ApplicationServiceError> {
        let applications = self.applications.by_applicant(&identity.user_id)?;
        Ok(self.page_of(applications, filter))
    }

    /// Applications received for one posting; owner-only.
    pub fn list_for_job(
        &self,
        identity: &Identity,
        job_id: &JobId,
        filter: &ApplicationFilter,
    ) -> Result<Page<Application>, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(ApplicationServiceError::NotFound)?;
        policy::can_view_job_applications(identity, &job)
            .map_err(ApplicationServiceError::Forbidden)?;
        let applications = self.applications.by_job(job_id)?;
        Ok(self.page_of(applications, filter))
    }

    /// Applications received across every posting the caller owns.
    pub fn list_for_employer(
        &self,
        identity: &Identity,
        filter: &ApplicationFilter,
    ) -> Result<Page<Application>, ApplicationServiceError> {
        let mut applications = Vec::new();
        for job in self.jobs.by_owner(&identity.user_id)? {
            applications.extend(self.applications.by_job(&job.id)?);
        }
        Ok(self.page_of(applications, filter))
    }

    /// The unrestricted admin-wide listing.
    pub fn list_all(
        &self,
        identity: &Identity,
        filter: &ApplicationFilter,
    ) -> Result<Page<Application>, ApplicationServiceError> {
        if identity.role != Role::Admin {
            return Err(ApplicationServiceError::Forbidden(DenyReason::WrongRole));
        }
        let applications = self.applications.all()?;
        Ok(self.page_of(applications, filter))
    }

    fn page_of(
        &self,
        mut applications: Vec<Application>,
        filter: &ApplicationFilter,
    ) -> Page<Application> {
        if let Some(status) = filter.status {
            applications.retain(|application| application.status == status);
        }
        applications.sort_by(|a, b| {
            b.applied_at
                .cmp(&a.applied_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let request = PageRequest::clamped(filter.page, filter.limit, &self.search);
        search::paginate(applications, &request)
    }
}

/// Error raised by the application lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("operation denied: {0}")]
    Forbidden(DenyReason),
    #[error("application or job not found")]
    NotFound,
    #[error("an application for this job already exists")]
    AlreadyApplied,
    #[error("job is not accepting applications")]
    JobInactive,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
