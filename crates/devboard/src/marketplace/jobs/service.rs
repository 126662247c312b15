use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::config::SearchConfig;
use crate::marketplace::applications::domain::ApplicationSummary;
use crate::marketplace::applications::repository::ApplicationRepository;
use crate::marketplace::identity::{Identity, UserId};
use crate::marketplace::policy::{self, DenyReason};
use crate::marketplace::search::{self, JobFilter, Page, PageRequest};
use crate::marketplace::store::RepositoryError;
use crate::marketplace::users::repository::CompanyRepository;
use crate::marketplace::validate::ValidationError;

use super::domain::{Job, JobDraft, JobId, JobPatch, JobSpec};
use super::repository::JobRepository;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// A posting paired with the posting company's display name, as returned
/// by the public listing.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub job: Job,
    pub company: Option<String>,
}

/// A posting plus the compact summaries of its applications.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    pub job: Job,
    pub applications: Vec<ApplicationSummary>,
}

/// Service owning creation, mutation, activation-toggle, and deletion of
/// postings. Every permission check routes through the policy module.
pub struct JobService<J, C, A> {
    jobs: Arc<J>,
    companies: Arc<C>,
    applications: Arc<A>,
    search: SearchConfig,
}

impl<J, C, A> JobService<J, C, A>
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, companies: Arc<C>, applications: Arc<A>, search: SearchConfig) -> Self {
        Self {
            jobs,
            companies,
            applications,
            search,
        }
    }

    /// Create a posting. Validation happens at construction; the record is
    /// stamped with the caller's identity and starts active.
    pub fn create(&self, identity: &Identity, draft: JobDraft) -> Result<Job, JobServiceError> {
        policy::can_create_job(identity).map_err(JobServiceError::Forbidden)?;
        let spec = JobSpec::parse(draft)?;
        let now = Utc::now();
        let job = Job {
            id: next_job_id(),
            spec,
            posted_by: identity.user_id.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let stored = self.jobs.insert(job)?;
        Ok(stored)
    }

    /// Merge a patch into the stored spec and revalidate the whole result.
    pub fn update(
        &self,
        identity: &Identity,
        id: &JobId,
        patch: JobPatch,
    ) -> Result<Job, JobServiceError> {
        let mut job = self.jobs.fetch(id)?.ok_or(JobServiceError::NotFound)?;
        policy::can_mutate_job(identity, &job).map_err(JobServiceError::Forbidden)?;

        job.spec = JobSpec::parse(patch.merge_into(&job.spec))?;
        job.updated_at = Utc::now();
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    /// Flip the visibility flag and return the updated posting.
    pub fn toggle_active(&self, identity: &Identity, id: &JobId) -> Result<Job, JobServiceError> {
        let mut job = self.jobs.fetch(id)?.ok_or(JobServiceError::NotFound)?;
        policy::can_mutate_job(identity, &job).map_err(JobServiceError::Forbidden)?;

        job.is_active = !job.is_active;
        job.updated_at = Utc::now();
        self.jobs.update(job.clone())?;
        Ok(job)
    }

    /// Delete a posting. The owning employer's delete cascades to the
    /// job's applications; an admin deleting someone else's posting is
    /// rejected while applications exist.
    pub fn delete(&self, identity: &Identity, id: &JobId) -> Result<(), JobServiceError> {
        let job = self.jobs.fetch(id)?.ok_or(JobServiceError::NotFound)?;
        policy::can_mutate_job(identity, &job).map_err(JobServiceError::Forbidden)?;

        if identity.user_id == job.posted_by {
            self.applications.delete_for_job(id)?;
        } else if !self.applications.by_job(id)?.is_empty() {
            return Err(JobServiceError::HasApplications);
        }

        self.jobs.delete(id)?;
        Ok(())
    }

    /// Fetch a posting with its nested application summaries.
    pub fn get(&self, id: &JobId) -> Result<JobDetail, JobServiceError> {
        let job = self.jobs.fetch(id)?.ok_or(JobServiceError::NotFound)?;
        let mut applications = self.applications.by_job(id)?;
        applications.sort_by(|a, b| {
            b.applied_at
                .cmp(&a.applied_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let applications = applications.iter().map(ApplicationSummary::from).collect();
        Ok(JobDetail { job, applications })
    }

    /// Public listing: conjunction of the supplied filters over active
    /// postings, newest first, sliced into a pagination envelope.
    pub fn list(&self, filter: &JobFilter) -> Result<Page<JobListing>, JobServiceError> {
        let mut jobs = self.jobs.active()?;
        search::newest_first(&mut jobs);

        let mut company_names: HashMap<UserId, Option<String>> = HashMap::new();
        let mut listings = Vec::with_capacity(jobs.len());
        for job in jobs {
            let company = match company_names.get(&job.posted_by) {
                Some(cached) => cached.clone(),
                None => {
                    let name = self
                        .companies
                        .by_owner(&job.posted_by)?
                        .map(|company| company.profile.name);
                    company_names.insert(job.posted_by.clone(), name.clone());
                    name
                }
            };
            if filter.matches(&job, company.as_deref()) {
                listings.push(JobListing { job, company });
            }
        }

        let request = PageRequest::clamped(filter.page, filter.limit, &self.search);
        Ok(search::paginate(listings, &request))
    }
}

/// Error raised by the job lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("operation denied: {0}")]
    Forbidden(DenyReason),
    #[error("job not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("job still has applications")]
    HasApplications,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
