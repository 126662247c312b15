//! In-process stand-ins for the external collaborators: an in-memory
//! record store behind the repository traits, and a static-token verifier
//! behind the auth boundary.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use devboard::marketplace::applications::{Application, ApplicationId, ApplicationRepository};
use devboard::marketplace::identity::{AuthError, AuthService, Identity, UserId};
use devboard::marketplace::jobs::{Job, JobId, JobRepository};
use devboard::marketplace::store::RepositoryError;
use devboard::marketplace::users::{Company, CompanyRepository, User, UserRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: Job) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_owner(&self, owner: &UserId) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| job.posted_by == *owner)
            .cloned()
            .collect())
    }

    fn active(&self) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.values().filter(|job| job.is_active).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        // The (job, applicant) pair is unique at the store level too, so a
        // concurrent duplicate cannot slip past the service pre-check.
        let duplicate = guard.contains_key(&application.id)
            || guard.values().any(|existing| {
                existing.job_id == application.job_id
                    && existing.applicant == application.applicant
            });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            guard.insert(application.id.clone(), application);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.job_id == *job)
            .cloned()
            .collect())
    }

    fn by_applicant(&self, applicant: &UserId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.applicant == *applicant)
            .cloned()
            .collect())
    }

    fn for_pair(
        &self,
        job: &JobId,
        applicant: &UserId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .find(|application| {
                application.job_id == *job && application.applicant == *applicant
            })
            .cloned())
    }

    fn delete_for_job(&self, job: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        guard.retain(|_, application| application.job_id != *job);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            guard.insert(user.id.clone(), user);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("user mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.records.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompanyRepository {
    records: Arc<Mutex<HashMap<UserId, Company>>>,
}

impl CompanyRepository for InMemoryCompanyRepository {
    fn insert(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        if guard.contains_key(&company.owner) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(company.owner.clone(), company.clone());
        Ok(company)
    }

    fn update(&self, company: Company) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("company mutex poisoned");
        if guard.contains_key(&company.owner) {
            guard.insert(company.owner.clone(), company);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn by_owner(&self, owner: &UserId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.records.lock().expect("company mutex poisoned");
        Ok(guard.get(owner).cloned())
    }
}

/// Static bearer-token verifier. Tokens are provisioned at startup; a real
/// deployment swaps this for the production auth collaborator.
#[derive(Default)]
pub(crate) struct StaticTokenAuth {
    tokens: Mutex<HashMap<String, Identity>>,
}

impl StaticTokenAuth {
    pub(crate) fn grant(&self, token: &str, identity: Identity) {
        self.tokens
            .lock()
            .expect("token mutex poisoned")
            .insert(token.to_string(), identity);
    }
}

impl AuthService for StaticTokenAuth {
    fn verify(&self, credential: &str) -> Result<Identity, AuthError> {
        self.tokens
            .lock()
            .expect("token mutex poisoned")
            .get(credential)
            .cloned()
            .ok_or(AuthError::InvalidCredential)
    }
}
