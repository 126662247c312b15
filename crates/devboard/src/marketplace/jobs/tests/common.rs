use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::config::SearchConfig;
use crate::marketplace::applications::domain::{
    Application, ApplicationForm, ApplicationId, ApplicationStatus,
};
use crate::marketplace::applications::repository::ApplicationRepository;
use crate::marketplace::identity::{AuthError, AuthService, Identity, Role, UserId};
use crate::marketplace::jobs::domain::{
    ExperienceLevel, Job, JobDraft, JobId, JobType, SalaryRange,
};
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::jobs::service::JobService;
use crate::marketplace::store::RepositoryError;
use crate::marketplace::users::domain::{Company, CompanyId, CompanyProfile};
use crate::marketplace::users::repository::CompanyRepository;

pub(super) fn employer() -> Identity {
    Identity::new("user-employer", Role::Employer)
}

pub(super) fn rival_employer() -> Identity {
    Identity::new("user-rival", Role::Employer)
}

pub(super) fn developer() -> Identity {
    Identity::new("user-developer", Role::Developer)
}

pub(super) fn admin() -> Identity {
    Identity::new("user-admin", Role::Admin)
}

pub(super) fn draft() -> JobDraft {
    JobDraft {
        title: "Backend Engineer".to_string(),
        description: "Own the ingestion pipeline end to end.".to_string(),
        requirements: vec!["3+ years of Rust".to_string()],
        responsibilities: vec!["Design and operate services".to_string()],
        salary: SalaryRange {
            min: 80_000,
            max: 120_000,
            currency: "USD".to_string(),
        },
        location: "Des Moines, IA".to_string(),
        job_type: JobType::FullTime,
        experience: ExperienceLevel::Mid,
        skills: vec!["rust".to_string(), "postgres".to_string()],
        is_remote: true,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for MemoryJobs {
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
pub(super) struct MemoryApplications {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl MemoryApplications {
    pub(super) fn count_for(&self, job: &JobId) -> usize {
        self.records
            .lock()
            .expect("application mutex poisoned")
            .values()
            .filter(|application| application.job_id == *job)
            .count()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
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
pub(super) struct MemoryCompanies {
    records: Arc<Mutex<HashMap<UserId, Company>>>,
}

impl MemoryCompanies {
    pub(super) fn seed(&self, owner: &Identity, name: &str) {
        let now = Utc::now();
        let company = Company {
            id: CompanyId(format!("company-{name}")),
            owner: owner.user_id.clone(),
            profile: CompanyProfile {
                name: name.to_string(),
                description: None,
                website: None,
                logo: None,
            },
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("company mutex poisoned")
            .insert(company.owner.clone(), company);
    }
}

impl CompanyRepository for MemoryCompanies {
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

/// Token-keyed verifier for router tests.
#[derive(Default)]
pub(super) struct StaticTokenAuth {
    tokens: Mutex<HashMap<String, Identity>>,
}

impl StaticTokenAuth {
    pub(super) fn grant(&self, token: &str, identity: Identity) {
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

pub(super) fn seed_application(
    applications: &MemoryApplications,
    id: &str,
    job: &Job,
    applicant: &Identity,
) -> Application {
    let now = Utc::now();
    let application = Application {
        id: ApplicationId(id.to_string()),
        job_id: job.id.clone(),
        applicant: applicant.user_id.clone(),
        form: ApplicationForm {
            cover_letter: "I have shipped several ingestion pipelines in Rust.".to_string(),
            resume: "https://files.example/resume.pdf".to_string(),
            portfolio: None,
        },
        status: ApplicationStatus::Pending,
        applied_at: now,
        updated_at: now,
    };
    applications.insert(application).expect("application seeds")
}

pub(super) fn build_service() -> (
    JobService<MemoryJobs, MemoryCompanies, MemoryApplications>,
    Arc<MemoryJobs>,
    Arc<MemoryCompanies>,
    Arc<MemoryApplications>,
) {
    let jobs = Arc::new(MemoryJobs::default());
    let companies = Arc::new(MemoryCompanies::default());
    let applications = Arc::new(MemoryApplications::default());
    let service = JobService::new(
        jobs.clone(),
        companies.clone(),
        applications.clone(),
        SearchConfig::default(),
    );
    (service, jobs, companies, applications)
}
