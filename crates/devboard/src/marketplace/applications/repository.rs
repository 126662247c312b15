use crate::marketplace::identity::UserId;
use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::store::RepositoryError;

use super::domain::{Application, ApplicationId};

/// Storage abstraction for applications. `for_pair` backs the
/// one-application-per-(job, applicant) invariant; `delete_for_job` backs
/// the owner-delete cascade.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn by_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError>;
    fn by_applicant(&self, applicant: &UserId) -> Result<Vec<Application>, RepositoryError>;
    fn for_pair(
        &self,
        job: &JobId,
        applicant: &UserId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn delete_for_job(&self, job: &JobId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<Application>, RepositoryError>;
}
