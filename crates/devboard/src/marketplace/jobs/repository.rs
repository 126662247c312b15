use crate::marketplace::identity::UserId;
use crate::marketplace::store::RepositoryError;

use super::domain::{Job, JobId};

/// Storage abstraction for postings so the lifecycle service can be
/// exercised against any backing store.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update(&self, job: Job) -> Result<(), RepositoryError>;
    fn delete(&self, id: &JobId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn by_owner(&self, owner: &UserId) -> Result<Vec<Job>, RepositoryError>;
    /// All postings currently visible to the public listing.
    fn active(&self) -> Result<Vec<Job>, RepositoryError>;
}
