use crate::marketplace::identity::UserId;
use crate::marketplace::store::RepositoryError;

use super::domain::{Company, User};

/// Storage abstraction for accounts.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
}

/// Storage abstraction for company profiles; ownership is 1:1, so lookup
/// is keyed by the owning employer.
pub trait CompanyRepository: Send + Sync {
    fn insert(&self, company: Company) -> Result<Company, RepositoryError>;
    fn update(&self, company: Company) -> Result<(), RepositoryError>;
    fn by_owner(&self, owner: &UserId) -> Result<Option<Company>, RepositoryError>;
}
