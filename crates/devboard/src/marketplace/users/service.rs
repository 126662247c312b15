use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::marketplace::applications::repository::ApplicationRepository;
use crate::marketplace::identity::{Identity, Role, UserId};
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::policy::DenyReason;
use crate::marketplace::store::RepositoryError;
use crate::marketplace::validate::ValidationError;

use super::domain::{Company, CompanyDraft, CompanyId, CompanyProfile, User, UserDraft, UserProfile};
use super::repository::{CompanyRepository, UserRepository};

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COMPANY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:06}"))
}

fn next_company_id() -> CompanyId {
    let id = COMPANY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CompanyId(format!("company-{id:06}"))
}

/// Service owning account records and the employer's company profile.
/// Credential handling stays with the external auth collaborator; this
/// only covers the record side of registration, the admin role change,
/// the guarded deletion, and the lazy company upsert.
pub struct UserService<U, C, J, A> {
    users: Arc<U>,
    companies: Arc<C>,
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<U, C, J, A> UserService<U, C, J, A>
where
    U: UserRepository + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(users: Arc<U>, companies: Arc<C>, jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self {
            users,
            companies,
            jobs,
            applications,
        }
    }

    /// Create the account record for a new registration.
    pub fn register(&self, draft: UserDraft) -> Result<User, UserServiceError> {
        let profile = UserProfile::parse(draft)?;
        let user = User {
            id: next_user_id(),
            name: profile.name,
            email: profile.email,
            role: profile.role,
            avatar: profile.avatar,
            created_at: Utc::now(),
        };
        let stored = self.users.insert(user)?;
        Ok(stored)
    }

    /// Admin-only role mutation.
    pub fn change_role(
        &self,
        identity: &Identity,
        id: &UserId,
        role: Role,
    ) -> Result<User, UserServiceError> {
        if identity.role != Role::Admin {
            return Err(UserServiceError::Forbidden(DenyReason::WrongRole));
        }
        let mut user = self.users.fetch(id)?.ok_or(UserServiceError::NotFound)?;
        user.role = role;
        self.users.update(user.clone())?;
        Ok(user)
    }

    /// Delete an account. Permitted to the account holder and to admins,
    /// and blocked while the account still owns jobs or applications.
    pub fn delete(&self, identity: &Identity, id: &UserId) -> Result<(), UserServiceError> {
        if identity.role != Role::Admin && identity.user_id != *id {
            return Err(UserServiceError::Forbidden(DenyReason::NotOwner));
        }
        if self.users.fetch(id)?.is_none() {
            return Err(UserServiceError::NotFound);
        }

        if !self.jobs.by_owner(id)?.is_empty() || !self.applications.by_applicant(id)?.is_empty() {
            return Err(UserServiceError::HasDependents);
        }

        self.users.delete(id)?;
        Ok(())
    }

    /// Write the caller's company profile, creating it on first write.
    pub fn upsert_company(
        &self,
        identity: &Identity,
        draft: CompanyDraft,
    ) -> Result<Company, UserServiceError> {
        if identity.role != Role::Employer {
            return Err(UserServiceError::Forbidden(DenyReason::WrongRole));
        }
        let profile = CompanyProfile::parse(draft)?;
        let now = Utc::now();

        match self.companies.by_owner(&identity.user_id)? {
            Some(mut company) => {
                company.profile = profile;
                company.updated_at = now;
                self.companies.update(company.clone())?;
                Ok(company)
            }
            None => {
                let company = Company {
                    id: next_company_id(),
                    owner: identity.user_id.clone(),
                    profile,
                    created_at: now,
                    updated_at: now,
                };
                let stored = self.companies.insert(company)?;
                Ok(stored)
            }
        }
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("operation denied: {0}")]
    Forbidden(DenyReason),
    #[error("user not found")]
    NotFound,
    #[error("user still owns jobs or applications")]
    HasDependents,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
