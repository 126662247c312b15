//! Accounts and company profiles: registration records, the admin role
//! change, guarded deletion, and the employer's lazy company upsert.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Company, CompanyDraft, CompanyId, CompanyProfile, User, UserDraft};
pub use repository::{CompanyRepository, UserRepository};
pub use router::{user_router, UserRoutes};
pub use service::{UserService, UserServiceError};
