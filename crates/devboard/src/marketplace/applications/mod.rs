//! Application lifecycle: the status state machine, the
//! one-application-per-(job, applicant) invariant, and the listing
//! surfaces for applicants, employers, and admins.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDraft, ApplicationForm, ApplicationId, ApplicationStatus,
    ApplicationSummary, InvalidTransition,
};
pub use repository::ApplicationRepository;
pub use router::{application_router, ApplicationRoutes};
pub use service::{ApplicationService, ApplicationServiceError};
