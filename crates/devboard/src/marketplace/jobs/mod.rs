//! Job posting lifecycle: validated postings, ownership-gated mutation,
//! and the public search listing.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ExperienceLevel, Job, JobDraft, JobId, JobPatch, JobSpec, JobType, SalaryRange,
};
pub use repository::JobRepository;
pub use router::{job_router, JobRoutes};
pub use service::{JobDetail, JobListing, JobService, JobServiceError};
