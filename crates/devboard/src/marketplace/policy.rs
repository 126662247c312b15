//! Authorization policy: the single place ownership and role rules live.
//!
//! Every mutating operation in the lifecycle services routes through one
//! of these pure decision functions instead of re-deriving role checks
//! inline. Each denial carries a machine-readable reason so the transport
//! can distinguish 401/403 from 400/409 responses.

use crate::marketplace::applications::domain::{Application, ApplicationStatus};
use crate::marketplace::identity::{Identity, Role};
use crate::marketplace::jobs::domain::Job;

/// Machine-readable denial causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DenyReason {
    #[error("request is not authenticated")]
    NotAuthenticated,
    #[error("role is not permitted to perform this operation")]
    WrongRole,
    #[error("caller does not own the target record")]
    NotOwner,
    #[error("an application for this job already exists")]
    AlreadyApplied,
    #[error("job is not accepting applications")]
    JobInactive,
    #[error("application is in a terminal state")]
    TerminalState,
}

pub type Decision = Result<(), DenyReason>;

/// Only employers may post jobs.
pub fn can_create_job(identity: &Identity) -> Decision {
    match identity.role {
        Role::Employer => Ok(()),
        _ => Err(DenyReason::WrongRole),
    }
}

/// Mutation, deletion, and activation-toggle of a posting: the owning
/// employer, or an admin.
pub fn can_mutate_job(identity: &Identity, job: &Job) -> Decision {
    match identity.role {
        Role::Admin => Ok(()),
        Role::Employer if job.posted_by == identity.user_id => Ok(()),
        Role::Employer => Err(DenyReason::NotOwner),
        Role::Developer => Err(DenyReason::WrongRole),
    }
}

/// Viewing a job's applications is owner-only; admins go through the
/// separate unrestricted listing instead.
pub fn can_view_job_applications(identity: &Identity, job: &Job) -> Decision {
    if job.posted_by == identity.user_id {
        Ok(())
    } else {
        Err(DenyReason::NotOwner)
    }
}

/// Applying requires a developer, an active job, and a free
/// `(job, applicant)` slot.
pub fn can_apply(identity: &Identity, job: &Job, already_applied: bool) -> Decision {
    if identity.role != Role::Developer {
        return Err(DenyReason::WrongRole);
    }
    if !job.is_active {
        return Err(DenyReason::JobInactive);
    }
    if already_applied {
        return Err(DenyReason::AlreadyApplied);
    }
    Ok(())
}

/// Status mutation belongs to the employer owning the referenced job.
pub fn can_mutate_application(identity: &Identity, job: &Job) -> Decision {
    match identity.role {
        Role::Employer if job.posted_by == identity.user_id => Ok(()),
        Role::Employer => Err(DenyReason::NotOwner),
        _ => Err(DenyReason::WrongRole),
    }
}

/// Withdrawal belongs to the applicant, and is locked once the employer
/// reached a terminal verdict.
pub fn can_withdraw(identity: &Identity, application: &Application) -> Decision {
    if identity.role != Role::Developer {
        return Err(DenyReason::WrongRole);
    }
    if application.applicant != identity.user_id {
        return Err(DenyReason::NotOwner);
    }
    if matches!(
        application.status,
        ApplicationStatus::Accepted | ApplicationStatus::Rejected
    ) {
        return Err(DenyReason::TerminalState);
    }
    Ok(())
}
