use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::identity::UserId;
use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::validate::{bounded_text, ValidationError};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Lifecycle status of an application.
///
/// `Accepted`, `Rejected`, and `Withdrawn` are terminal; the employer
/// drives the pipeline states and only the applicant can withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interviewing,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Withdrawn,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Interviewing => "INTERVIEWING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted
                | ApplicationStatus::Rejected
                | ApplicationStatus::Withdrawn
        )
    }

    /// Target states the owning employer may move this status to.
    /// `Reviewing -> Reviewing` is an allowed idempotent no-op.
    pub const fn employer_targets(self) -> &'static [ApplicationStatus] {
        match self {
            ApplicationStatus::Pending => &[
                ApplicationStatus::Reviewing,
                ApplicationStatus::Accepted,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::Reviewing => &[
                ApplicationStatus::Reviewing,
                ApplicationStatus::Interviewing,
                ApplicationStatus::Accepted,
                ApplicationStatus::Rejected,
            ],
            ApplicationStatus::Interviewing => {
                &[ApplicationStatus::Accepted, ApplicationStatus::Rejected]
            }
            ApplicationStatus::Accepted
            | ApplicationStatus::Rejected
            | ApplicationStatus::Withdrawn => &[],
        }
    }

    pub fn employer_can_move_to(self, target: ApplicationStatus) -> bool {
        self.employer_targets().contains(&target)
    }

    /// Whether the applicant may still withdraw from this state.
    pub const fn applicant_can_withdraw(self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A state-machine rule violation: `to` is not reachable from `from` for
/// the acting party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move application from {from} to {to}")]
pub struct InvalidTransition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// Raw application payload as submitted by a developer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub cover_letter: String,
    pub resume: String,
    #[serde(default)]
    pub portfolio: Option<String>,
}

/// Validated application content. The resume and portfolio references are
/// opaque URLs stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationForm {
    pub cover_letter: String,
    pub resume: String,
    pub portfolio: Option<String>,
}

impl ApplicationForm {
    pub fn parse(draft: ApplicationDraft) -> Result<Self, ValidationError> {
        let cover_letter = bounded_text("cover_letter", &draft.cover_letter, 20, 2000)?;
        let resume = bounded_text("resume", &draft.resume, 1, 500)?;
        let portfolio = draft
            .portfolio
            .as_deref()
            .map(|value| bounded_text("portfolio", value, 1, 500))
            .transpose()?;
        Ok(Self {
            cover_letter,
            resume,
            portfolio,
        })
    }
}

/// A stored claim by one developer on one job. The `(job_id, applicant)`
/// pair is unique for the lifetime of the record, withdrawal included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant: UserId,
    pub form: ApplicationForm,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact per-application view nested under a job detail response.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummary {
    pub id: ApplicationId,
    pub applicant: UserId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationSummary {
    fn from(application: &Application) -> Self {
        Self {
            id: application.id.clone(),
            applicant: application.applicant.clone(),
            status: application.status,
            applied_at: application.applied_at,
        }
    }
}
