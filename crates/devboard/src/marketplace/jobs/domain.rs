use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::identity::UserId;
use crate::marketplace::validate::{
    bounded_list, bounded_text, currency_code, ValidationError,
};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Employment arrangement advertised by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
        }
    }
}

/// Seniority band a posting targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "ENTRY",
            ExperienceLevel::Junior => "JUNIOR",
            ExperienceLevel::Mid => "MID",
            ExperienceLevel::Senior => "SENIOR",
            ExperienceLevel::Lead => "LEAD",
        }
    }
}

/// Structured salary band. Amounts are non-negative by construction; the
/// `min <= max` invariant is checked when the owning spec is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

/// Raw posting payload as submitted by an employer, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub salary: SalaryRange,
    pub location: String,
    pub job_type: JobType,
    pub experience: ExperienceLevel,
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_remote: bool,
}

/// Validated posting content. Only constructable through [`JobSpec::parse`],
/// so every held value satisfies the documented bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub salary: SalaryRange,
    pub location: String,
    pub job_type: JobType,
    pub experience: ExperienceLevel,
    pub skills: Vec<String>,
    pub is_remote: bool,
}

impl JobSpec {
    /// Validate a raw draft into a spec, normalizing text fields.
    pub fn parse(draft: JobDraft) -> Result<Self, ValidationError> {
        let title = bounded_text("title", &draft.title, 3, 100)?;
        let description = bounded_text("description", &draft.description, 10, 5000)?;
        let location = bounded_text("location", &draft.location, 2, 100)?;
        let requirements = bounded_list("requirements", &draft.requirements, 0, 20, 200)?;
        let responsibilities =
            bounded_list("responsibilities", &draft.responsibilities, 0, 20, 200)?;
        let skills = bounded_list("skills", &draft.skills, 1, 20, 50)?;

        if draft.salary.min > draft.salary.max {
            return Err(ValidationError::SalaryRangeInverted {
                min: draft.salary.min,
                max: draft.salary.max,
            });
        }
        let salary = SalaryRange {
            min: draft.salary.min,
            max: draft.salary.max,
            currency: currency_code(&draft.salary.currency)?,
        };

        Ok(Self {
            title,
            description,
            requirements,
            responsibilities,
            salary,
            location,
            job_type: draft.job_type,
            experience: draft.experience,
            skills,
            is_remote: draft.is_remote,
        })
    }

    /// Rebuild the raw draft form, used when merging a patch.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            responsibilities: self.responsibilities.clone(),
            salary: self.salary.clone(),
            location: self.location.clone(),
            job_type: self.job_type,
            experience: self.experience,
            skills: self.skills.clone(),
            is_remote: self.is_remote,
        }
    }
}

/// Partial update to a posting; absent fields keep their current values.
/// The merged result is revalidated in full before persisting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub salary: Option<SalaryRange>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub skills: Option<Vec<String>>,
    pub is_remote: Option<bool>,
}

impl JobPatch {
    pub fn merge_into(self, spec: &JobSpec) -> JobDraft {
        let mut draft = spec.to_draft();
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(requirements) = self.requirements {
            draft.requirements = requirements;
        }
        if let Some(responsibilities) = self.responsibilities {
            draft.responsibilities = responsibilities;
        }
        if let Some(salary) = self.salary {
            draft.salary = salary;
        }
        if let Some(location) = self.location {
            draft.location = location;
        }
        if let Some(job_type) = self.job_type {
            draft.job_type = job_type;
        }
        if let Some(experience) = self.experience {
            draft.experience = experience;
        }
        if let Some(skills) = self.skills {
            draft.skills = skills;
        }
        if let Some(is_remote) = self.is_remote {
            draft.is_remote = is_remote;
        }
        draft
    }
}

/// A stored posting: validated content plus ownership and visibility
/// metadata stamped by the lifecycle service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub spec: JobSpec,
    pub posted_by: UserId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
