//! Search and pagination engine.
//!
//! Turns open-ended query parameters into a bounded, deterministic result
//! set: a conjunction of predicates over active jobs, a stable newest-first
//! ordering, and a pagination envelope. Pages past the end are valid empty
//! results, never errors.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::marketplace::applications::domain::ApplicationStatus;
use crate::marketplace::jobs::domain::{ExperienceLevel, Job, JobType};

/// Bounded page request. Construction clamps the raw values: page is at
/// least 1, limit is clamped into `1..=max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn clamped(page: Option<u32>, limit: Option<u32>, config: &SearchConfig) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit);
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn offset(&self) -> usize {
        ((self.page - 1) as usize).saturating_mul(self.limit as usize)
    }
}

/// Envelope returned alongside every list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of results plus its envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slice a pre-sorted result set into the requested page.
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let total_pages = total.div_ceil(request.limit as u64) as u32;
    let page_items: Vec<T> = items
        .into_iter()
        .skip(request.offset())
        .take(request.limit as usize)
        .collect();

    Page {
        items: page_items,
        pagination: Pagination {
            current_page: request.page,
            total_pages,
            total,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        },
    }
}

/// Filter criteria for the public job listing.
///
/// All supplied predicates are conjunctive. `salary_min`/`salary_max` are
/// accepted for interface compatibility but deliberately never applied;
/// the original surface advertises them without filtering on them, and
/// matching that observable behavior is the point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub skills: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl JobFilter {
    /// Whether a job (with the posting company's name, if any) passes
    /// every supplied predicate.
    pub fn matches(&self, job: &Job, company_name: Option<&str>) -> bool {
        if let Some(query) = self.query.as_deref() {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty() {
                let in_title = job.spec.title.to_lowercase().contains(&needle);
                let in_description = job.spec.description.to_lowercase().contains(&needle);
                let in_company = company_name
                    .map(|name| name.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !(in_title || in_description || in_company) {
                    return false;
                }
            }
        }

        if let Some(location) = self.location.as_deref() {
            let needle = location.trim().to_lowercase();
            if !needle.is_empty() && !job.spec.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(job_type) = self.job_type {
            if job.spec.job_type != job_type {
                return false;
            }
        }

        if let Some(experience) = self.experience {
            if job.spec.experience != experience {
                return false;
            }
        }

        if let Some(skills) = self.skills.as_deref() {
            let requested: Vec<String> = skills
                .iter()
                .map(|skill| skill.trim().to_lowercase())
                .filter(|skill| !skill.is_empty())
                .collect();
            if !requested.is_empty() {
                let held: Vec<String> = job
                    .spec
                    .skills
                    .iter()
                    .map(|skill| skill.to_lowercase())
                    .collect();
                if !requested.iter().any(|skill| held.contains(skill)) {
                    return false;
                }
            }
        }

        if let Some(is_remote) = self.is_remote {
            if job.spec.is_remote != is_remote {
                return false;
            }
        }

        true
    }
}

/// Optional narrowing for application listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Stable newest-first ordering: `created_at` descending, ties broken by
/// id descending so the sort is total.
pub fn newest_first(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
