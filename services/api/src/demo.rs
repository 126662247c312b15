use std::sync::Arc;

use clap::Args;

use crate::infra::{
    InMemoryApplicationRepository, InMemoryCompanyRepository, InMemoryJobRepository,
    InMemoryUserRepository,
};
use devboard::config::SearchConfig;
use devboard::error::AppError;
use devboard::marketplace::applications::{
    ApplicationDraft, ApplicationService, ApplicationStatus,
};
use devboard::marketplace::identity::{Identity, Role};
use devboard::marketplace::jobs::{
    ExperienceLevel, JobDraft, JobService, JobType, SalaryRange,
};
use devboard::marketplace::search::JobFilter;
use devboard::marketplace::users::{CompanyDraft, UserDraft, UserService};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Page size for the search portion of the demo.
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    /// Skip the search and pagination portion of the demo.
    #[arg(long)]
    pub(crate) skip_search: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let jobs = Arc::new(InMemoryJobRepository::default());
    let companies = Arc::new(InMemoryCompanyRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());

    let job_service = JobService::new(
        jobs.clone(),
        companies.clone(),
        applications.clone(),
        SearchConfig::default(),
    );
    let application_service = ApplicationService::new(
        applications.clone(),
        jobs.clone(),
        SearchConfig::default(),
    );
    let user_service = UserService::new(users, companies, jobs, applications);

    println!("Job marketplace demo (in-memory store)");

    let employer_account = match user_service.register(UserDraft {
        name: "Northwind Talent".to_string(),
        email: "talent@northwind.example".to_string(),
        role: Role::Employer,
        avatar: None,
    }) {
        Ok(user) => user,
        Err(err) => {
            println!("  Employer registration rejected: {err}");
            return Ok(());
        }
    };
    let developer_account = match user_service.register(UserDraft {
        name: "Dana Developer".to_string(),
        email: "dana@example.com".to_string(),
        role: Role::Developer,
        avatar: None,
    }) {
        Ok(user) => user,
        Err(err) => {
            println!("  Developer registration rejected: {err}");
            return Ok(());
        }
    };
    let employer = Identity::new(employer_account.id.0.clone(), Role::Employer);
    let developer = Identity::new(developer_account.id.0.clone(), Role::Developer);
    println!(
        "- Registered {} (employer) and {} (developer)",
        employer_account.name, developer_account.name
    );

    let company = match user_service.upsert_company(
        &employer,
        CompanyDraft {
            name: "Northwind Systems".to_string(),
            description: Some("Distributed logistics software".to_string()),
            website: Some("https://northwind.example".to_string()),
            logo: None,
        },
    ) {
        Ok(company) => company,
        Err(err) => {
            println!("  Company profile rejected: {err}");
            return Ok(());
        }
    };
    println!("- Company profile created: {}", company.profile.name);

    let remote_role = JobDraft {
        title: "Senior Backend Engineer".to_string(),
        description: "Design and operate the order routing services.".to_string(),
        requirements: vec!["5+ years building network services".to_string()],
        responsibilities: vec!["Own the routing tier".to_string()],
        salary: SalaryRange {
            min: 130_000,
            max: 170_000,
            currency: "USD".to_string(),
        },
        location: "Remote, US".to_string(),
        job_type: JobType::FullTime,
        experience: ExperienceLevel::Senior,
        skills: vec!["rust".to_string(), "kafka".to_string()],
        is_remote: true,
    };
    let onsite_role = JobDraft {
        title: "Platform Engineer (Contract)".to_string(),
        description: "Harden the deployment pipeline for the logistics fleet.".to_string(),
        requirements: vec!["Kubernetes in production".to_string()],
        responsibilities: vec!["Improve rollout safety".to_string()],
        salary: SalaryRange {
            min: 90_000,
            max: 120_000,
            currency: "USD".to_string(),
        },
        location: "Minneapolis, MN".to_string(),
        job_type: JobType::Contract,
        experience: ExperienceLevel::Mid,
        skills: vec!["kubernetes".to_string(), "terraform".to_string()],
        is_remote: false,
    };

    let posting = match job_service.create(&employer, remote_role) {
        Ok(job) => job,
        Err(err) => {
            println!("  Posting rejected: {err}");
            return Ok(());
        }
    };
    if let Err(err) = job_service.create(&employer, onsite_role) {
        println!("  Second posting rejected: {err}");
    }
    println!(
        "- Posted {} ({} .. {} {})",
        posting.spec.title, posting.spec.salary.min, posting.spec.salary.max,
        posting.spec.salary.currency
    );

    let application = match application_service.apply(
        &developer,
        &posting.id,
        ApplicationDraft {
            cover_letter: "I spent four years running order routing in Rust at scale."
                .to_string(),
            resume: "https://files.example/dana/resume.pdf".to_string(),
            portfolio: Some("https://git.example/dana".to_string()),
        },
    ) {
        Ok(application) => application,
        Err(err) => {
            println!("  Application rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Application {} received -> status {}",
        application.id.0, application.status
    );

    for target in [
        ApplicationStatus::Reviewing,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Accepted,
    ] {
        match application_service.update_status(&employer, &application.id, target) {
            Ok(updated) => println!("  Employer moved application to {}", updated.status),
            Err(err) => {
                println!("  Transition to {target} failed: {err}");
                return Ok(());
            }
        }
    }

    // Terminal verdicts lock the applicant out of withdrawal.
    match application_service.withdraw(&developer, &application.id) {
        Ok(_) => println!("  Unexpected: withdrawal succeeded after acceptance"),
        Err(err) => println!("  Withdrawal after acceptance correctly refused: {err}"),
    }

    if args.skip_search {
        return Ok(());
    }

    println!("\nSearch and pagination");
    let filter = JobFilter {
        query: Some("northwind".to_string()),
        limit: args.limit,
        ..JobFilter::default()
    };
    match job_service.list(&filter) {
        Ok(page) => {
            for listing in &page.items {
                println!(
                    "- {} @ {} ({})",
                    listing.job.spec.title,
                    listing.company.as_deref().unwrap_or("unknown company"),
                    listing.job.spec.location
                );
            }
            match serde_json::to_string_pretty(&page.pagination) {
                Ok(json) => println!("Pagination envelope:\n{json}"),
                Err(err) => println!("Pagination envelope unavailable: {err}"),
            }
        }
        Err(err) => println!("  Listing unavailable: {err}"),
    }

    Ok(())
}
