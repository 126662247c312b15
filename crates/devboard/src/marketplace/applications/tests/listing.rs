use chrono::{Duration, Utc};

use super::common::*;
use crate::marketplace::applications::domain::ApplicationStatus;
use crate::marketplace::applications::service::ApplicationServiceError;
use crate::marketplace::identity::{Identity, Role};
use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::policy::DenyReason;
use crate::marketplace::search::ApplicationFilter;

#[test]
fn list_mine_returns_only_own_records_newest_first() {
    let (service, applications, jobs) = build_service();
    let job = seed_job(&jobs, "job-A", &employer(), true);
    let other_job = seed_job(&jobs, "job-B", &employer(), true);
    let applicant = developer();
    let stranger = rival_developer();

    let base = Utc::now();
    seed_application(
        &applications,
        "app-old",
        &job,
        &applicant,
        ApplicationStatus::Pending,
        base - Duration::hours(2),
    );
    seed_application(
        &applications,
        "app-new",
        &other_job,
        &applicant,
        ApplicationStatus::Reviewing,
        base,
    );
    seed_application(
        &applications,
        "app-foreign",
        &job,
        &stranger,
        ApplicationStatus::Pending,
        base,
    );

    let page = service
        .list_mine(&applicant, &ApplicationFilter::default())
        .expect("listing succeeds");
    let ids: Vec<&str> = page.items.iter().map(|item| item.id.0.as_str()).collect();
    assert_eq!(ids, vec!["app-new", "app-old"]);
    assert_eq!(page.pagination.total, 2);
}

#[test]
fn list_mine_is_empty_for_non_developers() {
    let (service, applications, jobs) = build_service();
    let job = seed_job(&jobs, "job-A", &employer(), true);
    seed_application(
        &applications,
        "app-A",
        &job,
        &developer(),
        ApplicationStatus::Pending,
        Utc::now(),
    );

    let page = service
        .list_mine(&employer(), &ApplicationFilter::default())
        .expect("listing succeeds");
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total, 0);
}

#[test]
fn status_filter_narrows_listings() {
    let (service, applications, jobs) = build_service();
    let job = seed_job(&jobs, "job-A", &employer(), true);
    let other_job = seed_job(&jobs, "job-B", &employer(), true);
    let applicant = developer();

    seed_application(
        &applications,
        "app-pending",
        &job,
        &applicant,
        ApplicationStatus::Pending,
        Utc::now(),
    );
    seed_application(
        &applications,
        "app-withdrawn",
        &other_job,
        &applicant,
        ApplicationStatus::Withdrawn,
        Utc::now(),
    );

    let filter = ApplicationFilter {
        status: Some(ApplicationStatus::Withdrawn),
        ..ApplicationFilter::default()
    };
    let page = service
        .list_mine(&applicant, &filter)
        .expect("listing succeeds");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id.0, "app-withdrawn");
}

#[test]
fn job_listing_is_owner_only() {
    let (service, applications, jobs) = build_service();
    let job = seed_job(&jobs, "job-A", &employer(), true);
    seed_application(
        &applications,
        "app-A",
        &job,
        &developer(),
        ApplicationStatus::Pending,
        Utc::now(),
    );

    let page = service
        .list_for_job(&employer(), &job.id, &ApplicationFilter::default())
        .expect("owner may list");
    assert_eq!(page.items.len(), 1);

    match service.list_for_job(&rival_employer(), &job.id, &ApplicationFilter::default()) {
        Err(ApplicationServiceError::Forbidden(DenyReason::NotOwner)) => {}
        other => panic!("expected ownership denial, got {other:?}"),
    }

    // The owner-only rule has no admin bypass on this surface.
    match service.list_for_job(&admin(), &job.id, &ApplicationFilter::default()) {
        Err(ApplicationServiceError::Forbidden(DenyReason::NotOwner)) => {}
        other => panic!("expected ownership denial for admin, got {other:?}"),
    }
}

#[test]
fn job_listing_for_missing_job_is_not_found() {
    let (service, _, _) = build_service();
    match service.list_for_job(
        &employer(),
        &JobId("job-missing".to_string()),
        &ApplicationFilter::default(),
    ) {
        Err(ApplicationServiceError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn employer_listing_spans_all_owned_jobs() {
    let (service, applications, jobs) = build_service();
    let owner = employer();
    let job_a = seed_job(&jobs, "job-A", &owner, true);
    let job_b = seed_job(&jobs, "job-B", &owner, true);
    let foreign = seed_job(&jobs, "job-C", &rival_employer(), true);

    let base = Utc::now();
    seed_application(
        &applications,
        "app-1",
        &job_a,
        &developer(),
        ApplicationStatus::Pending,
        base - Duration::minutes(5),
    );
    seed_application(
        &applications,
        "app-2",
        &job_b,
        &rival_developer(),
        ApplicationStatus::Reviewing,
        base,
    );
    seed_application(
        &applications,
        "app-3",
        &foreign,
        &developer(),
        ApplicationStatus::Pending,
        base,
    );

    let page = service
        .list_for_employer(&owner, &ApplicationFilter::default())
        .expect("listing succeeds");
    let ids: Vec<&str> = page.items.iter().map(|item| item.id.0.as_str()).collect();
    assert_eq!(ids, vec!["app-2", "app-1"]);
}

#[test]
fn admin_wide_listing_requires_admin_role() {
    let (service, applications, jobs) = build_service();
    let job = seed_job(&jobs, "job-A", &employer(), true);
    seed_application(
        &applications,
        "app-A",
        &job,
        &developer(),
        ApplicationStatus::Pending,
        Utc::now(),
    );

    let page = service
        .list_all(&admin(), &ApplicationFilter::default())
        .expect("admin may list everything");
    assert_eq!(page.pagination.total, 1);

    match service.list_all(&employer(), &ApplicationFilter::default()) {
        Err(ApplicationServiceError::Forbidden(DenyReason::WrongRole)) => {}
        other => panic!("expected role denial, got {other:?}"),
    }
}

#[test]
fn listing_pagination_slices_and_reports_totals() {
    let (service, applications, jobs) = build_service();
    let owner = employer();
    let job = seed_job(&jobs, "job-A", &owner, true);

    let base = Utc::now();
    for index in 0..7 {
        let applicant = Identity::new(format!("user-dev-{index}"), Role::Developer);
        seed_application(
            &applications,
            &format!("app-{index}"),
            &job,
            &applicant,
            ApplicationStatus::Pending,
            base - Duration::minutes(index),
        );
    }

    let filter = ApplicationFilter {
        page: Some(2),
        limit: Some(3),
        ..ApplicationFilter::default()
    };
    let page = service
        .list_for_job(&owner, &job.id, &filter)
        .expect("listing succeeds");
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.pagination.total, 7);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next_page);
    assert!(page.pagination.has_prev_page);
    // Newest first: page 2 of limit 3 holds the fourth through sixth.
    let ids: Vec<&str> = page.items.iter().map(|item| item.id.0.as_str()).collect();
    assert_eq!(ids, vec!["app-3", "app-4", "app-5"]);
}
