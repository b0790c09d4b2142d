use super::common::*;

use crate::tracker::accounts::AccountService;
use crate::tracker::boards::{BoardService, JobQuery};
use crate::tracker::store::{TrackerError, TrackerStore};

#[test]
fn adding_a_source_derives_its_name_and_syncs_immediately() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store.clone());

    let source = service
        .add_source(user.id, "https://www.linkedin.com/jobs")
        .expect("valid URL");

    assert_eq!(source.name, "Linkedin");
    assert!(source.last_synced.is_some());
    let jobs = store.jobs();
    assert!(!jobs.is_empty());
    assert!(jobs.iter().all(|job| job.source_id == source.id));
}

#[test]
fn blank_source_urls_are_rejected() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store.clone());

    let err = service.add_source(user.id, "   ").expect_err("blank URL");

    assert!(matches!(err, TrackerError::Validation(_)));
    assert!(store.sources_for_user(user.id).is_empty());
}

#[test]
fn resyncing_appends_fresh_listings() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store.clone());
    let source = service
        .add_source(user.id, "https://indeed.com")
        .expect("valid URL");
    let after_first_sync = store.jobs().len();

    let outcome = service.sync_source(source.id).expect("source exists");

    assert_eq!(outcome.jobs_count, after_first_sync);
    assert_eq!(store.jobs().len(), after_first_sync * 2);
}

#[test]
fn syncing_a_missing_source_is_not_found() {
    let store = store();
    let service = BoardService::new(store);

    let err = service.sync_source(7).expect_err("no such source");
    assert!(matches!(err, TrackerError::NotFound("job source")));
}

#[test]
fn deleting_a_source_removes_its_jobs() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store.clone());
    let kept = service
        .add_source(user.id, "https://glassdoor.com")
        .expect("valid URL");
    let doomed = service
        .add_source(user.id, "https://indeed.com")
        .expect("valid URL");

    service.delete_source(doomed.id).expect("source exists");

    assert!(store.source(doomed.id).is_none());
    let jobs = store.jobs();
    assert!(!jobs.is_empty());
    assert!(jobs.iter().all(|job| job.source_id == kept.id));
}

#[test]
fn job_listing_honors_the_fresher_and_internship_filters() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store);
    service
        .add_source(user.id, "https://linkedin.com/jobs")
        .expect("valid URL");

    let internships = service.jobs(Some("internships"));
    assert!(!internships.is_empty());
    assert!(internships.iter().all(|job| job.is_internship));

    let freshers = service.jobs(Some("freshers"));
    assert!(freshers.iter().all(|job| job.is_fresher));
    assert!(freshers.len() >= internships.len());
}

#[test]
fn search_matches_title_company_and_description() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store);
    service
        .add_source(user.id, "https://linkedin.com/jobs")
        .expect("valid URL");

    let page = service
        .search(JobQuery {
            query: Some("react".to_string()),
            page: 1,
            ..Default::default()
        })
        .expect("valid page");

    assert!(page.total >= 1);
    assert!(page.jobs.iter().any(|job| job
        .title
        .to_lowercase()
        .contains("react")
        || job.description.to_lowercase().contains("react")));
}

#[test]
fn search_narrows_by_location() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store);
    service
        .add_source(user.id, "https://indeed.com")
        .expect("valid URL");

    let page = service
        .search(JobQuery {
            location: Some("pune".to_string()),
            page: 1,
            ..Default::default()
        })
        .expect("valid page");

    assert!(!page.jobs.is_empty());
    assert!(page
        .jobs
        .iter()
        .all(|job| job.location.to_lowercase().contains("pune")));
}

#[test]
fn search_paginates_newest_first() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store.clone());
    // Three boards yield eleven fixture listings, one more than a page.
    for url in [
        "https://linkedin.com/jobs",
        "https://indeed.com",
        "https://glassdoor.com",
    ] {
        service.add_source(user.id, url).expect("valid URL");
    }
    let total = store.jobs().len();
    assert!(total > 10);

    let first = service
        .search(JobQuery {
            page: 1,
            ..Default::default()
        })
        .expect("valid page");
    assert_eq!(first.jobs.len(), 10);
    assert_eq!(first.total, total);
    assert_eq!(first.pages, total.div_ceil(10));
    assert!(first
        .jobs
        .windows(2)
        .all(|pair| pair[0].posted_date >= pair[1].posted_date));

    let last = service
        .search(JobQuery {
            page: first.pages,
            ..Default::default()
        })
        .expect("valid page");
    assert_eq!(last.jobs.len(), total - 10 * (first.pages - 1));

    let beyond = service
        .search(JobQuery {
            page: first.pages + 1,
            ..Default::default()
        })
        .expect("valid page");
    assert!(beyond.jobs.is_empty());
    assert_eq!(beyond.total, total);
}

#[test]
fn a_huge_page_number_returns_an_empty_page() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store);
    service
        .add_source(user.id, "https://linkedin.com/jobs")
        .expect("valid URL");

    let page = service
        .search(JobQuery {
            page: usize::MAX,
            ..Default::default()
        })
        .expect("valid page");

    assert!(page.jobs.is_empty());
    assert_eq!(page.page, usize::MAX);
    assert!(page.total > 0);
}

#[test]
fn match_score_is_the_resume_coverage_of_the_listing() {
    let store = store();
    let user = register(&store, "hunter");
    // Listing text mentions two dictionary skills, react and typescript.
    let job_id = seed_job(&store, user.id, "React TypeScript Developer");
    let service = BoardService::new(store.clone());

    AccountService::new(store.clone())
        .update_resume(user.id, "Shipped React apps for three years".to_string())
        .expect("non-empty resume");

    let score = service.match_score(user.id, job_id).expect("both exist");
    assert_eq!(score, 50);
}

#[test]
fn match_score_without_a_resume_is_zero() {
    let store = store();
    let user = register(&store, "hunter");
    let job_id = seed_job(&store, user.id, "React TypeScript Developer");
    let service = BoardService::new(store);

    let score = service.match_score(user.id, job_id).expect("both exist");
    assert_eq!(score, 0);
}

#[test]
fn match_score_against_a_missing_job_is_not_found() {
    let store = store();
    let user = register(&store, "hunter");
    let service = BoardService::new(store);

    let err = service.match_score(user.id, 99_999).expect_err("no such job");
    assert!(matches!(err, TrackerError::NotFound("job")));
}

#[test]
fn page_zero_is_rejected() {
    let store = store();
    let service = BoardService::new(store);

    let err = service
        .search(JobQuery {
            page: 0,
            ..Default::default()
        })
        .expect_err("pages start at one");
    assert!(matches!(err, TrackerError::Validation(_)));
}

#[test]
fn saved_jobs_round_trip() {
    let store = store();
    let user = register(&store, "hunter");
    let job_id = seed_job(&store, user.id, "Platform Engineer");
    let service = BoardService::new(store);

    service.save_job(user.id, job_id).expect("job exists");
    // Saving twice keeps a single entry.
    service.save_job(user.id, job_id).expect("job exists");

    let saved = service.saved_jobs(user.id);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, job_id);

    let err = service.save_job(user.id, 99_999).expect_err("no such job");
    assert!(matches!(err, TrackerError::NotFound("job")));
}
