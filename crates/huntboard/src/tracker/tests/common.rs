use std::sync::Arc;

use axum::Router;
use chrono::{Duration, Utc};

use crate::tracker::badges::install_catalog;
use crate::tracker::domain::{
    BadgeCategory, BadgeSpec, JobId, NewJob, NewQuestionAnswer, NewUser, QuestionId, SourceId,
    User, UserId,
};
use crate::tracker::router::{tracker_router, TrackerState};
use crate::tracker::store::{MemoryStore, TrackerStore};

pub(super) fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub(super) fn register(store: &MemoryStore, username: &str) -> User {
    store
        .create_user(NewUser {
            username: username.to_string(),
            password: "hunter2".to_string(),
            preferred_field: Some("frontend".to_string()),
        })
        .expect("username is free")
}

pub(super) fn listing(source_id: SourceId, title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Initech".to_string(),
        location: "Remote".to_string(),
        job_type: "Full-time".to_string(),
        description: "Entry-level role".to_string(),
        posted_date: Utc::now() - Duration::days(1),
        url: "https://jobs.example.com/1".to_string(),
        source_id,
        is_easy_apply: false,
        is_fresher: false,
        is_internship: false,
    }
}

pub(super) fn catalog_specs() -> Vec<BadgeSpec> {
    vec![
        BadgeSpec {
            name: "7-Day Streak".to_string(),
            description: "Answered questions for 7 consecutive days".to_string(),
            icon: "fire".to_string(),
            required_score: 7,
            category: BadgeCategory::Streak,
        },
        BadgeSpec {
            name: "Top Contributor".to_string(),
            description: "Provided valuable answers that received many upvotes".to_string(),
            icon: "star".to_string(),
            required_score: 10,
            category: BadgeCategory::Contribution,
        },
        BadgeSpec {
            name: "Problem Solver".to_string(),
            description: "Answered complex technical questions correctly".to_string(),
            icon: "award".to_string(),
            required_score: 5,
            category: BadgeCategory::ProblemSolving,
        },
    ]
}

pub(super) fn install_default_catalog(store: &MemoryStore) {
    install_catalog(store, catalog_specs()).expect("catalog has unique categories");
}

pub(super) fn submit_answers(
    store: &MemoryStore,
    user_id: UserId,
    question_id: QuestionId,
    count: usize,
) {
    for n in 0..count {
        store.create_answer(NewQuestionAnswer {
            question_id,
            user_id,
            answer: format!("answer {n}"),
            created_at: Utc::now(),
        });
    }
}

pub(super) fn seed_job(store: &MemoryStore, owner: UserId, title: &str) -> JobId {
    let source = store.create_source(crate::tracker::domain::NewJobSource {
        user_id: owner,
        url: "https://jobs.example.com".to_string(),
        name: "Example".to_string(),
    });
    store.create_job(listing(source.id, title)).id
}

pub(super) fn app(store: Arc<MemoryStore>) -> Router {
    tracker_router(Arc::new(TrackerState::new(store)))
}
