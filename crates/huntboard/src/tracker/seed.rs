use chrono::{Duration, Utc};
use tracing::info;

use super::badges;
use super::domain::{
    ApplicationStatus, BadgeCategory, BadgeSpec, NewApplication, NewInterviewQuestion, NewJob,
    NewJobSource, NewUser, User,
};
use super::store::{TrackerError, TrackerStore};

/// Seed the demo fixture set: one user, the three-badge catalog, a
/// handful of practice questions, three boards, a few listings, and
/// two in-flight applications. Mirrors the data a fresh deployment
/// ships with so the UI has something to show.
pub fn demo_data<S>(store: &S) -> Result<User, TrackerError>
where
    S: TrackerStore,
{
    let user = store.create_user(NewUser {
        username: "demo_user".to_string(),
        password: "password".to_string(),
        preferred_field: Some("frontend".to_string()),
    })?;

    badges::install_catalog(
        store,
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
        ],
    )?;

    let questions = [
        (
            "What is the difference between localStorage and sessionStorage?",
            "frontend",
            "medium",
            true,
        ),
        ("Explain how promises work in JavaScript.", "frontend", "hard", false),
        (
            "What are React hooks and how do they improve component code?",
            "frontend",
            "medium",
            false,
        ),
        (
            "Explain the concept of database normalization.",
            "backend",
            "medium",
            true,
        ),
        (
            "What is the difference between REST and GraphQL APIs?",
            "fullstack",
            "medium",
            false,
        ),
    ];
    for (question, field, difficulty, is_pinned) in questions {
        store.create_question(NewInterviewQuestion {
            question: question.to_string(),
            field: field.to_string(),
            difficulty: difficulty.to_string(),
            is_pinned,
        });
    }

    for (url, name) in [
        ("https://linkedin.com/jobs", "LinkedIn"),
        ("https://indeed.com", "Indeed"),
        ("https://glassdoor.com", "Glassdoor"),
    ] {
        store.create_source(NewJobSource {
            user_id: user.id,
            url: url.to_string(),
            name: name.to_string(),
        });
    }

    let first_job = store.create_job(NewJob {
        title: "Software Engineer (Entry Level)".to_string(),
        company: "Google".to_string(),
        location: "Bangalore, India (Remote)".to_string(),
        job_type: "Full-time".to_string(),
        description: "Exciting opportunity for freshers to join our engineering team. Looking for candidates with strong CS fundamentals and problem-solving skills.".to_string(),
        posted_date: Utc::now() - Duration::days(2),
        url: "https://careers.google.com".to_string(),
        source_id: 1,
        is_easy_apply: true,
        is_fresher: true,
        is_internship: false,
    });
    store.create_job(NewJob {
        title: "Frontend Developer Intern".to_string(),
        company: "Microsoft".to_string(),
        location: "Hyderabad, India".to_string(),
        job_type: "Internship (6 months)".to_string(),
        description: "Join our frontend team to develop web experiences. We're looking for students or recent graduates with React experience.".to_string(),
        posted_date: Utc::now(),
        url: "https://careers.microsoft.com".to_string(),
        source_id: 1,
        is_easy_apply: false,
        is_fresher: true,
        is_internship: true,
    });
    let third_job = store.create_job(NewJob {
        title: "Junior Data Analyst".to_string(),
        company: "Amazon".to_string(),
        location: "Mumbai, India".to_string(),
        job_type: "Full-time".to_string(),
        description: "Looking for entry-level data analysts with SQL knowledge and basic statistics understanding.".to_string(),
        posted_date: Utc::now() - Duration::days(7),
        url: "https://amazon.jobs".to_string(),
        source_id: 2,
        is_easy_apply: true,
        is_fresher: true,
        is_internship: false,
    });

    store.create_application(NewApplication {
        user_id: user.id,
        job_id: first_job.id,
        status: ApplicationStatus::Applied,
        applied_date: Utc::now() - Duration::days(1),
        notes: "Applied through LinkedIn Easy Apply".to_string(),
    });
    store.create_application(NewApplication {
        user_id: user.id,
        job_id: third_job.id,
        status: ApplicationStatus::InReview,
        applied_date: Utc::now() - Duration::days(5),
        notes: "Recruiter viewed my profile".to_string(),
    });

    info!(user_id = user.id, "demo data seeded");
    Ok(user)
}
