use chrono::Utc;
use clap::Args;
use std::sync::Arc;

use huntboard::error::AppError;
use huntboard::tracker::{seed, MemoryStore, TrackerError, TrackerState, TrackerStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the interview-practice portion of the demo.
    #[arg(long)]
    pub(crate) skip_practice: bool,
}

/// Scripted walk through the tracker: seed fixtures, pull in a board,
/// apply to one of its listings, move the application through the
/// pipeline, then practice questions until a badge lands.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::new());
    let user = seed::demo_data(store.as_ref())?;
    let state = TrackerState::new(store.clone());

    println!("Job-search tracker demo");
    println!("Signed in as {} (user {})", user.username, user.id);

    let source = state
        .boards
        .add_source(user.id, "https://linkedin.com/jobs")?;
    let pulled = store
        .jobs()
        .into_iter()
        .filter(|job| job.source_id == source.id)
        .count();
    println!("\nAdded board '{}' and pulled {pulled} listings", source.name);

    let listing = store
        .jobs()
        .into_iter()
        .find(|job| job.source_id == source.id)
        .ok_or(TrackerError::NotFound("job"))?;
    let age_days = (Utc::now() - listing.posted_date).num_days();
    println!(
        "Applying to '{}' at {} (posted {age_days} days ago)",
        listing.title, listing.company
    );
    let application = state.applications.create(user.id, listing.id)?;
    for status in ["in_review", "interview"] {
        state
            .applications
            .update_status(application.id, status, None)?;
    }

    let stats = state.applications.stats(user.id);
    println!("\nApplication pipeline");
    println!("- applied:     {}", stats.applied);
    println!("- in review:   {}", stats.in_review);
    println!("- interview:   {}", stats.interview);
    println!("- rejected:    {}", stats.rejected);
    println!("- offered:     {}", stats.offered);
    println!("- total:       {}", stats.total);

    if args.skip_practice {
        return Ok(());
    }

    let daily = state.interviews.daily(user.id)?;
    println!("\nDaily question: {}", daily.question.question);
    let mut last_answer = None;
    for n in 1..=7 {
        let answer = state.interviews.submit_answer(
            user.id,
            daily.question.id,
            format!("Practice attempt {n}"),
        )?;
        last_answer = Some(answer);
    }
    if let Some(answer) = last_answer {
        for _ in 0..10 {
            state.interviews.upvote_answer(answer.id)?;
        }
    }

    println!("\nBadges earned");
    for detail in state.badges.badges_for_user(user.id) {
        println!("- {} ({})", detail.badge.name, detail.badge.description);
    }

    Ok(())
}
