use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Badge, BadgeCategory, BadgeId, BadgeSpec, UserBadge, UserBadgeDetail, UserId};
use super::store::{TrackerError, TrackerStore};

/// Answer-count threshold standing in for a true consecutive-day
/// streak; the data model has no per-day activity log.
const STREAK_ANSWER_COUNT: usize = 7;
/// Cumulative upvotes across all of a user's answers.
const CONTRIBUTION_UPVOTES: u32 = 10;
/// Answers that received at least one upvote.
const PROBLEM_SOLVING_UPVOTED_ANSWERS: usize = 5;

/// Install the badge catalog, enforcing the one-badge-per-category
/// invariant the rule engine depends on. A duplicated category fails
/// fast instead of letting the engine silently pick the first match.
pub fn install_catalog<S>(store: &S, specs: Vec<BadgeSpec>) -> Result<Vec<Badge>, TrackerError>
where
    S: TrackerStore,
{
    let mut seen: HashSet<BadgeCategory> = store
        .badges()
        .into_iter()
        .map(|badge| badge.category)
        .collect();

    for spec in &specs {
        if !seen.insert(spec.category) {
            return Err(TrackerError::Catalog(format!(
                "more than one badge in category '{}'",
                spec.category.label()
            )));
        }
    }

    Ok(specs
        .into_iter()
        .map(|spec| store.insert_badge(spec))
        .collect())
}

/// Evaluates the fixed threshold rules against a user's answer history
/// and grants the matching catalog badges idempotently.
pub struct BadgeEngine<S> {
    store: Arc<S>,
}

impl<S> BadgeEngine<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Evaluate all rules for the user and award every satisfied one.
    /// Returns the badges granted by this call; thresholds already
    /// crossed on an earlier call contribute nothing new. A category
    /// missing from the catalog is skipped silently.
    pub fn check_and_award(&self, user_id: UserId) -> Result<Vec<Badge>, TrackerError> {
        let answers = self.store.answers_by_user(user_id);
        let total_upvotes: u32 = answers.iter().map(|answer| answer.upvotes).sum();
        let upvoted_answers = answers.iter().filter(|answer| answer.upvotes > 0).count();

        let mut earned = Vec::new();
        if total_upvotes >= CONTRIBUTION_UPVOTES {
            earned.push(BadgeCategory::Contribution);
        }
        if answers.len() >= STREAK_ANSWER_COUNT {
            earned.push(BadgeCategory::Streak);
        }
        if upvoted_answers >= PROBLEM_SOLVING_UPVOTED_ANSWERS {
            earned.push(BadgeCategory::ProblemSolving);
        }

        let already_held: HashSet<BadgeId> = self
            .store
            .user_badges(user_id)
            .into_iter()
            .map(|grant| grant.badge_id)
            .collect();

        let mut newly_awarded = Vec::new();
        for category in earned {
            let Some(badge) = self.store.badge_by_category(category) else {
                continue;
            };
            self.store.award_badge(user_id, badge.id, Utc::now())?;
            if !already_held.contains(&badge.id) {
                info!(user_id, badge = %badge.name, "badge awarded");
                newly_awarded.push(badge);
            }
        }
        Ok(newly_awarded)
    }

    /// Idempotent single grant: an existing (user, badge) row comes
    /// back unchanged.
    pub fn award(&self, user_id: UserId, badge_id: BadgeId) -> Result<UserBadge, TrackerError> {
        self.store.award_badge(user_id, badge_id, Utc::now())
    }

    /// Full badge catalog.
    pub fn catalog(&self) -> Vec<Badge> {
        self.store.badges()
    }

    /// The user's grants joined with their catalog entries.
    pub fn badges_for_user(&self, user_id: UserId) -> Vec<UserBadgeDetail> {
        self.store
            .user_badges(user_id)
            .into_iter()
            .filter_map(|grant| {
                let badge = self.store.badge(grant.badge_id)?;
                Some(UserBadgeDetail { grant, badge })
            })
            .collect()
    }
}
