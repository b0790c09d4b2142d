use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::badges::BadgeEngine;
use super::domain::{
    AnswerId, DailyQuestion, NewQuestionAnswer, QuestionAnswer, QuestionId, QuestionSummary,
    QuestionThread, RecentAnswer, TopContributor, UserId,
};
use super::store::{TrackerError, TrackerStore};

/// Field used for the daily pick when a user has not chosen one.
const DEFAULT_FIELD: &str = "frontend";
/// Size of the community recent-answers feed.
const RECENT_FEED_LIMIT: usize = 5;

/// Interview practice: question listings, the daily pick, community
/// answers, and the leaderboard. Answer submissions and upvotes feed
/// the badge rule engine.
pub struct InterviewService<S> {
    store: Arc<S>,
    badges: BadgeEngine<S>,
}

impl<S> InterviewService<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        let badges = BadgeEngine::new(store.clone());
        Self { store, badges }
    }

    /// Questions for a field, each with its answers. `category` narrows
    /// or reorders: `popular` sorts by answer count, `bookmarked`
    /// restricts to the caller's bookmarks, anything else lists all.
    pub fn list(&self, user_id: UserId, field: &str, category: &str) -> Vec<QuestionThread> {
        let mut threads: Vec<QuestionThread> = match category {
            "bookmarked" => {
                let bookmarked = self.store.bookmarked_question_ids(user_id);
                self.store
                    .questions_by_field(field)
                    .into_iter()
                    .filter(|question| bookmarked.contains(&question.id))
                    .map(|question| self.thread(question))
                    .collect()
            }
            _ => self
                .store
                .questions_by_field(field)
                .into_iter()
                .map(|question| self.thread(question))
                .collect(),
        };

        if category == "popular" {
            threads.sort_by(|a, b| b.answers.len().cmp(&a.answers.len()));
        }
        threads
    }

    fn thread(&self, question: super::domain::InterviewQuestion) -> QuestionThread {
        let answers = self.store.answers_for_question(question.id);
        QuestionThread { question, answers }
    }

    /// The featured question for the caller: the first pinned question
    /// of their preferred field (or the default field).
    pub fn daily(&self, user_id: UserId) -> Result<DailyQuestion, TrackerError> {
        let user = self
            .store
            .user(user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        let field = user
            .preferred_field
            .unwrap_or_else(|| DEFAULT_FIELD.to_string());

        let question = self
            .store
            .questions_by_field(&field)
            .into_iter()
            .find(|question| question.is_pinned)
            .ok_or(TrackerError::NotFound("daily question"))?;

        let answers = self.store.answers_for_question(question.id);
        let answer_count = answers.len();
        Ok(DailyQuestion {
            question,
            answers,
            answer_count,
        })
    }

    /// Record an answer and re-evaluate the caller's badge thresholds.
    pub fn submit_answer(
        &self,
        user_id: UserId,
        question_id: QuestionId,
        answer: String,
    ) -> Result<QuestionAnswer, TrackerError> {
        if answer.trim().is_empty() {
            return Err(TrackerError::Validation(
                "answer must not be empty".to_string(),
            ));
        }
        if self.store.question(question_id).is_none() {
            return Err(TrackerError::NotFound("interview question"));
        }

        let created = self.store.create_answer(NewQuestionAnswer {
            question_id,
            user_id,
            answer,
            created_at: Utc::now(),
        });

        let awarded = self.badges.check_and_award(user_id)?;
        debug!(
            answer_id = created.id,
            newly_awarded = awarded.len(),
            "answer submitted"
        );
        Ok(created)
    }

    /// Increment an answer's upvote count by exactly one and
    /// re-evaluate the author's badge thresholds.
    pub fn upvote_answer(&self, answer_id: AnswerId) -> Result<QuestionAnswer, TrackerError> {
        let updated = self.store.upvote_answer(answer_id)?;
        self.badges.check_and_award(updated.user_id)?;
        Ok(updated)
    }

    pub fn bookmark(&self, user_id: UserId, question_id: QuestionId) -> Result<(), TrackerError> {
        self.store.bookmark_question(user_id, question_id)
    }

    /// Leaderboard of users with at least one answer, sorted by total
    /// upvotes descending.
    pub fn top_contributors(&self) -> Vec<TopContributor> {
        let mut tallies: HashMap<UserId, (usize, u32)> = HashMap::new();
        for answer in self.store.all_answers() {
            let entry = tallies.entry(answer.user_id).or_default();
            entry.0 += 1;
            entry.1 += answer.upvotes;
        }

        let mut contributors: Vec<TopContributor> = tallies
            .into_iter()
            .filter_map(|(user_id, (answer_count, total_upvotes))| {
                let user = self.store.user(user_id)?;
                let badges = self
                    .store
                    .user_badges(user_id)
                    .into_iter()
                    .filter_map(|grant| self.store.badge(grant.badge_id))
                    .collect();
                Some(TopContributor {
                    user: user.view(),
                    answer_count,
                    total_upvotes,
                    badges,
                })
            })
            .collect();
        contributors.sort_by(|a, b| b.total_upvotes.cmp(&a.total_upvotes));
        contributors
    }

    /// The five newest answers with author and question context.
    pub fn recent_answers(&self) -> Vec<RecentAnswer> {
        self.store
            .recent_answers(RECENT_FEED_LIMIT)
            .into_iter()
            .filter_map(|answer| {
                let user = self.store.user(answer.user_id)?;
                let question = self.store.question(answer.question_id)?;
                Some(RecentAnswer {
                    answer,
                    user: user.view(),
                    question: QuestionSummary {
                        id: question.id,
                        question: question.question,
                        field: question.field,
                    },
                })
            })
            .collect()
    }
}
