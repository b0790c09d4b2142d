use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity identifiers are plain integers assigned by per-collection
/// monotonic sequences; an id is never reused, even after deletion.
pub type UserId = u32;
pub type SourceId = u32;
pub type JobId = u32;
pub type ApplicationId = u32;
pub type QuestionId = u32;
pub type AnswerId = u32;
pub type BadgeId = u32;
pub type UserBadgeId = u32;

/// Registered account, including the simulated external-profile link
/// and the stored resume used for job match scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub preferred_field: Option<String>,
    pub profile_connected: bool,
    pub profile_token: Option<String>,
    pub profile_data: Option<serde_json::Value>,
    pub resume_text: Option<String>,
    pub resume_skills: Vec<String>,
    pub resume_updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Response shape with the credential stripped. Passwords never
    /// leave the store through the API; the resume body is reduced to
    /// a presence flag and the extracted skills.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            preferred_field: self.preferred_field.clone(),
            profile_connected: self.profile_connected,
            profile_data: self.profile_data.clone(),
            has_resume: self.resume_text.is_some(),
            resume_skills: self.resume_skills.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub preferred_field: Option<String>,
    pub profile_connected: bool,
    pub profile_data: Option<serde_json::Value>,
    pub has_resume: bool,
    pub resume_skills: Vec<String>,
}

/// Intake payload for account registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub preferred_field: Option<String>,
}

/// A user-owned reference to an external job board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSource {
    pub id: SourceId,
    pub user_id: UserId,
    pub url: String,
    pub name: String,
    pub last_synced: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewJobSource {
    pub user_id: UserId,
    pub url: String,
    pub name: String,
}

/// A scraped job posting. Owned by exactly one source; immutable once
/// created — a re-sync creates fresh rows rather than updating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub description: String,
    pub posted_date: DateTime<Utc>,
    pub url: String,
    pub source_id: SourceId,
    pub is_easy_apply: bool,
    pub is_fresher: bool,
    pub is_internship: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub description: String,
    pub posted_date: DateTime<Utc>,
    pub url: String,
    pub source_id: SourceId,
    pub is_easy_apply: bool,
    pub is_fresher: bool,
    pub is_internship: bool,
}

/// Status vocabulary for a tracked application.
///
/// The transition graph is deliberately complete: any status may follow
/// any other, because recruiters skip stages in practice (applied
/// straight to offered is legal). Initial state is `Applied`; `Rejected`
/// and `Offered` are terminal only by convention, not enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    InReview,
    Interview,
    Rejected,
    Offered,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::InReview,
        ApplicationStatus::Interview,
        ApplicationStatus::Rejected,
        ApplicationStatus::Offered,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Offered => "offered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == value)
    }
}

/// Links a user to a job they applied for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: UserId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
    pub notes: String,
}

/// Application joined with its job for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub job: Job,
}

/// Point-in-time snapshot of a user's application counts by status.
/// Always recomputed from the store; the five category counts sum to
/// `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub applied: u32,
    pub in_review: u32,
    pub interview: u32,
    pub rejected: u32,
    pub offered: u32,
    pub total: u32,
}

impl ApplicationStats {
    pub(crate) fn record(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::InReview => self.in_review += 1,
            ApplicationStatus::Interview => self.interview += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
            ApplicationStatus::Offered => self.offered += 1,
        }
        self.total += 1;
    }
}

/// Practice question for interview preparation. Pinned questions are
/// eligible as the "daily" pick for their field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: QuestionId,
    pub question: String,
    pub field: String,
    pub difficulty: String,
    pub is_pinned: bool,
}

#[derive(Debug, Clone)]
pub struct NewInterviewQuestion {
    pub question: String,
    pub field: String,
    pub difficulty: String,
    pub is_pinned: bool,
}

/// Community answer to a practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub answer: String,
    pub upvotes: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuestionAnswer {
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Question with its answers, as listed on the practice pages.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionThread {
    #[serde(flatten)]
    pub question: InterviewQuestion,
    pub answers: Vec<QuestionAnswer>,
}

/// The featured daily question for a field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuestion {
    #[serde(flatten)]
    pub question: InterviewQuestion,
    pub answers: Vec<QuestionAnswer>,
    pub answer_count: usize,
}

/// Badge categories, each mapped to exactly one threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Streak,
    Contribution,
    ProblemSolving,
}

impl BadgeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            BadgeCategory::Streak => "streak",
            BadgeCategory::Contribution => "contribution",
            BadgeCategory::ProblemSolving => "problem_solving",
        }
    }
}

/// Static catalog entry describing an earnable badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub required_score: u32,
    pub category: BadgeCategory,
}

/// Catalog entry before an id is assigned.
#[derive(Debug, Clone)]
pub struct BadgeSpec {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub required_score: u32,
    pub category: BadgeCategory,
}

/// Grant of a badge to a user. At most one exists per (user, badge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub id: UserBadgeId,
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub awarded_date: DateTime<Utc>,
}

/// Grant joined with its catalog entry for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserBadgeDetail {
    #[serde(flatten)]
    pub grant: UserBadge,
    pub badge: Badge,
}

/// Leaderboard row for the community page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopContributor {
    #[serde(flatten)]
    pub user: UserView,
    pub answer_count: usize,
    pub total_upvotes: u32,
    pub badges: Vec<Badge>,
}

/// Condensed question reference embedded in recent-answer feeds.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub question: String,
    pub field: String,
}

/// Feed entry pairing a fresh answer with its author and question.
#[derive(Debug, Clone, Serialize)]
pub struct RecentAnswer {
    #[serde(flatten)]
    pub answer: QuestionAnswer,
    pub user: UserView,
    pub question: QuestionSummary,
}
