use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{
    AnswerId, Application, ApplicationId, ApplicationStatus, Badge, BadgeCategory, BadgeId,
    BadgeSpec, InterviewQuestion, Job, JobId, JobSource, NewApplication, NewInterviewQuestion,
    NewJob, NewJobSource, NewQuestionAnswer, NewUser, QuestionAnswer, QuestionId, SourceId, User,
    UserBadge, UserBadgeId, UserId,
};

/// Error taxonomy shared by the store and the services built on it.
///
/// `NotFound` surfaces as a 404-equivalent, `Validation` as 400,
/// `Conflict` as 409, `Unauthorized` as 401. `Catalog` is a startup
/// failure, never a per-request one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("badge catalog invalid: {0}")]
    Catalog(String),
}

/// Storage abstraction so services can be exercised in isolation.
///
/// Simple lookups return `Option`; mutations against missing ids fail
/// with `TrackerError::NotFound`. Every create assigns the next value
/// of a per-collection monotonic sequence; ids are never reused.
pub trait TrackerStore: Send + Sync {
    // Users
    fn create_user(&self, user: NewUser) -> Result<User, TrackerError>;
    fn user(&self, id: UserId) -> Option<User>;
    fn user_by_username(&self, username: &str) -> Option<User>;
    fn set_profile_link(
        &self,
        user_id: UserId,
        token: String,
        data: serde_json::Value,
    ) -> Result<User, TrackerError>;
    fn clear_profile_link(&self, user_id: UserId) -> Result<User, TrackerError>;
    fn update_resume(
        &self,
        user_id: UserId,
        text: String,
        skills: Vec<String>,
        at: DateTime<Utc>,
    ) -> Result<User, TrackerError>;

    // Job sources
    fn create_source(&self, source: NewJobSource) -> JobSource;
    fn source(&self, id: SourceId) -> Option<JobSource>;
    fn sources_for_user(&self, user_id: UserId) -> Vec<JobSource>;
    fn mark_source_synced(
        &self,
        id: SourceId,
        at: DateTime<Utc>,
    ) -> Result<JobSource, TrackerError>;
    /// Deletes the source and every job it owns; returns the number of
    /// jobs removed by the cascade.
    fn delete_source(&self, id: SourceId) -> Result<usize, TrackerError>;

    // Jobs
    fn create_job(&self, job: NewJob) -> Job;
    fn job(&self, id: JobId) -> Option<Job>;
    fn jobs(&self) -> Vec<Job>;
    fn save_job(&self, user_id: UserId, job_id: JobId) -> Result<(), TrackerError>;
    fn saved_jobs(&self, user_id: UserId) -> Vec<Job>;

    // Applications
    fn create_application(&self, application: NewApplication) -> Application;
    fn application(&self, id: ApplicationId) -> Option<Application>;
    fn applications_for_user(&self, user_id: UserId) -> Vec<Application>;
    fn application_for_job(&self, user_id: UserId, job_id: JobId) -> Option<Application>;
    fn update_application(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Application, TrackerError>;

    // Interview questions
    fn create_question(&self, question: NewInterviewQuestion) -> InterviewQuestion;
    fn question(&self, id: QuestionId) -> Option<InterviewQuestion>;
    fn questions(&self) -> Vec<InterviewQuestion>;
    fn questions_by_field(&self, field: &str) -> Vec<InterviewQuestion>;
    fn bookmark_question(&self, user_id: UserId, question_id: QuestionId)
        -> Result<(), TrackerError>;
    fn bookmarked_question_ids(&self, user_id: UserId) -> Vec<QuestionId>;

    // Question answers
    fn create_answer(&self, answer: NewQuestionAnswer) -> QuestionAnswer;
    fn answer(&self, id: AnswerId) -> Option<QuestionAnswer>;
    fn answers_for_question(&self, question_id: QuestionId) -> Vec<QuestionAnswer>;
    fn answers_by_user(&self, user_id: UserId) -> Vec<QuestionAnswer>;
    fn all_answers(&self) -> Vec<QuestionAnswer>;
    fn upvote_answer(&self, id: AnswerId) -> Result<QuestionAnswer, TrackerError>;
    fn recent_answers(&self, limit: usize) -> Vec<QuestionAnswer>;

    // Badges
    fn insert_badge(&self, badge: BadgeSpec) -> Badge;
    fn badge(&self, id: BadgeId) -> Option<Badge>;
    fn badges(&self) -> Vec<Badge>;
    fn badge_by_category(&self, category: BadgeCategory) -> Option<Badge>;
    fn user_badges(&self, user_id: UserId) -> Vec<UserBadge>;
    /// Idempotent grant: an existing (user, badge) row is returned
    /// unchanged. Runs under the store lock so a concurrent
    /// read-count-then-award cannot double-grant.
    fn award_badge(
        &self,
        user_id: UserId,
        badge_id: BadgeId,
        at: DateTime<Utc>,
    ) -> Result<UserBadge, TrackerError>;
}

#[derive(Default)]
struct Collections {
    users: BTreeMap<UserId, User>,
    sources: BTreeMap<SourceId, JobSource>,
    jobs: BTreeMap<JobId, Job>,
    applications: BTreeMap<ApplicationId, Application>,
    questions: BTreeMap<QuestionId, InterviewQuestion>,
    answers: BTreeMap<AnswerId, QuestionAnswer>,
    badges: BTreeMap<BadgeId, Badge>,
    user_badges: BTreeMap<UserBadgeId, UserBadge>,
    saved_jobs: HashMap<UserId, BTreeSet<JobId>>,
    bookmarks: HashMap<UserId, BTreeSet<QuestionId>>,
    sequences: Sequences,
}

#[derive(Default)]
struct Sequences {
    user: u32,
    source: u32,
    job: u32,
    application: u32,
    question: u32,
    answer: u32,
    badge: u32,
    user_badge: u32,
}

impl Sequences {
    fn next(counter: &mut u32) -> u32 {
        *counter += 1;
        *counter
    }
}

/// Process-wide in-memory store. All collections live behind a single
/// mutex, which is what makes multi-step mutations (cascade delete,
/// idempotent badge awards) atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

impl TrackerStore for MemoryStore {
    fn create_user(&self, user: NewUser) -> Result<User, TrackerError> {
        let mut inner = self.lock();
        if inner
            .users
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(TrackerError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        let id = Sequences::next(&mut inner.sequences.user);
        let user = User {
            id,
            username: user.username,
            password: user.password,
            preferred_field: user.preferred_field,
            profile_connected: false,
            profile_token: None,
            profile_data: None,
            resume_text: None,
            resume_skills: Vec::new(),
            resume_updated_at: None,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    fn user_by_username(&self, username: &str) -> Option<User> {
        self.lock()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    fn set_profile_link(
        &self,
        user_id: UserId,
        token: String,
        data: serde_json::Value,
    ) -> Result<User, TrackerError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        user.profile_connected = true;
        user.profile_token = Some(token);
        user.profile_data = Some(data);
        Ok(user.clone())
    }

    fn clear_profile_link(&self, user_id: UserId) -> Result<User, TrackerError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        user.profile_connected = false;
        user.profile_token = None;
        user.profile_data = None;
        Ok(user.clone())
    }

    fn update_resume(
        &self,
        user_id: UserId,
        text: String,
        skills: Vec<String>,
        at: DateTime<Utc>,
    ) -> Result<User, TrackerError> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        user.resume_text = Some(text);
        user.resume_skills = skills;
        user.resume_updated_at = Some(at);
        Ok(user.clone())
    }

    fn create_source(&self, source: NewJobSource) -> JobSource {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.source);
        let source = JobSource {
            id,
            user_id: source.user_id,
            url: source.url,
            name: source.name,
            last_synced: None,
        };
        inner.sources.insert(id, source.clone());
        source
    }

    fn source(&self, id: SourceId) -> Option<JobSource> {
        self.lock().sources.get(&id).cloned()
    }

    fn sources_for_user(&self, user_id: UserId) -> Vec<JobSource> {
        self.lock()
            .sources
            .values()
            .filter(|source| source.user_id == user_id)
            .cloned()
            .collect()
    }

    fn mark_source_synced(
        &self,
        id: SourceId,
        at: DateTime<Utc>,
    ) -> Result<JobSource, TrackerError> {
        let mut inner = self.lock();
        let source = inner
            .sources
            .get_mut(&id)
            .ok_or(TrackerError::NotFound("job source"))?;
        source.last_synced = Some(at);
        Ok(source.clone())
    }

    fn delete_source(&self, id: SourceId) -> Result<usize, TrackerError> {
        let mut inner = self.lock();
        inner
            .sources
            .remove(&id)
            .ok_or(TrackerError::NotFound("job source"))?;

        let owned: Vec<JobId> = inner
            .jobs
            .values()
            .filter(|job| job.source_id == id)
            .map(|job| job.id)
            .collect();
        for job_id in &owned {
            inner.jobs.remove(job_id);
        }
        Ok(owned.len())
    }

    fn create_job(&self, job: NewJob) -> Job {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.job);
        let job = Job {
            id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            description: job.description,
            posted_date: job.posted_date,
            url: job.url,
            source_id: job.source_id,
            is_easy_apply: job.is_easy_apply,
            is_fresher: job.is_fresher,
            is_internship: job.is_internship,
        };
        inner.jobs.insert(id, job.clone());
        job
    }

    fn job(&self, id: JobId) -> Option<Job> {
        self.lock().jobs.get(&id).cloned()
    }

    fn jobs(&self) -> Vec<Job> {
        self.lock().jobs.values().cloned().collect()
    }

    fn save_job(&self, user_id: UserId, job_id: JobId) -> Result<(), TrackerError> {
        let mut inner = self.lock();
        if !inner.jobs.contains_key(&job_id) {
            return Err(TrackerError::NotFound("job"));
        }
        inner.saved_jobs.entry(user_id).or_default().insert(job_id);
        Ok(())
    }

    fn saved_jobs(&self, user_id: UserId) -> Vec<Job> {
        let inner = self.lock();
        let Some(saved) = inner.saved_jobs.get(&user_id) else {
            return Vec::new();
        };
        saved
            .iter()
            .filter_map(|job_id| inner.jobs.get(job_id).cloned())
            .collect()
    }

    fn create_application(&self, application: NewApplication) -> Application {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.application);
        let application = Application {
            id,
            user_id: application.user_id,
            job_id: application.job_id,
            status: application.status,
            applied_date: application.applied_date,
            notes: application.notes,
        };
        inner.applications.insert(id, application.clone());
        application
    }

    fn application(&self, id: ApplicationId) -> Option<Application> {
        self.lock().applications.get(&id).cloned()
    }

    fn applications_for_user(&self, user_id: UserId) -> Vec<Application> {
        self.lock()
            .applications
            .values()
            .filter(|application| application.user_id == user_id)
            .cloned()
            .collect()
    }

    fn application_for_job(&self, user_id: UserId, job_id: JobId) -> Option<Application> {
        self.lock()
            .applications
            .values()
            .find(|application| application.user_id == user_id && application.job_id == job_id)
            .cloned()
    }

    fn update_application(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Application, TrackerError> {
        let mut inner = self.lock();
        let application = inner
            .applications
            .get_mut(&id)
            .ok_or(TrackerError::NotFound("application"))?;
        application.status = status;
        if let Some(notes) = notes {
            application.notes = notes;
        }
        Ok(application.clone())
    }

    fn create_question(&self, question: NewInterviewQuestion) -> InterviewQuestion {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.question);
        let question = InterviewQuestion {
            id,
            question: question.question,
            field: question.field,
            difficulty: question.difficulty,
            is_pinned: question.is_pinned,
        };
        inner.questions.insert(id, question.clone());
        question
    }

    fn question(&self, id: QuestionId) -> Option<InterviewQuestion> {
        self.lock().questions.get(&id).cloned()
    }

    fn questions(&self) -> Vec<InterviewQuestion> {
        self.lock().questions.values().cloned().collect()
    }

    fn questions_by_field(&self, field: &str) -> Vec<InterviewQuestion> {
        self.lock()
            .questions
            .values()
            .filter(|question| question.field == field)
            .cloned()
            .collect()
    }

    fn bookmark_question(
        &self,
        user_id: UserId,
        question_id: QuestionId,
    ) -> Result<(), TrackerError> {
        let mut inner = self.lock();
        if !inner.questions.contains_key(&question_id) {
            return Err(TrackerError::NotFound("interview question"));
        }
        inner
            .bookmarks
            .entry(user_id)
            .or_default()
            .insert(question_id);
        Ok(())
    }

    fn bookmarked_question_ids(&self, user_id: UserId) -> Vec<QuestionId> {
        self.lock()
            .bookmarks
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn create_answer(&self, answer: NewQuestionAnswer) -> QuestionAnswer {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.answer);
        let answer = QuestionAnswer {
            id,
            question_id: answer.question_id,
            user_id: answer.user_id,
            answer: answer.answer,
            upvotes: 0,
            created_at: answer.created_at,
        };
        inner.answers.insert(id, answer.clone());
        answer
    }

    fn answer(&self, id: AnswerId) -> Option<QuestionAnswer> {
        self.lock().answers.get(&id).cloned()
    }

    fn answers_for_question(&self, question_id: QuestionId) -> Vec<QuestionAnswer> {
        self.lock()
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect()
    }

    fn answers_by_user(&self, user_id: UserId) -> Vec<QuestionAnswer> {
        self.lock()
            .answers
            .values()
            .filter(|answer| answer.user_id == user_id)
            .cloned()
            .collect()
    }

    fn all_answers(&self) -> Vec<QuestionAnswer> {
        self.lock().answers.values().cloned().collect()
    }

    fn upvote_answer(&self, id: AnswerId) -> Result<QuestionAnswer, TrackerError> {
        let mut inner = self.lock();
        let answer = inner
            .answers
            .get_mut(&id)
            .ok_or(TrackerError::NotFound("answer"))?;
        answer.upvotes += 1;
        Ok(answer.clone())
    }

    fn recent_answers(&self, limit: usize) -> Vec<QuestionAnswer> {
        let mut answers: Vec<QuestionAnswer> = self.lock().answers.values().cloned().collect();
        answers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        answers.truncate(limit);
        answers
    }

    fn insert_badge(&self, badge: BadgeSpec) -> Badge {
        let mut inner = self.lock();
        let id = Sequences::next(&mut inner.sequences.badge);
        let badge = Badge {
            id,
            name: badge.name,
            description: badge.description,
            icon: badge.icon,
            required_score: badge.required_score,
            category: badge.category,
        };
        inner.badges.insert(id, badge.clone());
        badge
    }

    fn badge(&self, id: BadgeId) -> Option<Badge> {
        self.lock().badges.get(&id).cloned()
    }

    fn badges(&self) -> Vec<Badge> {
        self.lock().badges.values().cloned().collect()
    }

    fn badge_by_category(&self, category: BadgeCategory) -> Option<Badge> {
        self.lock()
            .badges
            .values()
            .find(|badge| badge.category == category)
            .cloned()
    }

    fn user_badges(&self, user_id: UserId) -> Vec<UserBadge> {
        self.lock()
            .user_badges
            .values()
            .filter(|grant| grant.user_id == user_id)
            .cloned()
            .collect()
    }

    fn award_badge(
        &self,
        user_id: UserId,
        badge_id: BadgeId,
        at: DateTime<Utc>,
    ) -> Result<UserBadge, TrackerError> {
        let mut inner = self.lock();
        if !inner.badges.contains_key(&badge_id) {
            return Err(TrackerError::NotFound("badge"));
        }

        if let Some(existing) = inner
            .user_badges
            .values()
            .find(|grant| grant.user_id == user_id && grant.badge_id == badge_id)
        {
            return Ok(existing.clone());
        }

        let id = Sequences::next(&mut inner.sequences.user_badge);
        let grant = UserBadge {
            id,
            user_id,
            badge_id,
            awarded_date: at,
        };
        inner.user_badges.insert(id, grant.clone());
        Ok(grant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "password".to_string(),
            preferred_field: None,
        }
    }

    fn new_job(source_id: SourceId, title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            description: "desc".to_string(),
            posted_date: Utc::now(),
            url: "https://example.com/job".to_string(),
            source_id,
            is_easy_apply: false,
            is_fresher: false,
            is_internship: false,
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let store = MemoryStore::new();
        let source = store.create_source(NewJobSource {
            user_id: 1,
            url: "https://linkedin.com/jobs".to_string(),
            name: "Linkedin".to_string(),
        });
        let first = store.create_job(new_job(source.id, "one"));
        let second = store.create_job(new_job(source.id, "two"));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        store.delete_source(source.id).expect("source exists");
        let replacement = store.create_source(NewJobSource {
            user_id: 1,
            url: "https://indeed.com".to_string(),
            name: "Indeed".to_string(),
        });
        let third = store.create_job(new_job(replacement.id, "three"));
        assert_eq!(third.id, 3);
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let store = MemoryStore::new();
        store.create_user(new_user("demo_user")).expect("first insert");
        let result = store.create_user(new_user("demo_user"));
        assert!(matches!(result, Err(TrackerError::Conflict(_))));
    }

    #[test]
    fn deleting_a_source_cascades_to_its_jobs() {
        let store = MemoryStore::new();
        let keep = store.create_source(NewJobSource {
            user_id: 1,
            url: "https://indeed.com".to_string(),
            name: "Indeed".to_string(),
        });
        let drop = store.create_source(NewJobSource {
            user_id: 1,
            url: "https://glassdoor.com".to_string(),
            name: "Glassdoor".to_string(),
        });
        let kept_job = store.create_job(new_job(keep.id, "kept"));
        store.create_job(new_job(drop.id, "dropped"));
        store.create_job(new_job(drop.id, "also dropped"));

        let removed = store.delete_source(drop.id).expect("source exists");
        assert_eq!(removed, 2);
        assert!(store.source(drop.id).is_none());
        assert_eq!(store.jobs().len(), 1);
        assert!(store.job(kept_job.id).is_some());
    }

    #[test]
    fn delete_missing_source_fails_loudly() {
        let store = MemoryStore::new();
        assert_eq!(
            store.delete_source(42),
            Err(TrackerError::NotFound("job source"))
        );
    }

    #[test]
    fn award_badge_is_idempotent() {
        let store = MemoryStore::new();
        let badge = store.insert_badge(BadgeSpec {
            name: "Top Contributor".to_string(),
            description: "Provided valuable answers".to_string(),
            icon: "star".to_string(),
            required_score: 10,
            category: BadgeCategory::Contribution,
        });

        let first = store.award_badge(7, badge.id, Utc::now()).expect("grants");
        let second = store.award_badge(7, badge.id, Utc::now()).expect("no-op");
        assert_eq!(first.id, second.id);
        assert_eq!(store.user_badges(7).len(), 1);
    }

    #[test]
    fn update_application_preserves_notes_when_omitted() {
        let store = MemoryStore::new();
        let created = store.create_application(NewApplication {
            user_id: 1,
            job_id: 1,
            status: ApplicationStatus::Applied,
            applied_date: Utc::now(),
            notes: "Applied through Easy Apply".to_string(),
        });

        let updated = store
            .update_application(created.id, ApplicationStatus::Interview, None)
            .expect("exists");
        assert_eq!(updated.status, ApplicationStatus::Interview);
        assert_eq!(updated.notes, "Applied through Easy Apply");

        let rewritten = store
            .update_application(
                created.id,
                ApplicationStatus::Offered,
                Some("Signed!".to_string()),
            )
            .expect("exists");
        assert_eq!(rewritten.notes, "Signed!");
    }
}
