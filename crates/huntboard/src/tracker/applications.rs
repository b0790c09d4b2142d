use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Application, ApplicationDetail, ApplicationId, ApplicationStats, ApplicationStatus, JobId,
    NewApplication, UserId,
};
use super::store::{TrackerError, TrackerStore};

/// Creates and transitions application records, and computes the
/// per-user status snapshot.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

impl<S> ApplicationService<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record a new application for the caller. The referenced job
    /// must exist, and the caller may hold at most one application per
    /// job.
    pub fn create(&self, user_id: UserId, job_id: JobId) -> Result<Application, TrackerError> {
        if self.store.job(job_id).is_none() {
            return Err(TrackerError::NotFound("job"));
        }
        if self.store.application_for_job(user_id, job_id).is_some() {
            return Err(TrackerError::Conflict(format!(
                "an application for job {job_id} already exists"
            )));
        }

        let application = self.store.create_application(NewApplication {
            user_id,
            job_id,
            status: ApplicationStatus::Applied,
            applied_date: Utc::now(),
            notes: String::new(),
        });
        info!(application_id = application.id, job_id, "application recorded");
        Ok(application)
    }

    /// Apply to a listing through the mocked one-click flow. Only
    /// easy-apply listings qualify, the caller must have a resume on
    /// file, and the one-application-per-job rule still holds. The
    /// resulting record carries a note naming the board it went
    /// through.
    pub fn auto_apply(&self, user_id: UserId, job_id: JobId) -> Result<Application, TrackerError> {
        let user = self
            .store
            .user(user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        let job = self
            .store
            .job(job_id)
            .ok_or(TrackerError::NotFound("job"))?;

        if !job.is_easy_apply {
            return Err(TrackerError::Validation(
                "this job is not eligible for easy apply".to_string(),
            ));
        }
        if user.resume_text.is_none() {
            return Err(TrackerError::Validation(
                "a resume is required before applying".to_string(),
            ));
        }
        if self.store.application_for_job(user_id, job_id).is_some() {
            return Err(TrackerError::Conflict(format!(
                "an application for job {job_id} already exists"
            )));
        }

        let source = self
            .store
            .source(job.source_id)
            .ok_or(TrackerError::NotFound("job source"))?;
        let application = self.store.create_application(NewApplication {
            user_id,
            job_id,
            status: ApplicationStatus::Applied,
            applied_date: Utc::now(),
            notes: format!("Applied via {} Easy Apply", source.name),
        });
        info!(
            application_id = application.id,
            job_id,
            board = %source.name,
            "auto-applied"
        );
        Ok(application)
    }

    /// Replace the status (and optionally the notes) of an existing
    /// application. Any status may follow any other; only the
    /// vocabulary itself is validated.
    pub fn update_status(
        &self,
        id: ApplicationId,
        status: &str,
        notes: Option<String>,
    ) -> Result<Application, TrackerError> {
        let status = ApplicationStatus::parse(status).ok_or_else(|| {
            TrackerError::Validation(format!(
                "invalid status '{status}': expected one of applied, in_review, interview, rejected, offered"
            ))
        })?;

        if self.store.application(id).is_none() {
            return Err(TrackerError::NotFound("application"));
        }

        self.store.update_application(id, status, notes)
    }

    /// List the caller's applications, newest first, each joined with
    /// its job. `status` narrows the list when present.
    pub fn list(
        &self,
        user_id: UserId,
        status: Option<&str>,
    ) -> Result<Vec<ApplicationDetail>, TrackerError> {
        let status = status
            .map(|value| {
                ApplicationStatus::parse(value)
                    .ok_or_else(|| TrackerError::Validation(format!("invalid status '{value}'")))
            })
            .transpose()?;

        let mut details: Vec<ApplicationDetail> = self
            .store
            .applications_for_user(user_id)
            .into_iter()
            .filter(|application| status.map_or(true, |wanted| application.status == wanted))
            .filter_map(|application| {
                // Applications can outlive their job when a source is
                // deleted; those rows are hidden from listings.
                let job = self.store.job(application.job_id)?;
                Some(ApplicationDetail { application, job })
            })
            .collect();
        details.sort_by(|a, b| b.application.applied_date.cmp(&a.application.applied_date));
        Ok(details)
    }

    /// Snapshot counts of the caller's applications by status,
    /// recomputed from the store on every call.
    pub fn stats(&self, user_id: UserId) -> ApplicationStats {
        let mut stats = ApplicationStats::default();
        for application in self.store.applications_for_user(user_id) {
            stats.record(application.status);
        }
        stats
    }
}
