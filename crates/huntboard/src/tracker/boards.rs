use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{Job, JobId, JobSource, NewJobSource, SourceId, UserId};
use super::resume;
use super::scraper;
use super::store::{TrackerError, TrackerStore};

const SEARCH_PAGE_SIZE: usize = 10;

/// Job-source management and listing/search over the scraped jobs.
pub struct BoardService<S> {
    store: Arc<S>,
}

/// Outcome of a source sync: the stamped source and how many fixture
/// listings were pulled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub source: JobSource,
    pub jobs_count: usize,
}

/// Free-text search request over the job listings.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    pub filter: Option<String>,
    pub page: usize,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: usize,
    pub pages: usize,
    pub page: usize,
}

impl<S> BoardService<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn sources(&self, user_id: UserId) -> Vec<JobSource> {
        self.store.sources_for_user(user_id)
    }

    /// Register a board by URL and immediately pull its listings.
    pub fn add_source(&self, user_id: UserId, url: &str) -> Result<JobSource, TrackerError> {
        if url.trim().is_empty() {
            return Err(TrackerError::Validation("URL is required".to_string()));
        }

        let name = scraper::source_name_from_url(url);
        let source = self.store.create_source(NewJobSource {
            user_id,
            url: url.to_string(),
            name,
        });

        let outcome = self.sync_source(source.id)?;
        info!(
            source_id = outcome.source.id,
            board = %outcome.source.name,
            jobs = outcome.jobs_count,
            "job source added"
        );
        Ok(outcome.source)
    }

    /// Re-pull the fixture listings for a source and stamp
    /// `last_synced`. Listings are re-created, never updated in place.
    pub fn sync_source(&self, source_id: SourceId) -> Result<SyncOutcome, TrackerError> {
        let source = self
            .store
            .source(source_id)
            .ok_or(TrackerError::NotFound("job source"))?;

        let listings = scraper::scrape(&source);
        let jobs_count = listings.len();
        for listing in listings {
            self.store.create_job(listing);
        }

        let source = self.store.mark_source_synced(source_id, Utc::now())?;
        Ok(SyncOutcome { source, jobs_count })
    }

    /// Delete a source; its jobs go with it.
    pub fn delete_source(&self, source_id: SourceId) -> Result<(), TrackerError> {
        let removed_jobs = self.store.delete_source(source_id)?;
        info!(source_id, removed_jobs, "job source deleted");
        Ok(())
    }

    /// All jobs, or only the fresher/internship subset.
    pub fn jobs(&self, filter: Option<&str>) -> Vec<Job> {
        let jobs = self.store.jobs();
        match filter {
            Some("freshers") => jobs.into_iter().filter(|job| job.is_fresher).collect(),
            Some("internships") => jobs.into_iter().filter(|job| job.is_internship).collect(),
            _ => jobs,
        }
    }

    /// Paginated free-text search over title/company/description and
    /// location, newest postings first.
    pub fn search(&self, query: JobQuery) -> Result<JobPage, TrackerError> {
        if query.page < 1 {
            return Err(TrackerError::Validation("invalid page number".to_string()));
        }

        let mut jobs = self.jobs(query.filter.as_deref());

        if let Some(needle) = query.query.as_deref() {
            let needle = needle.to_lowercase();
            jobs.retain(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job.company.to_lowercase().contains(&needle)
                    || job.description.to_lowercase().contains(&needle)
            });
        }

        if let Some(location) = query.location.as_deref() {
            let location = location.to_lowercase();
            jobs.retain(|job| job.location.to_lowercase().contains(&location));
        }

        jobs.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));

        let total = jobs.len();
        let pages = total.div_ceil(SEARCH_PAGE_SIZE);
        let start = (query.page - 1).saturating_mul(SEARCH_PAGE_SIZE);
        let jobs = if start < total {
            jobs.into_iter().skip(start).take(SEARCH_PAGE_SIZE).collect()
        } else {
            Vec::new()
        };

        Ok(JobPage {
            jobs,
            total,
            pages,
            page: query.page,
        })
    }

    /// How well the caller's resume covers a listing's skills, as a
    /// whole percentage. A caller without a resume scores zero.
    pub fn match_score(&self, user_id: UserId, job_id: JobId) -> Result<u8, TrackerError> {
        let user = self
            .store
            .user(user_id)
            .ok_or(TrackerError::NotFound("user"))?;
        let job = self
            .store
            .job(job_id)
            .ok_or(TrackerError::NotFound("job"))?;

        let job_skills = resume::extract_skills(&format!("{} {}", job.title, job.description));
        Ok(resume::match_score(&user.resume_skills, &job_skills))
    }

    /// Save a job to the caller's shortlist.
    pub fn save_job(&self, user_id: UserId, job_id: JobId) -> Result<(), TrackerError> {
        self.store.save_job(user_id, job_id)
    }

    pub fn saved_jobs(&self, user_id: UserId) -> Vec<Job> {
        self.store.saved_jobs(user_id)
    }
}
