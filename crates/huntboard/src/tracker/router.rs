use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::accounts::AccountService;
use super::applications::ApplicationService;
use super::badges::BadgeEngine;
use super::boards::{BoardService, JobQuery};
use super::domain::{AnswerId, ApplicationId, JobId, NewUser, QuestionId, SourceId, UserId};
use super::questions::InterviewService;
use super::store::{TrackerError, TrackerStore};

/// Shared handler state composing the domain services over one store.
pub struct TrackerState<S> {
    pub accounts: AccountService<S>,
    pub boards: BoardService<S>,
    pub applications: ApplicationService<S>,
    pub interviews: InterviewService<S>,
    pub badges: BadgeEngine<S>,
}

impl<S> TrackerState<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            accounts: AccountService::new(store.clone()),
            boards: BoardService::new(store.clone()),
            applications: ApplicationService::new(store.clone()),
            interviews: InterviewService::new(store.clone()),
            badges: BadgeEngine::new(store),
        }
    }
}

/// Caller identity, supplied by the fronting authentication layer as
/// an `x-user-id` header. The core never manages sessions itself.
pub struct CallerIdentity(pub UserId);

#[axum::async_trait]
impl<St: Send + Sync> FromRequestParts<St> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get("x-user-id").ok_or_else(|| {
            AppError::Tracker(TrackerError::Unauthorized(
                "missing x-user-id header".to_string(),
            ))
        })?;
        let user_id = header
            .to_str()
            .ok()
            .and_then(|value| value.parse::<UserId>().ok())
            .ok_or_else(|| {
                AppError::Tracker(TrackerError::Unauthorized(
                    "malformed x-user-id header".to_string(),
                ))
            })?;
        Ok(CallerIdentity(user_id))
    }
}

/// Router builder exposing the tracker's HTTP surface.
pub fn tracker_router<S>(state: Arc<TrackerState<S>>) -> Router
where
    S: TrackerStore + 'static,
{
    Router::new()
        .route("/api/auth/register", post(register_handler::<S>))
        .route("/api/auth/login", post(login_handler::<S>))
        .route("/api/user/current", get(current_user_handler::<S>))
        .route("/api/user/resume", put(update_resume_handler::<S>))
        .route("/api/profile/auth-url", get(auth_url_handler::<S>))
        .route("/api/profile/connect", post(connect_profile_handler::<S>))
        .route(
            "/api/profile/disconnect",
            post(disconnect_profile_handler::<S>),
        )
        .route(
            "/api/job-sources",
            get(list_sources_handler::<S>).post(add_source_handler::<S>),
        )
        .route("/api/job-sources/:id/sync", post(sync_source_handler::<S>))
        .route("/api/job-sources/:id", delete(delete_source_handler::<S>))
        .route("/api/jobs", get(list_jobs_handler::<S>))
        .route("/api/jobs/search", get(search_jobs_handler::<S>))
        .route("/api/jobs/saved", get(saved_jobs_handler::<S>))
        .route("/api/jobs/:id/save", post(save_job_handler::<S>))
        .route("/api/jobs/:id/apply", post(auto_apply_handler::<S>))
        .route("/api/jobs/:id/match", get(job_match_handler::<S>))
        .route(
            "/api/applications",
            get(list_applications_handler::<S>).post(create_application_handler::<S>),
        )
        .route("/api/applications/stats", get(application_stats_handler::<S>))
        .route("/api/applications/:id", patch(update_application_handler::<S>))
        .route("/api/interview-questions", get(list_questions_handler::<S>))
        .route(
            "/api/interview-questions/daily",
            get(daily_question_handler::<S>),
        )
        .route(
            "/api/interview-questions/answers",
            post(submit_answer_handler::<S>),
        )
        .route(
            "/api/interview-questions/answers/:id/upvote",
            post(upvote_answer_handler::<S>),
        )
        .route(
            "/api/interview-questions/:id/bookmark",
            post(bookmark_question_handler::<S>),
        )
        .route(
            "/api/community/top-contributors",
            get(top_contributors_handler::<S>),
        )
        .route(
            "/api/community/recent-answers",
            get(recent_answers_handler::<S>),
        )
        .route("/api/badges", get(list_badges_handler::<S>))
        .route("/api/badges/user", get(user_badges_handler::<S>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct AddSourceRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResumeRequest {
    resume_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateApplicationRequest {
    job_id: JobId,
}

#[derive(Debug, Deserialize)]
struct UpdateApplicationRequest {
    status: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerRequest {
    question_id: QuestionId,
    answer: String,
}

#[derive(Debug, Deserialize)]
struct ListJobsQuery {
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchJobsQuery {
    query: Option<String>,
    location: Option<String>,
    filter: Option<String>,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ListQuestionsQuery {
    field: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListApplicationsQuery {
    status: Option<String>,
}

async fn register_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts.register(payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.accounts.login(&payload.username, &payload.password)?;
    Ok(Json(user))
}

async fn current_user_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.accounts.current(user_id)?))
}

async fn update_resume_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<UpdateResumeRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        state.accounts.update_resume(user_id, payload.resume_text)?,
    ))
}

async fn auth_url_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
) -> impl IntoResponse {
    Json(json!({ "authUrl": state.accounts.auth_url() }))
}

async fn connect_profile_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.accounts.connect_profile(user_id)?))
}

async fn disconnect_profile_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<impl IntoResponse, AppError> {
    state.accounts.disconnect_profile(user_id)?;
    Ok(Json(json!({ "success": true })))
}

async fn list_sources_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> impl IntoResponse {
    Json(state.boards.sources(user_id))
}

async fn add_source_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<AddSourceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let source = state.boards.add_source(user_id, &payload.url)?;
    Ok((StatusCode::CREATED, Json(source)))
}

async fn sync_source_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Path(source_id): Path<SourceId>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.boards.sync_source(source_id)?;
    Ok(Json(
        json!({ "success": true, "jobsCount": outcome.jobs_count }),
    ))
}

async fn delete_source_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Path(source_id): Path<SourceId>,
) -> Result<impl IntoResponse, AppError> {
    state.boards.delete_source(source_id)?;
    Ok(Json(json!({ "success": true })))
}

async fn list_jobs_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Query(query): Query<ListJobsQuery>,
) -> impl IntoResponse {
    Json(state.boards.jobs(query.filter.as_deref()))
}

async fn search_jobs_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Query(query): Query<SearchJobsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = state.boards.search(JobQuery {
        query: query.query,
        location: query.location,
        filter: query.filter,
        page: query.page.unwrap_or(1),
    })?;
    Ok(Json(page))
}

async fn saved_jobs_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> impl IntoResponse {
    Json(state.boards.saved_jobs(user_id))
}

async fn save_job_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, AppError> {
    state.boards.save_job(user_id, job_id)?;
    Ok(Json(json!({ "success": true })))
}

async fn auto_apply_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, AppError> {
    let application = state.applications.auto_apply(user_id, job_id)?;
    Ok((StatusCode::CREATED, Json(application)))
}

async fn job_match_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, AppError> {
    let score = state.boards.match_score(user_id, job_id)?;
    Ok(Json(json!({ "matchScore": score })))
}

async fn list_applications_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = query.status.as_deref().filter(|status| *status != "all");
    Ok(Json(state.applications.list(user_id, status)?))
}

async fn create_application_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<CreateApplicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let application = state.applications.create(user_id, payload.job_id)?;
    Ok((StatusCode::CREATED, Json(application)))
}

async fn update_application_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Path(application_id): Path<ApplicationId>,
    Json(payload): Json<UpdateApplicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let application =
        state
            .applications
            .update_status(application_id, &payload.status, payload.notes)?;
    Ok(Json(application))
}

async fn application_stats_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> impl IntoResponse {
    Json(state.applications.stats(user_id))
}

async fn list_questions_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Query(query): Query<ListQuestionsQuery>,
) -> impl IntoResponse {
    let field = query.field.as_deref().unwrap_or("frontend");
    let category = query.category.as_deref().unwrap_or("all");
    Json(state.interviews.list(user_id, field, category))
}

async fn daily_question_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.interviews.daily(user_id)?))
}

async fn submit_answer_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer = state
        .interviews
        .submit_answer(user_id, payload.question_id, payload.answer)?;
    Ok((StatusCode::CREATED, Json(answer)))
}

async fn upvote_answer_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    Path(answer_id): Path<AnswerId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.interviews.upvote_answer(answer_id)?))
}

async fn bookmark_question_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
    Path(question_id): Path<QuestionId>,
) -> Result<impl IntoResponse, AppError> {
    state.interviews.bookmark(user_id, question_id)?;
    Ok(Json(json!({ "success": true })))
}

async fn top_contributors_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
) -> impl IntoResponse {
    Json(state.interviews.top_contributors())
}

async fn recent_answers_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
) -> impl IntoResponse {
    Json(state.interviews.recent_answers())
}

async fn list_badges_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
) -> impl IntoResponse {
    Json(state.badges.catalog())
}

async fn user_badges_handler<S: TrackerStore>(
    State(state): State<Arc<TrackerState<S>>>,
    CallerIdentity(user_id): CallerIdentity,
) -> impl IntoResponse {
    Json(json!({ "badges": state.badges.badges_for_user(user_id) }))
}
