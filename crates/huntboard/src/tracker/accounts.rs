use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use super::domain::{NewUser, UserId, UserView};
use super::resume;
use super::store::{TrackerError, TrackerStore};

/// Account registration, login, resume upkeep, and the simulated
/// external-profile link. Credentials are opaque strings compared
/// verbatim; real authentication is explicitly out of scope for this
/// system.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S> AccountService<S>
where
    S: TrackerStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn register(&self, user: NewUser) -> Result<UserView, TrackerError> {
        if user.username.trim().is_empty() || user.password.trim().is_empty() {
            return Err(TrackerError::Validation(
                "username and password required".to_string(),
            ));
        }

        let created = self.store.create_user(user)?;
        info!(user_id = created.id, "user registered");
        Ok(created.view())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<UserView, TrackerError> {
        let user = self
            .store
            .user_by_username(username)
            .filter(|user| user.password == password)
            .ok_or_else(|| TrackerError::Unauthorized("invalid credentials".to_string()))?;
        Ok(user.view())
    }

    pub fn current(&self, user_id: UserId) -> Result<UserView, TrackerError> {
        self.store
            .user(user_id)
            .map(|user| user.view())
            .ok_or(TrackerError::NotFound("user"))
    }

    /// Replace the stored resume and re-extract its skills. The skill
    /// set drives job match scoring and auto-apply eligibility.
    pub fn update_resume(&self, user_id: UserId, text: String) -> Result<UserView, TrackerError> {
        if text.trim().is_empty() {
            return Err(TrackerError::Validation(
                "resume text must not be empty".to_string(),
            ));
        }

        let skills = resume::extract_skills(&text);
        let user = self
            .store
            .update_resume(user_id, text, skills, Utc::now())?;
        info!(user_id, skills = user.resume_skills.len(), "resume updated");
        Ok(user.view())
    }

    /// Mock authorization URL for the external-profile flow. The state
    /// parameter only needs to be unique per request here, not
    /// cryptographically random.
    pub fn auth_url(&self) -> String {
        let state = format!("hb{}", Utc::now().timestamp_millis());
        format!(
            "https://profiles.example.com/oauth/authorize?response_type=code&client_id=huntboard&scope=r_profile&state={state}"
        )
    }

    /// Complete the simulated link: stores a canned token and profile
    /// payload, exactly like the mocked provider callback would.
    pub fn connect_profile(&self, user_id: UserId) -> Result<UserView, TrackerError> {
        let profile = json!({
            "id": "ext_123456789",
            "firstName": "Alex",
            "lastName": "Johnson",
            "email": "alex.johnson@example.com",
            "profilePicture": "https://example.com/avatar.jpg",
        });
        let user =
            self.store
                .set_profile_link(user_id, "simulated_access_token".to_string(), profile)?;
        info!(user_id, "external profile linked");
        Ok(user.view())
    }

    pub fn disconnect_profile(&self, user_id: UserId) -> Result<UserView, TrackerError> {
        let user = self.store.clear_profile_link(user_id)?;
        info!(user_id, "external profile unlinked");
        Ok(user.view())
    }
}
