//! Job-search tracking core: accounts, job boards and listings, the
//! application lifecycle, interview practice, and the badge rule
//! engine, all over a single pluggable entity store.
//!
//! The store is deliberately in-memory; every aggregate (stats,
//! leaderboards, the daily question) is recomputed from it on demand
//! rather than cached.

pub mod accounts;
pub mod applications;
pub mod badges;
pub mod boards;
pub mod domain;
pub mod questions;
pub mod resume;
pub mod router;
pub mod scraper;
pub mod seed;
pub mod store;

#[cfg(test)]
mod tests;

pub use accounts::AccountService;
pub use applications::ApplicationService;
pub use badges::{install_catalog, BadgeEngine};
pub use boards::{BoardService, JobPage, JobQuery, SyncOutcome};
pub use domain::{
    Application, ApplicationDetail, ApplicationStats, ApplicationStatus, Badge, BadgeCategory,
    BadgeSpec, DailyQuestion, InterviewQuestion, Job, JobSource, QuestionAnswer, QuestionThread,
    RecentAnswer, TopContributor, User, UserBadge, UserBadgeDetail, UserView,
};
pub use questions::InterviewService;
pub use router::{tracker_router, CallerIdentity, TrackerState};
pub use store::{MemoryStore, TrackerError, TrackerStore};
