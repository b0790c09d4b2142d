//! Domain core for the huntboard job-search tracking service.
//!
//! The `tracker` module carries the entity store, the application
//! lifecycle, the statistics aggregator, and the badge rule engine,
//! along with the interview practice and job-board services built on
//! top of them. `config`, `telemetry`, and `error` supply the ambient
//! plumbing shared with the HTTP service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracker;
