//! Sequential CRUD exerciser for a users REST API.
//!
//! Runs a fixed scenario against a live server:
//! - Health probe (aborts the run on failure)
//! - Create, list and read back synthetic users
//! - Update every created user and verify the change
//! - Delete every second user and re-count
//! - Probe a nonexistent id with get, update and delete
//!
//! Results are reported on the console; the returned [`SuiteSummary`] carries
//! the same counts for programmatic callers.

pub mod config;
pub mod error;
pub mod exerciser;
pub mod generator;
pub mod suite;

pub use config::SuiteConfig;
pub use error::SuiteAbort;
pub use exerciser::{Exerciser, Lookup};
pub use suite::{Suite, SuiteSummary};
