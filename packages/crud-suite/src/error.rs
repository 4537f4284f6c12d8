//! Conditions that stop a suite run early.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteAbort {
    /// Health endpoint unreachable, non-200, or not UP
    #[error("Health check failed")]
    HealthCheckFailed,

    /// Not a single user could be created
    #[error("No users were created successfully")]
    NothingCreated,
}
