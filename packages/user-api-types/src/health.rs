//! Health endpoint body.

use serde::{Deserialize, Serialize};

/// Status value reported by a healthy service.
pub const STATUS_UP: &str = "UP";

/// Body of `GET /actuator/health`.
///
/// Only `status` is interpreted; any other component details are kept
/// verbatim in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            details: serde_json::Map::new(),
        }
    }

    /// Returns true when the service reports `UP`.
    pub fn is_up(&self) -> bool {
        self.status == STATUS_UP
    }
}
