//! Reference server configuration.

use user_api_types::STATUS_UP;

/// Reference server configuration.
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Status reported by the health endpoint (anything but "UP" answers 503)
    pub health_status: String,
    /// Answer DELETE with 200 and the removed record instead of 204
    pub delete_returns_entity: bool,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Store created users without their address
    pub drop_address: bool,
    /// Answer PUT with 200 and the stored record, leaving it unchanged
    pub ignore_updates: bool,
    /// Answer DELETE as usual but keep the record
    pub ignore_deletes: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            health_status: STATUS_UP.to_string(),
            delete_returns_entity: false,
            request_timeout_ms: 5000, // 5 seconds default
            drop_address: false,
            ignore_updates: false,
            ignore_deletes: false,
        }
    }
}
