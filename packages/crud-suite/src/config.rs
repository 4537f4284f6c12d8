//! Suite configuration.

use std::time::Duration;

use user_api_client::ClientConfig;

/// Suite configuration.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Target server and reporting options
    pub client: ClientConfig,
    /// Number of synthetic users to create
    pub user_count: usize,
    /// Pause after each call in milliseconds
    pub pause_ms: u64,
    /// Id used for the negative-path probes
    pub missing_id: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            user_count: 10,
            pause_ms: 100,
            missing_id: 999_999,
        }
    }
}

impl SuiteConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}
