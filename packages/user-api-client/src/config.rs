//! Client configuration.

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the server (e.g. `http://localhost:8080`)
    pub base_url: String,
    /// Path of the users collection
    pub users_path: String,
    /// Path of the health endpoint
    pub health_path: String,
    /// Per-request timeout in milliseconds (None = library default)
    pub timeout_ms: Option<u64>,
    /// Suppress request/response dumps
    pub quiet: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            users_path: "/api/users".to_string(),
            health_path: "/actuator/health".to_string(),
            timeout_ms: None,
            quiet: false,
        }
    }
}

impl ClientConfig {
    /// Returns a default configuration pointed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
