//! Health endpoint handler.

use hyper::{body::Bytes, Response};
use user_api_types::HealthStatus;

use super::request_utils::json_response;
use crate::router::{AppState, RouterError};

/// Reports service health.
///
/// # Endpoint
/// `GET /actuator/health`
///
/// # Response
/// - **200 OK** when the configured status is `UP`
/// - **503 Service Unavailable** for any other status
/// ```json
/// {
///   "status": "UP"
/// }
/// ```
pub async fn health(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let health = HealthStatus::new(state.config.health_status.clone());
    let status = if health.is_up() { 200 } else { 503 };
    json_response(status, &health)
}
