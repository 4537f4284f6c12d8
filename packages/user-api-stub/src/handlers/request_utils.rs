//! Request utilities for HTTP endpoints.

use http_body_util::BodyExt;
use hyper::{body::Bytes, Request, Response};
use serde::Serialize;
use tokio::time;
use user_api_types::UserPayload;

use crate::error::StoreError;
use crate::router::RouterError;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout(
    req: Request<hyper::body::Incoming>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Parses a user JSON body.
pub fn parse_payload(body: &[u8]) -> Result<UserPayload, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Parses the `{id}` path parameter.
pub fn parse_user_id(raw: &str) -> Result<u64, RouterError> {
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid user ID '{}': {}", raw, e)))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error_to_router_error(e: StoreError) -> RouterError {
    match e {
        StoreError::NotFound { .. } => RouterError::NotFound(e.to_string()),
        StoreError::EmailConflict { .. } => RouterError::Conflict(e.to_string()),
        StoreError::Validation(_) => RouterError::BadRequest(e.to_string()),
    }
}

/// Serializes `value` and wraps it in a JSON response.
pub fn json_response<T: Serialize>(status: u16, value: &T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(value)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(matches!(parse_user_id("abc"), Err(RouterError::BadRequest(_))));
        assert!(matches!(parse_user_id("-1"), Err(RouterError::BadRequest(_))));
    }

    #[test]
    fn test_parse_payload_rejects_missing_fields() {
        let payload = parse_payload(br#"{"name":"A","email":"a@b.c"}"#).unwrap();
        assert_eq!(payload.address, "");
        assert!(matches!(
            parse_payload(br#"{"name":"A"}"#),
            Err(RouterError::BadRequest(_))
        ));
        assert!(parse_payload(b"not json").is_err());
    }

    #[test]
    fn test_store_errors_map_to_statuses() {
        let not_found = map_store_error_to_router_error(StoreError::NotFound { id: 1 });
        assert_eq!(not_found.status(), 404);
        let conflict = map_store_error_to_router_error(StoreError::EmailConflict {
            email: "a@b.c".to_string(),
        });
        assert_eq!(conflict.status(), 409);
        let invalid = map_store_error_to_router_error(StoreError::Validation("x".to_string()));
        assert_eq!(invalid.status(), 400);
    }
}
