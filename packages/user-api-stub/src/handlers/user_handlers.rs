//! User CRUD (Create, Read, Update, Delete) handlers.

use hyper::{body::Bytes, Request, Response};

use super::request_utils::{
    build_empty_response, json_response, map_store_error_to_router_error, parse_payload,
    parse_user_id, read_request_body_with_timeout,
};
use crate::error::StoreError;
use crate::router::{AppState, RouterError};

/// Lists every user.
///
/// # Endpoint
/// `GET /api/users`
///
/// # Response
/// - **200 OK**: JSON array of users ordered by id
/// ```json
/// [
///   {"id": 1, "name": "Jane Doe", "email": "jane@example.com", "address": "1 Main St"}
/// ]
/// ```
pub async fn list_users(state: AppState) -> Result<Response<Bytes>, RouterError> {
    json_response(200, &state.store.list())
}

/// Creates a user.
///
/// # Endpoint
/// `POST /api/users`
///
/// # Request Body
/// ```json
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "address": "1 Main St"
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored user including its assigned id
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON or a field constraint violation
/// - **409 Conflict**: Email already in use
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8080/api/users \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Jane Doe", "email": "jane@example.com", "address": "1 Main St"}'
/// ```
pub async fn create_user(
    req: Request<hyper::body::Incoming>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let body = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let mut payload = parse_payload(&body)?;
    if state.config.drop_address {
        payload.address.clear();
    }

    let user = state
        .store
        .create(payload)
        .map_err(map_store_error_to_router_error)?;

    json_response(201, &user)
}

/// Reads a user.
///
/// # Endpoint
/// `GET /api/users/{id}`
///
/// # Response
/// - **200 OK**: Returns the user
///
/// # Errors
/// - **400 Bad Request**: Non-numeric id
/// - **404 Not Found**: No user with this id
pub async fn read_user(id: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let id = parse_user_id(id)?;
    let user = state
        .store
        .get(id)
        .map_err(map_store_error_to_router_error)?;
    json_response(200, &user)
}

/// Replaces a user's name, email and address.
///
/// # Endpoint
/// `PUT /api/users/{id}`
///
/// # Request Body
/// Same shape as `POST /api/users`.
///
/// # Response
/// - **200 OK**: Returns the updated user
///
/// # Errors
/// - **400 Bad Request**: Non-numeric id, malformed JSON or a constraint violation
/// - **404 Not Found**: No user with this id, or the email belongs to
///   another user
pub async fn update_user(
    req: Request<hyper::body::Incoming>,
    id: &str,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_user_id(id)?;
    let body = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let payload = parse_payload(&body)?;

    if state.config.ignore_updates {
        let current = state
            .store
            .get(id)
            .map_err(map_store_error_to_router_error)?;
        return json_response(200, &current);
    }

    let user = state.store.update(id, payload).map_err(|e| match e {
        // Update conflicts surface as 404, only creation reports 409
        StoreError::EmailConflict { .. } => RouterError::NotFound(e.to_string()),
        other => map_store_error_to_router_error(other),
    })?;

    json_response(200, &user)
}

/// Deletes a user.
///
/// # Endpoint
/// `DELETE /api/users/{id}`
///
/// # Response
/// - **204 No Content**: User removed
/// - **200 OK**: User removed, body is the removed user (when the server is
///   configured with `delete_returns_entity`)
///
/// # Errors
/// - **400 Bad Request**: Non-numeric id
/// - **404 Not Found**: No user with this id
pub async fn delete_user(id: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let id = parse_user_id(id)?;
    let removed = if state.config.ignore_deletes {
        state.store.get(id)
    } else {
        state.store.delete(id)
    }
    .map_err(map_store_error_to_router_error)?;

    if state.config.delete_returns_entity {
        json_response(200, &removed)
    } else {
        build_empty_response(204)
    }
}
