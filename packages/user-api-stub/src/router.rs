//! Matchit routing configuration.

use std::sync::Arc;

use hyper::{body::Bytes, Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::config::StubConfig;
use crate::handlers;
use crate::store::UserStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// User storage
    pub store: Arc<UserStore>,
    /// Server configuration
    pub config: Arc<StubConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the users and health routes.
    pub fn new(store: Arc<UserStore>, config: Arc<StubConfig>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/actuator/health", RouteHandler::Health)
            .expect("Failed to insert /actuator/health route");

        // User CRUD endpoints
        router
            .insert("/api/users", RouteHandler::Users)
            .expect("Failed to insert /api/users route");
        router
            .insert("/api/users/{id}", RouteHandler::User)
            .expect("Failed to insert /api/users/{id} route");

        Self {
            inner: router,
            state: AppState { store, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// # Returns
    /// `Result<Response<Bytes>, RouterError>` containing the response or an error.
    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
    ) -> Result<Response<Bytes>, RouterError> {
        let path = req.uri().path().to_string();

        let (handler, id) = match self.inner.at(&path) {
            Ok(matched) => (
                *matched.value,
                matched.params.get("id").map(|id| id.to_string()),
            ),
            Err(_) => {
                return Err(RouterError::NotFound(format!(
                    "No route found for {}",
                    path
                )))
            }
        };

        handler.handle(req, id, self.state.clone()).await
    }
}

/// Route handler function.
#[derive(Debug, Clone, Copy)]
enum RouteHandler {
    Health,
    Users,
    User,
}

impl RouteHandler {
    /// Handles a request with the given `{id}` path parameter.
    async fn handle(
        &self,
        req: Request<hyper::body::Incoming>,
        id: Option<String>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        let method = req.method().clone();
        match (self, id) {
            (RouteHandler::Health, _) if method == Method::GET => handlers::health(state).await,
            (RouteHandler::Users, _) if method == Method::GET => {
                handlers::list_users(state).await
            }
            (RouteHandler::Users, _) if method == Method::POST => {
                handlers::create_user(req, state).await
            }
            (RouteHandler::User, Some(id)) if method == Method::GET => {
                handlers::read_user(&id, state).await
            }
            (RouteHandler::User, Some(id)) if method == Method::PUT => {
                handlers::update_user(req, &id, state).await
            }
            (RouteHandler::User, Some(id)) if method == Method::DELETE => {
                handlers::delete_user(&id, state).await
            }
            _ => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl RouterError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
            RouterError::Conflict(_) => 409,
        }
    }
}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let message = match &err {
            RouterError::MethodNotAllowed => "Method Not Allowed".to_string(),
            RouterError::Timeout => "Request Timeout".to_string(),
            RouterError::InternalError(msg)
            | RouterError::BadRequest(msg)
            | RouterError::NotFound(msg)
            | RouterError::Conflict(msg) => msg.clone(),
        };

        let error_response = handlers::error_response(status, message, None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
