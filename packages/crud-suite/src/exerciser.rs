//! Per-endpoint checks with console reporting.
//!
//! Every operation here swallows its error: it prints what happened and
//! hands back an absence value (`None`, an empty list, `false` or
//! [`Lookup::Failed`]) so the suite can carry on.

use user_api_client::{ClientError, Console, UserApiClient};
use user_api_types::{UserPayload, UserRecord};

/// Result of reading one user by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// 200 with a decodable record
    Found(UserRecord),
    /// 404
    NotFound,
    /// Transport error, unexpected status or undecodable body
    Failed,
}

impl Lookup {
    pub fn found(self) -> Option<UserRecord> {
        match self {
            Lookup::Found(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }
}

/// Wraps a [`UserApiClient`] with the harness's reporting conventions.
#[derive(Debug, Clone)]
pub struct Exerciser {
    client: UserApiClient,
}

impl Exerciser {
    pub fn new(client: UserApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &UserApiClient {
        &self.client
    }

    pub fn console(&self) -> &Console {
        self.client.console()
    }

    /// Probes the health endpoint; true iff 200 with status UP.
    pub async fn check_health(&self) -> bool {
        let console = self.console();
        console.info("Testing health endpoint...");
        match self.client.health().await {
            Ok(_) => {
                console.pass("Health check passed");
                true
            }
            Err(ClientError::Unhealthy { status }) => {
                console.fail(format!("Health check failed - status is {}, not UP", status));
                false
            }
            Err(ClientError::UnexpectedStatus { status }) => {
                console.fail(format!("Health check failed with status code {}", status));
                false
            }
            Err(e) => {
                console.fail(format!("Health check failed with error: {}", e));
                false
            }
        }
    }

    /// Creates a user; `None` unless the server answered 201.
    pub async fn create_user(&self, payload: &UserPayload) -> Option<UserRecord> {
        self.console()
            .info(format!("Testing CREATE user: {}", payload.name));
        match self.client.create_user(payload).await {
            Ok(user) => {
                self.console()
                    .pass(format!("User created successfully with ID: {}", user.id));
                Some(user)
            }
            Err(e) => {
                self.report_failure("create user", &e);
                None
            }
        }
    }

    /// Lists all users; empty on any failure.
    pub async fn list_users(&self) -> Vec<UserRecord> {
        self.console().info("Testing GET all users");
        match self.client.list_users().await {
            Ok(users) => {
                self.console()
                    .pass(format!("Retrieved {} users", users.len()));
                users
            }
            Err(e) => {
                self.report_failure("get users", &e);
                Vec::new()
            }
        }
    }

    /// Reads one user, keeping 404 distinct from other failures.
    pub async fn get_user(&self, id: u64) -> Lookup {
        self.console()
            .info(format!("Testing GET user by ID: {}", id));
        match self.client.get_user(id).await {
            Ok(user) => {
                self.console()
                    .pass(format!("Retrieved user with ID: {}", user.id));
                Lookup::Found(user)
            }
            Err(e) if e.is_not_found() => {
                self.report_failure("get user", &e);
                Lookup::NotFound
            }
            Err(e) => {
                self.report_failure("get user", &e);
                Lookup::Failed
            }
        }
    }

    /// Replaces a user; `None` unless the server answered 200.
    pub async fn update_user(&self, id: u64, payload: &UserPayload) -> Option<UserRecord> {
        self.console()
            .info(format!("Testing UPDATE user with ID: {}", id));
        match self.client.update_user(id, payload).await {
            Ok(user) => {
                self.console()
                    .pass(format!("User updated successfully with ID: {}", user.id));
                Some(user)
            }
            Err(e) => {
                self.report_failure("update user", &e);
                None
            }
        }
    }

    /// Deletes a user; true on 200 or 204.
    pub async fn delete_user(&self, id: u64) -> bool {
        self.console()
            .info(format!("Testing DELETE user with ID: {}", id));
        match self.client.delete_user(id).await {
            Ok(()) => {
                self.console()
                    .pass(format!("User with ID {} deleted successfully", id));
                true
            }
            Err(e) => {
                self.report_failure("delete user", &e);
                false
            }
        }
    }

    fn report_failure(&self, action: &str, err: &ClientError) {
        let console = self.console();
        match err {
            ClientError::NotFound { id } => {
                console.fail(format!("User with ID {} not found", id));
            }
            ClientError::UnexpectedStatus { status } => {
                console.fail(format!("Failed to {}. Status code: {}", action, status));
            }
            other => {
                tracing::debug!(action, error = %other, "operation failed");
                console.fail(format!("Failed to {} with error: {}", action, other));
            }
        }
    }
}
