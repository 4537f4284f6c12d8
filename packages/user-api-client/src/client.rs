//! Typed client for the users API.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use user_api_types::{HealthStatus, UserPayload, UserRecord};

use crate::config::ClientConfig;
use crate::console::Console;
use crate::error::{ClientError, Result};
use crate::exchange::Exchange;

/// HTTP client bound to one server's users collection and health endpoint.
///
/// Every completed exchange is printed through the client's [`Console`]
/// before its status is interpreted, so failed calls are reported as fully
/// as successful ones.
#[derive(Debug, Clone)]
pub struct UserApiClient {
    http: reqwest::Client,
    users_url: String,
    health_url: String,
    console: Console,
}

impl UserApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidUrl` if the base URL and paths do not form
    /// valid URLs, or `ClientError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let users_url = join_url(&config.base_url, &config.users_path)?;
        let health_url = join_url(&config.base_url, &config.health_path)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        Ok(Self {
            http: builder.build()?,
            users_url,
            health_url,
            console: Console::new(config.quiet),
        })
    }

    /// URL of the users collection.
    pub fn users_url(&self) -> &str {
        &self.users_url
    }

    /// URL of the health endpoint.
    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// URL of a single user.
    pub fn user_url(&self, id: u64) -> String {
        format!("{}/{}", self.users_url, id)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// `GET {health}`: 200 with `status == "UP"`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let exchange = self
            .send(Method::GET, self.health_url.clone(), None)
            .await?;
        expect_status(&exchange, &[StatusCode::OK])?;
        let health: HealthStatus = exchange.decode()?;
        if !health.is_up() {
            return Err(ClientError::Unhealthy {
                status: health.status,
            });
        }
        Ok(health)
    }

    /// `POST {users}`: 201 with the created record.
    pub async fn create_user(&self, payload: &UserPayload) -> Result<UserRecord> {
        let exchange = self
            .send(Method::POST, self.users_url.clone(), Some(payload))
            .await?;
        expect_status(&exchange, &[StatusCode::CREATED])?;
        exchange.decode()
    }

    /// `GET {users}`: 200 with every user.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let exchange = self.send(Method::GET, self.users_url.clone(), None).await?;
        expect_status(&exchange, &[StatusCode::OK])?;
        exchange.decode()
    }

    /// `GET {users}/{id}`: 200 with the record, 404 as `NotFound`.
    pub async fn get_user(&self, id: u64) -> Result<UserRecord> {
        let exchange = self.send(Method::GET, self.user_url(id), None).await?;
        expect_found(&exchange, id, &[StatusCode::OK])?;
        exchange.decode()
    }

    /// `PUT {users}/{id}`: 200 with the replaced record, 404 as `NotFound`.
    pub async fn update_user(&self, id: u64, payload: &UserPayload) -> Result<UserRecord> {
        let exchange = self
            .send(Method::PUT, self.user_url(id), Some(payload))
            .await?;
        expect_found(&exchange, id, &[StatusCode::OK])?;
        exchange.decode()
    }

    /// `DELETE {users}/{id}`: 200 or 204, 404 as `NotFound`.
    ///
    /// Both success codes are accepted so servers that return the deleted
    /// entity and servers that return no content are treated alike.
    pub async fn delete_user(&self, id: u64) -> Result<()> {
        let exchange = self.send(Method::DELETE, self.user_url(id), None).await?;
        expect_found(&exchange, id, &[StatusCode::OK, StatusCode::NO_CONTENT])
    }

    /// Sends one request and reads the full response.
    async fn send(
        &self,
        method: Method,
        url: String,
        payload: Option<&UserPayload>,
    ) -> Result<Exchange> {
        let mut request = self.http.request(method.clone(), &url);
        let payload = match payload {
            Some(payload) => {
                let value = serde_json::to_value(payload)?;
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .json(&value);
                Some(value)
            }
            None => None,
        };

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%method, %url, error = %e, "request failed before a response");
                return Err(e.into());
            }
        };
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        let exchange = Exchange {
            method,
            url,
            payload,
            status,
            headers,
            body,
            elapsed: started.elapsed(),
        };
        tracing::debug!(
            method = %exchange.method,
            url = %exchange.url,
            status = exchange.status.as_u16(),
            elapsed_ms = exchange.elapsed.as_millis() as u64,
            "exchange completed"
        );
        self.console.exchange(&exchange);
        Ok(exchange)
    }
}

fn expect_status(exchange: &Exchange, accepted: &[StatusCode]) -> Result<()> {
    if accepted.contains(&exchange.status) {
        Ok(())
    } else {
        Err(ClientError::UnexpectedStatus {
            status: exchange.status.as_u16(),
        })
    }
}

fn expect_found(exchange: &Exchange, id: u64, accepted: &[StatusCode]) -> Result<()> {
    if exchange.status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound { id });
    }
    expect_status(exchange, accepted)
}

fn join_url(base: &str, path: &str) -> Result<String> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let joined = joined.trim_end_matches('/').to_string();
    Url::parse(&joined).map_err(|e| ClientError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })?;
    Ok(joined)
}
