//! HTTP client for the users CRUD API.
//!
//! Provides a typed wrapper around each endpoint, the error taxonomy used to
//! tell transport failures, unexpected statuses and expected absences apart,
//! and the console reporter that prints every request/response exchange.

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod exchange;

pub use client::UserApiClient;
pub use config::ClientConfig;
pub use console::Console;
pub use error::{ClientError, Result};
pub use exchange::Exchange;
