//! Shared wire types for the users API.
//!
//! This crate defines the JSON shapes exchanged between the CRUD exerciser
//! and any server implementing `/api/users` and `/actuator/health`.

pub mod health;
pub mod user;

pub use health::{HealthStatus, STATUS_UP};
pub use user::{UserPayload, UserRecord};
