//! User record definitions.

use serde::{Deserialize, Deserializer, Serialize};

/// A user as stored and returned by the server.
///
/// The `id` is assigned by the server on creation and is opaque to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// Postal address (empty when the server returns none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

impl UserRecord {
    /// Builds a record from a payload and an assigned id.
    pub fn from_payload(id: u64, payload: UserPayload) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
            address: payload.address,
        }
    }

    /// Returns true when name, email and address equal the payload's.
    pub fn matches(&self, payload: &UserPayload) -> bool {
        self.name == payload.name && self.email == payload.email && self.address == payload.address
    }

    /// Copies the user-editable fields back out as a payload.
    pub fn to_payload(&self) -> UserPayload {
        UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

/// Body of a create (POST) or full replacement (PUT) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
}

impl UserPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
