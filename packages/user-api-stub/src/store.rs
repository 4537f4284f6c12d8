//! In-memory user storage.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use user_api_types::{UserPayload, UserRecord};

use crate::error::StoreError;

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 100;
/// Maximum email length in characters
pub const MAX_EMAIL_LEN: usize = 150;
/// Maximum address length in characters
pub const MAX_ADDRESS_LEN: usize = 200;

/// Thread-safe user table keyed by id.
///
/// Ids are assigned from 1 upwards and never reused, even after deletion.
/// Emails are unique across stored users.
#[derive(Debug)]
pub struct UserStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    users: BTreeMap<u64, UserRecord>,
    next_id: u64,
}

impl StoreInner {
    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                users: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns all users ordered by id.
    pub fn list(&self) -> Vec<UserRecord> {
        self.inner.read().users.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u64) -> Result<UserRecord, StoreError> {
        self.inner
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Validates and inserts a new user, assigning the next id.
    ///
    /// # Errors
    /// - `StoreError::Validation` if a field violates its constraints
    /// - `StoreError::EmailConflict` if the email is already in use
    pub fn create(&self, payload: UserPayload) -> Result<UserRecord, StoreError> {
        validate(&payload)?;

        let mut inner = self.inner.write();
        if inner.email_taken(&payload.email, None) {
            return Err(StoreError::EmailConflict {
                email: payload.email,
            });
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let user = UserRecord::from_payload(id, payload);
        inner.users.insert(id, user.clone());
        tracing::debug!(id, "user created");
        Ok(user)
    }

    /// Replaces name, email and address of an existing user.
    ///
    /// # Errors
    /// - `StoreError::Validation` if a field violates its constraints
    /// - `StoreError::NotFound` if no user has this id
    /// - `StoreError::EmailConflict` if the email changes to one owned by
    ///   another user
    pub fn update(&self, id: u64, payload: UserPayload) -> Result<UserRecord, StoreError> {
        validate(&payload)?;

        let mut inner = self.inner.write();
        if !inner.users.contains_key(&id) {
            return Err(StoreError::NotFound { id });
        }
        if inner.email_taken(&payload.email, Some(id)) {
            return Err(StoreError::EmailConflict {
                email: payload.email,
            });
        }

        let user = UserRecord::from_payload(id, payload);
        inner.users.insert(id, user.clone());
        tracing::debug!(id, "user updated");
        Ok(user)
    }

    /// Removes a user and returns it.
    pub fn delete(&self, id: u64) -> Result<UserRecord, StoreError> {
        let removed = self
            .inner
            .write()
            .users
            .remove(&id)
            .ok_or(StoreError::NotFound { id })?;
        tracing::debug!(id, "user deleted");
        Ok(removed)
    }
}

/// Checks a payload against the field constraints.
///
/// All violations are reported together, separated by `"; "`.
pub fn validate(payload: &UserPayload) -> Result<(), StoreError> {
    let mut violations = Vec::new();

    if payload.name.trim().is_empty() {
        violations.push("Name is required".to_string());
    } else if payload.name.chars().count() > MAX_NAME_LEN {
        violations.push(format!("Name must not exceed {} characters", MAX_NAME_LEN));
    }

    if payload.email.trim().is_empty() {
        violations.push("Email is required".to_string());
    } else {
        if !is_valid_email(&payload.email) {
            violations.push("Email should be valid".to_string());
        }
        if payload.email.chars().count() > MAX_EMAIL_LEN {
            violations.push(format!(
                "Email must not exceed {} characters",
                MAX_EMAIL_LEN
            ));
        }
    }

    if payload.address.chars().count() > MAX_ADDRESS_LEN {
        violations.push(format!(
            "Address must not exceed {} characters",
            MAX_ADDRESS_LEN
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(violations.join("; ")))
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(n: u32) -> UserPayload {
        UserPayload::new(
            format!("User {}", n),
            format!("user{}@example.com", n),
            "1 Main St",
        )
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = UserStore::new();
        let a = store.create(payload(1)).unwrap();
        let b = store.create(payload(2)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = UserStore::new();
        let a = store.create(payload(1)).unwrap();
        store.delete(a.id).unwrap();
        let b = store.create(payload(2)).unwrap();
        assert_eq!(b.id, 2);
        assert!(store.get(a.id).is_err());
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = UserStore::new();
        store.create(payload(1)).unwrap();
        let err = store.create(payload(1)).unwrap_err();
        assert_eq!(
            err,
            StoreError::EmailConflict {
                email: "user1@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_update_keeps_own_email_but_rejects_others() {
        let store = UserStore::new();
        let a = store.create(payload(1)).unwrap();
        store.create(payload(2)).unwrap();

        let mut same_email = payload(1);
        same_email.name = "Renamed".to_string();
        let updated = store.update(a.id, same_email).unwrap();
        assert_eq!(updated.name, "Renamed");

        let err = store.update(a.id, payload(2)).unwrap_err();
        assert!(matches!(err, StoreError::EmailConflict { .. }));
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let store = UserStore::new();
        assert_eq!(store.get(999999), Err(StoreError::NotFound { id: 999999 }));
        assert_eq!(
            store.update(999999, payload(1)),
            Err(StoreError::NotFound { id: 999999 })
        );
        assert_eq!(store.delete(999999), Err(StoreError::NotFound { id: 999999 }));
    }

    #[test]
    fn test_validation_rules() {
        assert!(validate(&payload(1)).is_ok());
        assert!(validate(&UserPayload::new("A", "a@b.com", "")).is_ok());

        let blank_name = UserPayload::new("  ", "a@b.com", "");
        assert!(matches!(validate(&blank_name), Err(StoreError::Validation(_))));

        let long_name = UserPayload::new("x".repeat(101), "a@b.com", "");
        assert!(validate(&long_name).is_err());

        for email in ["", "plain", "@b.com", "a@", "a@b@c", "a b@c.com"] {
            let bad = UserPayload::new("A", email, "");
            assert!(validate(&bad).is_err(), "{:?} should be rejected", email);
        }

        let long_address = UserPayload::new("A", "a@b.com", "x".repeat(201));
        assert!(validate(&long_address).is_err());
    }

    #[test]
    fn test_validation_reports_every_violation() {
        let bad = UserPayload::new("", "", "x".repeat(201));
        match validate(&bad) {
            Err(StoreError::Validation(msg)) => {
                assert!(msg.contains("Name is required"));
                assert!(msg.contains("Email is required"));
                assert!(msg.contains("Address must not exceed 200 characters"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let store = UserStore::new();
        for n in 1..=5 {
            store.create(payload(n)).unwrap();
        }
        store.delete(3).unwrap();
        let ids: Vec<u64> = store.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }
}
