//! Synthetic user data.
//!
//! Names and emails embed the creation index and a millisecond timestamp so
//! every user created in one run has a distinct email.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use user_api_types::{UserPayload, UserRecord};

/// Prefix added to name and address by the update phase.
pub const UPDATED_PREFIX: &str = "Updated ";
/// Prefix added to the email by the update phase.
pub const UPDATED_EMAIL_PREFIX: &str = "updated_";

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random string of lowercase letters and digits.
pub fn random_string<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Current Unix time in milliseconds.
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Generates the user for creation slot `index`, stamped with the current time.
pub fn generate_user<R: Rng>(index: usize, rng: &mut R) -> UserPayload {
    generate_user_at(index, timestamp_millis(), rng)
}

/// Generates the user for creation slot `index` with an explicit timestamp.
pub fn generate_user_at<R: Rng>(index: usize, timestamp: u128, rng: &mut R) -> UserPayload {
    let number: u16 = rng.gen_range(100..=999);
    let street = random_string(rng, 10);
    let city = random_string(rng, 8);
    UserPayload {
        name: format!("Test User {} {}", index, timestamp),
        email: format!("testuser{}_{}@example.com", index, timestamp),
        address: format!("{} {} St, {} City", number, street, city),
    }
}

/// Full replacement body used by the update phase.
pub fn updated_payload(user: &UserRecord) -> UserPayload {
    UserPayload {
        name: format!("{}{}", UPDATED_PREFIX, user.name),
        email: format!("{}{}", UPDATED_EMAIL_PREFIX, user.email),
        address: format!("{}{}", UPDATED_PREFIX, user.address),
    }
}

/// True when a name carries the update-phase prefix.
pub fn has_update_prefix(name: &str) -> bool {
    name.starts_with(UPDATED_PREFIX)
}

/// Body sent by the negative update probe.
pub fn missing_user_payload() -> UserPayload {
    UserPayload::new("Non-existent User", "nonexistent@example.com", "123 Fake St")
}
