//! User domain types.
//!
//! Signup records are persisted as JSON objects with the field names `name`,
//! `email` and `password`. The `password` field holds an argon2 PHC string,
//! never the password itself.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A persisted signup record.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name shown in the welcome notice.
    pub name: String,
    /// Identity key, unique across records.
    pub email: String,
    /// Argon2 PHC hash of the password.
    pub password: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login form fields.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(""),
        }
    }
}

/// Signup form fields.
#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm: SecretString,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(""),
            confirm: SecretString::from(""),
        }
    }
}
