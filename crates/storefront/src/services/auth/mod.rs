//! Authentication service.
//!
//! Signup, login and logout against records kept in local storage. The user
//! list lives under [`keys::USERS`] and only ever grows; the logged-in user
//! lives under [`keys::CURRENT_USER`]. The two keys are written
//! independently.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::models::user::{LoginForm, SignupForm, UserRecord};
use crate::storage::{LocalStorage, keys};

/// Authentication service over a local storage backend.
pub struct AuthService<'a, S: LocalStorage + ?Sized> {
    storage: &'a mut S,
}

impl<'a, S: LocalStorage + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(storage: &'a mut S) -> Self {
        Self { storage }
    }

    /// All signup records, in signup order.
    ///
    /// A missing key means nobody has signed up yet.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be read, or
    /// `AuthError::Serialization` if the stored list is not valid JSON.
    pub fn users(&self) -> Result<Vec<UserRecord>, AuthError> {
        match self.storage.get_item(keys::USERS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// The logged-in user, if any.
    ///
    /// A pointer that no longer parses is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be read.
    pub fn current_user(&self) -> Result<Option<UserRecord>, AuthError> {
        let Some(raw) = self.storage.get_item(keys::CURRENT_USER)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable current user pointer: {e}");
                Ok(None)
            }
        }
    }

    /// Register a new user.
    ///
    /// The email is stored exactly as typed and is not validated. The new
    /// user is not logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if password and confirmation differ.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn signup(&mut self, form: &SignupForm) -> Result<UserRecord, AuthError> {
        if form.password.expose_secret() != form.confirm.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == form.email) {
            return Err(AuthError::EmailTaken);
        }

        let record = UserRecord {
            name: form.name.clone(),
            email: form.email.clone(),
            password: hash_password(form.password.expose_secret())?,
        };
        users.push(record.clone());
        self.storage
            .set_item(keys::USERS, &serde_json::to_string(&users)?)?;

        tracing::info!(users = users.len(), "User signed up");
        Ok(record)
    }

    /// Log in with email and password.
    ///
    /// Email comparison is exact: case-sensitive and without trimming.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no record has this email or
    /// the password does not verify.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn login(&mut self, form: &LoginForm) -> Result<UserRecord, AuthError> {
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.email == form.email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(form.password.expose_secret(), &user.password)?;

        self.storage
            .set_item(keys::CURRENT_USER, &serde_json::to_string(&user)?)?;

        tracing::info!("User logged in");
        Ok(user)
    }

    /// Clear the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be written.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove_item(keys::CURRENT_USER)?;
        tracing::info!("User logged out");
        Ok(())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A stored value that is not a PHC string never verifies.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::storage::MemoryStorage;

    fn signup_form(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.to_owned(),
            email: email.to_owned(),
            password: SecretString::from(password),
            confirm: SecretString::from(confirm),
        }
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_owned(),
            password: SecretString::from(password),
        }
    }

    #[test]
    fn test_signup_appends_record_without_logging_in() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);

        let record = auth.signup(&signup_form("A", "a@x.com", "p", "p")).unwrap();
        assert_eq!(record.name, "A");
        assert_eq!(record.email, "a@x.com");
        assert_ne!(record.password, "p");

        let users = auth.users().unwrap();
        assert_eq!(users, vec![record]);
        assert!(auth.current_user().unwrap().is_none());
    }

    #[test]
    fn test_signup_password_mismatch() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);

        let err = auth.signup(&signup_form("A", "a@x.com", "p", "q")).unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert!(auth.users().unwrap().is_empty());
    }

    #[test]
    fn test_signup_duplicate_email() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);

        auth.signup(&signup_form("A", "a@x.com", "p", "p")).unwrap();
        let err = auth.signup(&signup_form("B", "a@x.com", "z", "z")).unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(auth.users().unwrap().len(), 1);
    }

    #[test]
    fn test_signup_keeps_email_as_typed() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);

        let record = auth.signup(&signup_form("A", "barista", "p", "p")).unwrap();
        assert_eq!(record.email, "barista");

        let padded = auth.signup(&signup_form("B", " b@x.com", "p", "p")).unwrap();
        assert_eq!(padded.email, " b@x.com");
        let plain = auth.signup(&signup_form("C", "b@x.com", "p", "p")).unwrap();
        assert_eq!(plain.email, "b@x.com");

        let emails: Vec<String> = auth.users().unwrap().into_iter().map(|u| u.email).collect();
        assert_eq!(emails, vec!["barista", " b@x.com", "b@x.com"]);
    }

    #[test]
    fn test_login_requires_exact_match() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);
        auth.signup(&signup_form("A", "a@x.com", "p", "p")).unwrap();

        for (email, password) in [
            ("a@x.com", "wrong"),
            ("A@x.com", "p"),
            ("b@x.com", "p"),
            ("  a@x.com  ", "p"),
            ("a@x.com ", "p"),
        ] {
            let err = auth.login(&login_form(email, password)).unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert!(auth.current_user().unwrap().is_none());

        let user = auth.login(&login_form("a@x.com", "p")).unwrap();
        assert_eq!(user.name, "A");
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[test]
    fn test_logout_clears_pointer() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthService::new(&mut storage);
        auth.signup(&signup_form("A", "a@x.com", "p", "p")).unwrap();
        auth.login(&login_form("a@x.com", "p")).unwrap();

        auth.logout().unwrap();
        assert!(auth.current_user().unwrap().is_none());
        assert_eq!(auth.users().unwrap().len(), 1);
    }

    #[test]
    fn test_plaintext_record_never_verifies() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                keys::USERS,
                r#"[{"name":"A","email":"a@x.com","password":"p"}]"#,
            )
            .unwrap();
        let mut auth = AuthService::new(&mut storage);

        let err = auth.login(&login_form("a@x.com", "p")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_unreadable_current_user_is_anonymous() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::CURRENT_USER, "{broken").unwrap();
        let auth = AuthService::new(&mut storage);
        assert!(auth.current_user().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_user_list_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::USERS, "nope").unwrap();
        let auth = AuthService::new(&mut storage);
        assert!(matches!(auth.users(), Err(AuthError::Serialization(_))));
    }
}
