//! Login/signup modals and the header auth controls.
//!
//! The controller is a two-state machine, Anonymous or Authenticated, whose
//! state is read back from local storage after every transition. The header
//! controls (login button label and action, signup button visibility) are
//! derived from that state alone each time they are asked for.

use secrecy::SecretString;
use tracing::instrument;

use crate::models::user::{LoginForm, SignupForm, UserRecord};
use crate::services::auth::{AuthError, AuthService};
use crate::storage::LocalStorage;

/// The two auth modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Signup,
}

impl Modal {
    /// Resolve a `.switch-form` link target.
    #[must_use]
    pub fn from_href(href: &str) -> Option<Self> {
        match href {
            "#login" => Some(Self::Login),
            "#signup" => Some(Self::Signup),
            _ => None,
        }
    }
}

/// Login form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Signup form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
    Confirm,
}

/// What the login button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    OpenLogin,
    Logout,
}

/// Header auth controls, derived from current-user presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthControls {
    pub login_label: &'static str,
    pub login_action: LoginAction,
    pub signup_visible: bool,
}

impl AuthControls {
    /// Controls for the given current user.
    #[must_use]
    pub const fn for_user(user: Option<&UserRecord>) -> Self {
        if user.is_some() {
            Self {
                login_label: "Logout",
                login_action: LoginAction::Logout,
                signup_visible: false,
            }
        } else {
            Self {
                login_label: "Login",
                login_action: LoginAction::OpenLogin,
                signup_visible: true,
            }
        }
    }
}

/// Result of clicking the login button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginControlOutcome {
    OpenedLogin,
    LoggedOut,
}

/// Auth UI state plus the storage it persists to.
#[derive(Debug)]
pub struct AuthController<S: LocalStorage> {
    storage: S,
    current_user: Option<UserRecord>,
    login_open: bool,
    signup_open: bool,
    login_form: LoginForm,
    signup_form: SignupForm,
}

impl<S: LocalStorage> AuthController<S> {
    /// Load the initial state from storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be read.
    pub fn load(mut storage: S) -> Result<Self, AuthError> {
        let current_user = AuthService::new(&mut storage).current_user()?;
        Ok(Self {
            storage,
            current_user,
            login_open: false,
            signup_open: false,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
        })
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }

    /// Header controls for the current state.
    #[must_use]
    pub const fn controls(&self) -> AuthControls {
        AuthControls::for_user(self.current_user.as_ref())
    }

    /// Whether a modal carries the `active` class.
    #[must_use]
    pub const fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::Login => self.login_open,
            Modal::Signup => self.signup_open,
        }
    }

    /// Current login form draft.
    #[must_use]
    pub const fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    /// Current signup form draft.
    #[must_use]
    pub const fn signup_form(&self) -> &SignupForm {
        &self.signup_form
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// All signup records.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the stored list cannot be read.
    pub fn users(&mut self) -> Result<Vec<UserRecord>, AuthError> {
        AuthService::new(&mut self.storage).users()
    }

    /// Show a modal.
    pub const fn open(&mut self, modal: Modal) {
        self.set_open(modal, true);
    }

    /// Hide a modal (its close control, or a click on its backdrop).
    pub const fn close(&mut self, modal: Modal) {
        self.set_open(modal, false);
    }

    /// Follow a switch-form link: show `target`, hide the other modal.
    pub const fn switch_to(&mut self, target: Modal) {
        match target {
            Modal::Login => {
                self.signup_open = false;
                self.login_open = true;
            }
            Modal::Signup => {
                self.login_open = false;
                self.signup_open = true;
            }
        }
    }

    /// Update a login form input.
    pub fn set_login_field(&mut self, field: LoginField, value: &str) {
        match field {
            LoginField::Email => self.login_form.email = value.to_owned(),
            LoginField::Password => self.login_form.password = SecretString::from(value),
        }
    }

    /// Update a signup form input.
    pub fn set_signup_field(&mut self, field: SignupField, value: &str) {
        match field {
            SignupField::Name => self.signup_form.name = value.to_owned(),
            SignupField::Email => self.signup_form.email = value.to_owned(),
            SignupField::Password => self.signup_form.password = SecretString::from(value),
            SignupField::Confirm => self.signup_form.confirm = SecretString::from(value),
        }
    }

    /// Handle a click on the login button.
    ///
    /// Anonymous: opens the login modal. Authenticated: logs out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if logging out cannot update storage.
    pub fn click_login_control(&mut self) -> Result<LoginControlOutcome, AuthError> {
        match self.controls().login_action {
            LoginAction::OpenLogin => {
                self.open(Modal::Login);
                Ok(LoginControlOutcome::OpenedLogin)
            }
            LoginAction::Logout => {
                self.logout()?;
                Ok(LoginControlOutcome::LoggedOut)
            }
        }
    }

    /// Submit the login form.
    ///
    /// On success the login modal closes and the form is reset. On failure
    /// nothing changes and the modal stays open.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no record matches.
    #[instrument(skip(self))]
    pub fn submit_login(&mut self) -> Result<UserRecord, AuthError> {
        let user = AuthService::new(&mut self.storage).login(&self.login_form)?;
        self.login_open = false;
        self.login_form = LoginForm::default();
        self.refresh()?;
        Ok(user)
    }

    /// Submit the signup form.
    ///
    /// On success the signup modal closes, its form is reset and the login
    /// modal opens. The new user is not logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` or `AuthError::EmailTaken`; the
    /// modal stays open.
    #[instrument(skip(self))]
    pub fn submit_signup(&mut self) -> Result<UserRecord, AuthError> {
        let user = AuthService::new(&mut self.storage).signup(&self.signup_form)?;
        self.signup_open = false;
        self.signup_form = SignupForm::default();
        self.login_open = true;
        Ok(user)
    }

    /// Clear the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be written.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        AuthService::new(&mut self.storage).logout()?;
        self.refresh()
    }

    /// Re-read the current user from storage.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if storage cannot be read.
    pub fn refresh(&mut self) -> Result<(), AuthError> {
        self.current_user = AuthService::new(&mut self.storage).current_user()?;
        Ok(())
    }

    const fn set_open(&mut self, modal: Modal, open: bool) {
        match modal {
            Modal::Login => self.login_open = open,
            Modal::Signup => self.signup_open = open,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::storage::{MemoryStorage, keys};

    fn controller() -> AuthController<MemoryStorage> {
        AuthController::load(MemoryStorage::new()).unwrap()
    }

    fn fill_signup(auth: &mut AuthController<MemoryStorage>, password: &str, confirm: &str) {
        auth.set_signup_field(SignupField::Name, "A");
        auth.set_signup_field(SignupField::Email, "a@x.com");
        auth.set_signup_field(SignupField::Password, password);
        auth.set_signup_field(SignupField::Confirm, confirm);
    }

    fn fill_login(auth: &mut AuthController<MemoryStorage>, password: &str) {
        auth.set_login_field(LoginField::Email, "a@x.com");
        auth.set_login_field(LoginField::Password, password);
    }

    #[test]
    fn test_initial_state_is_anonymous() {
        let auth = controller();
        assert!(auth.current_user().is_none());
        assert_eq!(auth.controls(), AuthControls::for_user(None));
        assert_eq!(auth.controls().login_label, "Login");
        assert!(auth.controls().signup_visible);
    }

    #[test]
    fn test_signup_opens_login_without_logging_in() {
        let mut auth = controller();
        auth.open(Modal::Signup);
        fill_signup(&mut auth, "p", "p");

        auth.submit_signup().unwrap();
        assert!(!auth.is_open(Modal::Signup));
        assert!(auth.is_open(Modal::Login));
        assert!(auth.signup_form().name.is_empty());
        assert!(auth.signup_form().password.expose_secret().is_empty());
        assert!(auth.current_user().is_none());
        assert_eq!(auth.users().unwrap().len(), 1);
    }

    #[test]
    fn test_signup_failure_keeps_modal_open() {
        let mut auth = controller();
        auth.open(Modal::Signup);
        fill_signup(&mut auth, "p", "q");

        assert!(matches!(auth.submit_signup(), Err(AuthError::PasswordMismatch)));
        assert!(auth.is_open(Modal::Signup));
        assert!(!auth.is_open(Modal::Login));
        assert_eq!(auth.signup_form().name, "A");
    }

    #[test]
    fn test_login_then_logout_swaps_controls() {
        let mut auth = controller();
        fill_signup(&mut auth, "p", "p");
        auth.submit_signup().unwrap();

        fill_login(&mut auth, "p");
        let user = auth.submit_login().unwrap();
        assert_eq!(user.name, "A");
        assert!(!auth.is_open(Modal::Login));
        assert!(auth.login_form().email.is_empty());

        let controls = auth.controls();
        assert_eq!(controls.login_label, "Logout");
        assert_eq!(controls.login_action, LoginAction::Logout);
        assert!(!controls.signup_visible);

        assert_eq!(
            auth.click_login_control().unwrap(),
            LoginControlOutcome::LoggedOut
        );
        assert!(auth.current_user().is_none());
        assert_eq!(auth.controls().login_label, "Login");
        assert!(auth.storage().get_item(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_wrong_password_stays_anonymous() {
        let mut auth = controller();
        fill_signup(&mut auth, "p", "p");
        auth.submit_signup().unwrap();

        fill_login(&mut auth, "wrong");
        assert!(matches!(
            auth.submit_login(),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(auth.is_open(Modal::Login));
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn test_session_restored_from_storage() {
        let mut auth = controller();
        fill_signup(&mut auth, "p", "p");
        auth.submit_signup().unwrap();
        fill_login(&mut auth, "p");
        auth.submit_login().unwrap();

        let storage = auth.storage().clone();
        let reloaded = AuthController::load(storage).unwrap();
        assert_eq!(reloaded.current_user().map(|u| u.name.as_str()), Some("A"));
        assert_eq!(reloaded.controls().login_label, "Logout");
    }

    #[test]
    fn test_switch_forms_are_exclusive() {
        let mut auth = controller();
        assert_eq!(
            auth.click_login_control().unwrap(),
            LoginControlOutcome::OpenedLogin
        );

        auth.switch_to(Modal::Signup);
        assert!(auth.is_open(Modal::Signup));
        assert!(!auth.is_open(Modal::Login));

        auth.switch_to(Modal::Login);
        assert!(auth.is_open(Modal::Login));
        assert!(!auth.is_open(Modal::Signup));

        auth.close(Modal::Login);
        assert!(!auth.is_open(Modal::Login));
    }

    #[test]
    fn test_modal_from_href() {
        assert_eq!(Modal::from_href("#login"), Some(Modal::Login));
        assert_eq!(Modal::from_href("#signup"), Some(Modal::Signup));
        assert_eq!(Modal::from_href("#cart"), None);
    }
}
