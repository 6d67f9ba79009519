//! Header auth controls and the login/signup modals.

use askama::Template;

use crate::controllers::auth::{AuthController, AuthControls, LoginAction, Modal};
use crate::storage::LocalStorage;

impl AuthControls {
    /// `data-action` value of the login button.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self.login_action {
            LoginAction::OpenLogin => "open-login",
            LoginAction::Logout => "logout",
        }
    }
}

/// Login and signup buttons.
#[derive(Template)]
#[template(path = "partials/auth_controls.html")]
pub struct AuthControlsTemplate {
    pub controls: AuthControls,
}

/// Both auth modals. Password inputs are never pre-filled.
#[derive(Template)]
#[template(path = "partials/auth_modals.html")]
pub struct AuthModalsTemplate {
    pub login_open: bool,
    pub signup_open: bool,
    pub login_email: String,
    pub signup_name: String,
    pub signup_email: String,
}

impl<S: LocalStorage> From<&AuthController<S>> for AuthModalsTemplate {
    fn from(auth: &AuthController<S>) -> Self {
        Self {
            login_open: auth.is_open(Modal::Login),
            signup_open: auth.is_open(Modal::Signup),
            login_email: auth.login_form().email.clone(),
            signup_name: auth.signup_form().name.clone(),
            signup_email: auth.signup_form().email.clone(),
        }
    }
}
