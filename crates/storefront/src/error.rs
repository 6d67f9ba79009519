//! Unified error handling and user-facing notices.
//!
//! Controllers return `Result<T, WidgetError>`. The host decides how to show
//! the outcome; [`Notice::from`] gives the message a user should see for any
//! error, hiding internal details.

use thiserror::Error;

use coffeehub_core::Price;

use crate::models::cart::CartError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Widget-level error type.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A view failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl WidgetError {
    /// Whether the error is an expected outcome of user input rather than a
    /// fault in the widget or its storage.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::Cart(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::InvalidCredentials
                    | AuthError::PasswordMismatch
                    | AuthError::EmailTaken
            ),
            Self::Storage(_) | Self::Render(_) => false,
        }
    }
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-visible message reporting the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Echo of a search query.
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::new(NoticeLevel::Info, format!("You searched for: {query}"))
    }

    /// Successful checkout.
    #[must_use]
    pub fn order_placed(total: Price) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!("Order placed successfully!\nTotal: {total}"),
        )
    }

    /// Successful login.
    #[must_use]
    pub fn welcome(name: &str) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!("Login successful! Welcome {name}"),
        )
    }

    /// Successful signup.
    #[must_use]
    pub fn account_created() -> Self {
        Self::new(
            NoticeLevel::Success,
            "Account created successfully! Please login.",
        )
    }

    /// Logout confirmation.
    #[must_use]
    pub fn logged_out() -> Self {
        Self::new(NoticeLevel::Info, "You have been logged out!")
    }
}

impl From<&WidgetError> for Notice {
    fn from(err: &WidgetError) -> Self {
        let message = match err {
            WidgetError::Cart(CartError::Empty) => "Your cart is empty!",
            WidgetError::Auth(auth) => match auth {
                AuthError::InvalidCredentials => "Invalid email or password!",
                AuthError::PasswordMismatch => "Passwords do not match!",
                AuthError::EmailTaken => "Email already exists!",
                _ => "Something went wrong. Please try again.",
            },
            WidgetError::Storage(_) | WidgetError::Render(_) => {
                "Something went wrong. Please try again."
            }
        };
        Self::new(NoticeLevel::Error, message)
    }
}
