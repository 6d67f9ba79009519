//! CLI subcommands.

pub mod shell;
pub mod users;

use thiserror::Error;

use coffeehub_storefront::WidgetError;
use coffeehub_storefront::services::auth::AuthError;
use coffeehub_storefront::storage::StorageError;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Local storage could not be opened or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored users could not be read.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// The widget failed in a way the user cannot recover from.
    #[error("widget error: {0}")]
    Widget(#[from] WidgetError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
