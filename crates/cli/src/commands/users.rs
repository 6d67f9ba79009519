//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! coffeehub users list
//! coffeehub logout
//! ```

use std::io::Write;

use coffeehub_storefront::config::WidgetConfig;
use coffeehub_storefront::models::UserRecord;
use coffeehub_storefront::services::auth::AuthService;
use coffeehub_storefront::storage::FileStorage;

use super::CliError;

/// Print every signed-up user, marking the logged-in one.
///
/// # Errors
///
/// Returns `CliError` if storage cannot be read or stdout cannot be written.
pub fn list(config: &WidgetConfig) -> Result<(), CliError> {
    let mut storage = FileStorage::open(&config.storage_path)?;
    let auth = AuthService::new(&mut storage);
    let users = auth.users()?;
    let current = auth.current_user()?;

    let mut out = std::io::stdout().lock();
    write_users(&mut out, &users, current.as_ref())?;
    Ok(())
}

/// Clear the current session. Signup records are kept.
///
/// # Errors
///
/// Returns `CliError` if storage cannot be written.
pub fn logout(config: &WidgetConfig) -> Result<(), CliError> {
    let mut storage = FileStorage::open(&config.storage_path)?;
    AuthService::new(&mut storage).logout()?;
    tracing::info!(path = %storage.path().display(), "Cleared current user");
    Ok(())
}

fn write_users(
    out: &mut impl Write,
    users: &[UserRecord],
    current: Option<&UserRecord>,
) -> std::io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users have signed up.");
    }

    for user in users {
        let marker = if current.is_some_and(|c| c.email == user.email) {
            "*"
        } else {
            " "
        };
        writeln!(out, "{marker} {} <{}>", user.name, user.email)?;
    }
    Ok(())
}
