//! Browser-style local storage.
//!
//! The widget persists its auth state the way a page does with
//! `window.localStorage`: a flat map from string keys to string values, read
//! and written synchronously, one key at a time. There is no transaction
//! spanning keys and the last writer wins.
//!
//! # Keys
//!
//! - [`keys::USERS`] - JSON array of signup records
//! - [`keys::CURRENT_USER`] - JSON record of the logged-in user, absent when anonymous

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage keys for persisted widget data.
pub mod keys {
    /// Key for the serialized list of signup records.
    pub const USERS: &str = "users";

    /// Key for the serialized logged-in user record.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A string-valued key/value store with `localStorage` semantics.
///
/// Reads never fail for a missing key; they return `None`. Removing a key
/// that is not present is not an error.
pub trait LocalStorage {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key` and its value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn clear(&mut self) -> Result<(), StorageError>;
}
