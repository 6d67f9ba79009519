//! Domain models for the storefront widget.
//!
//! - [`cart`] - In-memory cart store, never persisted
//! - [`user`] - Signup records and form drafts, persisted via local storage

pub mod cart;
pub mod user;

pub use cart::{Cart, CartError, LineItem, Receipt};
pub use user::{LoginForm, SignupForm, UserRecord};
