//! Business logic services for the storefront widget.
//!
//! # Services
//!
//! - `auth` - Signup, login and logout against local storage

pub mod auth;
