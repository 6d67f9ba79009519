//! CoffeeHub Core - Shared types library.
//!
//! This crate provides the value types used across CoffeeHub components:
//! - `storefront` - The cart, auth and rendering widget engine
//! - `cli` - Interactive shell hosting the widget
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no templating. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for line item IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
