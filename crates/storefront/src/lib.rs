//! CoffeeHub storefront widget library.
//!
//! The widget behind the CoffeeHub shop page: a cart with a slide-out panel,
//! a checkout stub, a search echo, and login/signup against browser-style
//! local storage.
//!
//! # Architecture
//!
//! - [`models`] - Cart store and signup records
//! - [`services`] - Auth logic over [`storage::LocalStorage`]
//! - [`controllers`] - Product, cart-row, panel and modal controls
//! - [`views`] - Askama templates rendering state to markup
//! - [`animation`] - Fire-and-forget fly-to-cart effect on tokio timers
//! - [`widget`] - The [`Storefront`] that owns all of the above and
//!   dispatches [`UiEvent`]s

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod animation;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod views;
pub mod widget;

pub use error::{Notice, NoticeLevel, WidgetError};
pub use widget::{Outcome, RenderedWidget, Storefront, UiEvent};
