//! Askama views for the widget's DOM fragments.
//!
//! Every view is a pure function of store state; see [`crate::widget::Storefront::render`]
//! for the full set of fragments produced after each event.

pub mod animation;
pub mod auth;
pub mod cart;

pub use animation::{FloatingImageView, FloatingImagesTemplate};
pub use auth::{AuthControlsTemplate, AuthModalsTemplate};
pub use cart::{CartView, RenderedCart, render_cart};
