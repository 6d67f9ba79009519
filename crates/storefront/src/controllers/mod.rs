//! UI controllers.
//!
//! - [`cart`] - Add-to-cart controls and delegated cart-row actions
//! - [`panel`] - Cart panel open/close/toggle
//! - [`auth`] - Login/signup modals, forms and header controls

pub mod auth;
pub mod cart;
pub mod panel;

pub use auth::{
    AuthController, AuthControls, LoginAction, LoginControlOutcome, LoginField, Modal,
    SignupField,
};
pub use cart::{ProductControl, RowAction, resolve_row_click};
pub use panel::CartPanel;
