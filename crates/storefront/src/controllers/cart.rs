//! Product and cart-row controls.
//!
//! Product controls (catalog cards and hero items) describe what they add
//! through `data-name`, `data-price` and `data-img` attributes. Cart rows are
//! handled by one delegated listener on `#cart-items`: a click is resolved to
//! the row's [`LineItemId`] from the button's `data-id` and to a
//! [`RowAction`] from the button's class.

use std::collections::HashMap;
use std::str::FromStr;

use coffeehub_core::{LineItemId, Price};

use crate::animation::ScreenPoint;
use crate::models::cart::Cart;

/// The attributes of a clicked add-to-cart control.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductControl {
    /// `data-name`
    pub name: String,
    /// `data-price`, parsed leniently
    pub price: Price,
    /// `data-img`
    pub image_ref: String,
    /// Where the control sits on screen, used as the animation origin.
    pub origin: ScreenPoint,
}

impl ProductControl {
    /// Build a product control from its raw attribute values.
    ///
    /// Never fails: a missing name or image becomes an empty string and a
    /// missing or malformed price becomes [`Price::ZERO`].
    #[must_use]
    pub fn from_attributes(attributes: &HashMap<String, String>, origin: ScreenPoint) -> Self {
        let attr = |key: &str| attributes.get(key).cloned().unwrap_or_default();

        Self {
            name: attr("data-name"),
            price: attributes
                .get("data-price")
                .map_or(Price::ZERO, |raw| Price::parse_lenient(raw)),
            image_ref: attr("data-img"),
            origin,
        }
    }

    /// Build a product control from already-separated values.
    #[must_use]
    pub fn new(name: &str, raw_price: &str, image_ref: &str, origin: ScreenPoint) -> Self {
        Self {
            name: name.to_owned(),
            price: Price::parse_lenient(raw_price),
            image_ref: image_ref.to_owned(),
            origin,
        }
    }
}

/// Quantity controls on a cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Increase,
    Decrease,
    Remove,
}

impl RowAction {
    /// The button class rendered for this action.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Remove => "remove",
        }
    }

    /// Apply the action to the cart.
    ///
    /// Returns `true` if the cart changed.
    pub fn apply(self, cart: &mut Cart, id: LineItemId) -> bool {
        match self {
            Self::Increase => cart.increment(id),
            Self::Decrease => cart.decrement(id),
            Self::Remove => cart.remove(id).is_some(),
        }
    }
}

impl FromStr for RowAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            "remove" => Ok(Self::Remove),
            _ => Err(()),
        }
    }
}

/// Resolve a click inside `#cart-items` to a row and an action.
///
/// `class_list` is the clicked element's `class` attribute and `data_id` its
/// `data-id`. Clicks on anything other than a row button resolve to `None`.
#[must_use]
pub fn resolve_row_click(class_list: &str, data_id: Option<&str>) -> Option<(LineItemId, RowAction)> {
    let action = class_list
        .split_whitespace()
        .find_map(|class| class.parse::<RowAction>().ok())?;
    let id = data_id?.parse::<LineItemId>().ok()?;
    Some((id, action))
}
