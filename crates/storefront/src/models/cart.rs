//! Cart store.
//!
//! The cart is the only source of truth for quantities and prices. It lives
//! for the page session and is never persisted. Line items are kept in the
//! order their product was first added, and each one gets a [`LineItemId`]
//! that stays valid until the item is removed, regardless of what happens to
//! the rows around it.

use coffeehub_core::{LineItemId, Price};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    Empty,
}

/// One product-and-quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Stable identity used by rendered row controls.
    pub id: LineItemId,
    /// Product display name; at most one line item exists per name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Always at least 1.
    pub quantity: u32,
    /// Product image reference.
    pub image_ref: String,
}

impl LineItem {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Sum of all line totals at checkout time.
    pub total: Price,
    /// Sum of all quantities at checkout time.
    pub item_count: u32,
}

/// The ordered collection of line items for the current session.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    next_id: LineItemId,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: LineItemId::new(1),
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line item by id.
    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity over all line items.
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities, shown on the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Add one unit of a product.
    ///
    /// If a line item with the same name exists its quantity goes up by one;
    /// its price and image are left as they were. Otherwise a new line item
    /// with quantity 1 is appended. Returns the id of the affected item.
    pub fn add_or_increment(
        &mut self,
        name: &str,
        price: Price,
        image_ref: &str,
    ) -> LineItemId {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = item.quantity.saturating_add(1);
            return item.id;
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.items.push(LineItem {
            id,
            name: name.to_owned(),
            price,
            quantity: 1,
            image_ref: image_ref.to_owned(),
        });
        id
    }

    /// Add one to a line item's quantity.
    ///
    /// Returns `false` if no item has that id.
    pub fn increment(&mut self, id: LineItemId) -> bool {
        self.get_mut(id).is_some_and(|item| {
            item.quantity = item.quantity.saturating_add(1);
            true
        })
    }

    /// Take one from a line item's quantity.
    ///
    /// Quantity never drops below 1; removal is a separate action. Returns
    /// `false` if nothing changed.
    pub fn decrement(&mut self, id: LineItemId) -> bool {
        match self.get_mut(id) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove a line item, returning it if it existed.
    pub fn remove(&mut self, id: LineItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Place the order: report the total and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Empty` if there is nothing to check out; the cart
    /// is left unchanged.
    pub fn checkout(&mut self) -> Result<Receipt, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }

        let receipt = Receipt {
            total: self.total(),
            item_count: self.badge_count(),
        };
        self.items.clear();
        Ok(receipt)
    }

    fn get_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}
