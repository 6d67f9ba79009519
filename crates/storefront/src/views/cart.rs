//! Cart panel rendering.
//!
//! Rendering is a pure function of the cart: the same cart always produces
//! the same markup. Row buttons carry the row's `data-id`; clicks are routed
//! by a single delegated handler (see [`crate::controllers::cart`]), so a
//! re-render never has handlers to rebind.

use askama::Template;

use coffeehub_core::LineItemId;

use crate::models::cart::{Cart, LineItem};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: LineItemId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            image: item.image_ref.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.badge_count(),
        }
    }
}

/// Cart rows fragment (`#cart-items` contents).
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart total fragment (`.cart-total` text).
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
pub struct CartTotalTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment (`#cart-badge` text).
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// The whole slide-out panel.
#[derive(Template)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub open: bool,
}

/// Rendered cart fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCart {
    /// `#cart-items` inner markup.
    pub items: String,
    /// `.cart-total` text.
    pub total: String,
    /// `#cart-badge` text.
    pub badge: String,
    /// Full `#cart-panel` markup.
    pub panel: String,
}

/// Render every cart fragment from the current cart.
///
/// # Errors
///
/// Returns `askama::Error` if a template fails to render.
pub fn render_cart(cart: &Cart, open: bool) -> askama::Result<RenderedCart> {
    let view = CartView::from(cart);

    Ok(RenderedCart {
        items: CartItemsTemplate { cart: view.clone() }.render()?,
        total: CartTotalTemplate { cart: view.clone() }.render()?.trim().to_owned(),
        badge: CartCountTemplate {
            count: view.item_count,
        }
        .render()?
        .trim()
        .to_owned(),
        panel: CartPanelTemplate { cart: view, open }.render()?,
    })
}
