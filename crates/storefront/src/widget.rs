//! The storefront widget.
//!
//! [`Storefront`] owns every store and controller and is driven by
//! [`UiEvent`]s through a single [`Storefront::dispatch`] entry point. After
//! any event, [`Storefront::render`] produces the fresh markup for every
//! fragment from current state.

use tracing::instrument;
use uuid::Uuid;

use coffeehub_core::LineItemId;

use crate::animation::AnimationLayer;
use crate::config::AnimationConfig;
use crate::controllers::{
    AuthController, AuthControls, CartPanel, LoginControlOutcome, LoginField, Modal,
    ProductControl, RowAction, SignupField,
};
use crate::error::{Notice, Result};
use crate::models::cart::{Cart, Receipt};
use crate::storage::LocalStorage;
use crate::views::{
    AuthControlsTemplate, AuthModalsTemplate, FloatingImageView, FloatingImagesTemplate,
    RenderedCart, render_cart,
};

/// Everything the widget reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Search button.
    Search { query: String },
    /// A catalog or hero add-to-cart button.
    AddToCart(ProductControl),
    /// A quantity or remove button inside `#cart-items`.
    CartRow { id: LineItemId, action: RowAction },
    /// Header cart button.
    ToggleCart,
    /// Explicit open of the cart panel.
    OpenCart,
    /// `.close-cart`
    CloseCart,
    /// `#checkout-btn`
    Checkout,
    /// `.btn.login`, whose behavior depends on auth state.
    LoginControl,
    /// `.btn.signup`
    SignupControl,
    /// `.close-modal` inside the given modal.
    CloseModal(Modal),
    /// A click landing on the given modal's backdrop.
    Backdrop(Modal),
    /// `.switch-form` link to the given modal.
    SwitchForm(Modal),
    /// Input in the login form.
    LoginInput { field: LoginField, value: String },
    /// Input in the signup form.
    SignupInput { field: SignupField, value: String },
    /// `#login-form` submit.
    SubmitLogin,
    /// `#signup-form` submit.
    SubmitSignup,
}

/// What an event produced besides state changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Message to show the user, if any.
    pub notice: Option<Notice>,
    /// Floating image spawned by an add-to-cart click.
    pub animation: Option<Uuid>,
    /// Line item affected by an add-to-cart click.
    pub line_item: Option<LineItemId>,
}

impl Outcome {
    fn with_notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }
}

/// Markup for every widget fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedWidget {
    pub cart: RenderedCart,
    pub auth_controls: String,
    pub auth_modals: String,
    pub floating_images: String,
}

/// The storefront widget.
#[derive(Debug)]
pub struct Storefront<S: LocalStorage> {
    cart: Cart,
    panel: CartPanel,
    auth: AuthController<S>,
    animations: AnimationLayer,
}

impl<S: LocalStorage> Storefront<S> {
    /// Create the widget over a storage backend.
    ///
    /// The auth state starts from whatever current-user pointer the storage
    /// holds; the cart starts empty.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Auth` if storage cannot be read.
    pub fn new(storage: S, animation: AnimationConfig) -> Result<Self> {
        Ok(Self {
            cart: Cart::new(),
            panel: CartPanel::default(),
            auth: AuthController::load(storage)?,
            animations: AnimationLayer::new(animation),
        })
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart panel visibility.
    #[must_use]
    pub const fn panel(&self) -> &CartPanel {
        &self.panel
    }

    /// Auth state, modals and storage.
    #[must_use]
    pub const fn auth(&self) -> &AuthController<S> {
        &self.auth
    }

    /// Mutable access to auth state, for hosts that manage users directly.
    pub const fn auth_mut(&mut self) -> &mut AuthController<S> {
        &mut self.auth
    }

    /// In-flight add-to-cart animations.
    #[must_use]
    pub const fn animations(&self) -> &AnimationLayer {
        &self.animations
    }

    /// Header auth controls for the current state.
    #[must_use]
    pub const fn auth_controls(&self) -> AuthControls {
        self.auth.controls()
    }

    /// Handle one UI event.
    ///
    /// User-facing failures (empty cart, bad credentials, password mismatch,
    /// taken email) come back as errors with state unchanged; turn them into
    /// a message with [`Notice::from`].
    ///
    /// # Errors
    ///
    /// Returns `WidgetError` if the event is rejected or storage fails.
    #[instrument(skip(self, event), fields(event = event_name(&event)))]
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Outcome> {
        let outcome = match event {
            UiEvent::Search { query } => Outcome::with_notice(Notice::search(&query)),
            UiEvent::AddToCart(control) => self.add_to_cart(&control),
            UiEvent::CartRow { id, action } => {
                if !action.apply(&mut self.cart, id) {
                    tracing::debug!(%id, ?action, "Cart row action changed nothing");
                }
                Outcome::default()
            }
            UiEvent::ToggleCart => {
                self.panel.toggle();
                Outcome::default()
            }
            UiEvent::OpenCart => {
                self.panel.open();
                Outcome::default()
            }
            UiEvent::CloseCart => {
                self.panel.close();
                Outcome::default()
            }
            UiEvent::Checkout => {
                let receipt = self.checkout()?;
                Outcome::with_notice(Notice::order_placed(receipt.total))
            }
            UiEvent::LoginControl => match self.auth.click_login_control()? {
                LoginControlOutcome::OpenedLogin => Outcome::default(),
                LoginControlOutcome::LoggedOut => Outcome::with_notice(Notice::logged_out()),
            },
            UiEvent::SignupControl => {
                self.auth.open(Modal::Signup);
                Outcome::default()
            }
            UiEvent::CloseModal(modal) | UiEvent::Backdrop(modal) => {
                self.auth.close(modal);
                Outcome::default()
            }
            UiEvent::SwitchForm(target) => {
                self.auth.switch_to(target);
                Outcome::default()
            }
            UiEvent::LoginInput { field, value } => {
                self.auth.set_login_field(field, &value);
                Outcome::default()
            }
            UiEvent::SignupInput { field, value } => {
                self.auth.set_signup_field(field, &value);
                Outcome::default()
            }
            UiEvent::SubmitLogin => {
                let user = self.auth.submit_login().inspect_err(|e| {
                    tracing::debug!("Login rejected: {e}");
                })?;
                Outcome::with_notice(Notice::welcome(&user.name))
            }
            UiEvent::SubmitSignup => {
                self.auth.submit_signup().inspect_err(|e| {
                    tracing::debug!("Signup rejected: {e}");
                })?;
                Outcome::with_notice(Notice::account_created())
            }
        };

        Ok(outcome)
    }

    /// Add one unit of the clicked product, reveal the panel and start the
    /// fly-to-cart animation.
    fn add_to_cart(&mut self, control: &ProductControl) -> Outcome {
        let id = self
            .cart
            .add_or_increment(&control.name, control.price, &control.image_ref);
        self.panel.open();
        let animation = self
            .animations
            .fly_to_cart(&control.image_ref, control.origin);

        tracing::debug!(%id, name = %control.name, price = %control.price, "Added to cart");
        Outcome {
            notice: None,
            animation,
            line_item: Some(id),
        }
    }

    /// Place the order and close the panel.
    fn checkout(&mut self) -> Result<Receipt> {
        let receipt = self.cart.checkout().inspect_err(|e| {
            tracing::debug!("Checkout rejected: {e}");
        })?;
        self.panel.close();
        tracing::info!(total = %receipt.total, items = receipt.item_count, "Order placed");
        Ok(receipt)
    }

    /// Render every fragment from current state.
    ///
    /// Calling this twice without an intervening event yields identical
    /// cart and auth markup.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Render` if a template fails.
    pub fn render(&self) -> Result<RenderedWidget> {
        use askama::Template;

        let floating = FloatingImagesTemplate {
            images: self
                .animations
                .elements()
                .iter()
                .map(FloatingImageView::from)
                .collect(),
        };

        Ok(RenderedWidget {
            cart: render_cart(&self.cart, self.panel.is_open())?,
            auth_controls: AuthControlsTemplate {
                controls: self.auth.controls(),
            }
            .render()?,
            auth_modals: AuthModalsTemplate::from(&self.auth).render()?,
            floating_images: floating.render()?,
        })
    }
}

/// Short event name for tracing spans.
const fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::Search { .. } => "search",
        UiEvent::AddToCart(_) => "add_to_cart",
        UiEvent::CartRow { .. } => "cart_row",
        UiEvent::ToggleCart => "toggle_cart",
        UiEvent::OpenCart => "open_cart",
        UiEvent::CloseCart => "close_cart",
        UiEvent::Checkout => "checkout",
        UiEvent::LoginControl => "login_control",
        UiEvent::SignupControl => "signup_control",
        UiEvent::CloseModal(_) => "close_modal",
        UiEvent::Backdrop(_) => "backdrop",
        UiEvent::SwitchForm(_) => "switch_form",
        UiEvent::LoginInput { .. } => "login_input",
        UiEvent::SignupInput { .. } => "signup_input",
        UiEvent::SubmitLogin => "submit_login",
        UiEvent::SubmitSignup => "submit_signup",
    }
}
