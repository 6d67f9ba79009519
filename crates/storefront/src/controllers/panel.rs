//! Cart panel visibility.

/// Visibility of the slide-out cart panel (`#cart-panel.active`).
///
/// `open` and `close` are idempotent; `toggle` flips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartPanel {
    open: bool,
}

impl CartPanel {
    /// Show the panel.
    pub const fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Flip visibility.
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Whether the panel carries the `active` class.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}
