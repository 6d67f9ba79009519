//! Fly-to-cart animation.
//!
//! Adding a product spawns a transient floating copy of its image at the
//! control's position. Shortly after, the image is styled to slide right and
//! shrink; a fixed time after spawning it is removed, whether or not the
//! transition ran. Both steps run on detached tokio tasks that are never
//! awaited and never touch the cart. Each click gets its own element, so
//! rapid clicks do not interfere with each other.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use uuid::Uuid;

use crate::config::AnimationConfig;

/// Screen position of the clicked product control.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub top: f64,
    pub left: f64,
}

/// Style applied once the flight transition starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightStyle {
    /// Horizontal translation in px.
    pub translate_x: u32,
}

impl FlightStyle {
    /// CSS `transform` value.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate({}px, 0) scale(0)", self.translate_x)
    }
}

/// A transient floating image element.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingImage {
    pub id: Uuid,
    pub src: String,
    pub origin: ScreenPoint,
    /// `None` until the transition step has run.
    pub flight: Option<FlightStyle>,
}

/// Owner of all in-flight floating images.
///
/// Cloning shares the same set of elements.
#[derive(Debug, Clone)]
pub struct AnimationLayer {
    config: AnimationConfig,
    elements: Arc<Mutex<Vec<FloatingImage>>>,
}

impl AnimationLayer {
    /// Create an empty layer.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            elements: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Spawn a floating image and schedule its transition and removal.
    ///
    /// Returns `None` without creating anything when called outside a tokio
    /// runtime, since nothing could ever remove the element.
    pub fn fly_to_cart(&self, src: &str, origin: ScreenPoint) -> Option<Uuid> {
        let Ok(handle) = Handle::try_current() else {
            tracing::debug!("No async runtime, skipping add-to-cart animation");
            return None;
        };

        let id = Uuid::new_v4();
        self.with_elements(|elements| {
            elements.push(FloatingImage {
                id,
                src: src.to_owned(),
                origin,
                flight: None,
            });
        });

        let flight = FlightStyle {
            translate_x: self.config.viewport_width,
        };
        let transition_delay = self.config.transition_delay;
        let layer = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(transition_delay).await;
            layer.with_elements(|elements| {
                if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
                    element.flight = Some(flight);
                }
            });
        });

        let removal_delay = self.config.removal_delay;
        let layer = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(removal_delay).await;
            layer.with_elements(|elements| elements.retain(|e| e.id != id));
        });

        tracing::trace!(%id, "Spawned floating image");
        Some(id)
    }

    /// Snapshot of the elements currently on screen, oldest first.
    #[must_use]
    pub fn elements(&self) -> Vec<FloatingImage> {
        self.with_elements(|elements| elements.clone())
    }

    fn with_elements<T>(&self, f: impl FnOnce(&mut Vec<FloatingImage>) -> T) -> T {
        let mut guard = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
