//! Floating fly-to-cart images.

use askama::Template;
use uuid::Uuid;

use crate::animation::FloatingImage;

/// Floating image display data for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingImageView {
    pub id: Uuid,
    pub src: String,
    pub top: f64,
    pub left: f64,
    /// Empty until the flight transition has started.
    pub transform: String,
}

impl From<&FloatingImage> for FloatingImageView {
    fn from(image: &FloatingImage) -> Self {
        Self {
            id: image.id,
            src: image.src.clone(),
            top: image.origin.top,
            left: image.origin.left,
            transform: image
                .flight
                .map(|flight| flight.transform())
                .unwrap_or_default(),
        }
    }
}

/// Transient `img.floating` elements appended to the body.
#[derive(Template)]
#[template(path = "partials/floating_images.html")]
pub struct FloatingImagesTemplate {
    pub images: Vec<FloatingImageView>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::animation::{FlightStyle, ScreenPoint};

    #[test]
    fn test_styles_before_and_after_transition() {
        let mut image = FloatingImage {
            id: Uuid::nil(),
            src: "latte.png".to_owned(),
            origin: ScreenPoint {
                top: 10.0,
                left: 20.5,
            },
            flight: None,
        };

        let before = FloatingImagesTemplate {
            images: vec![FloatingImageView::from(&image)],
        }
        .render()
        .unwrap();
        assert!(before.contains("top: 10px; left: 20.5px;"));
        assert!(!before.contains("opacity"));

        image.flight = Some(FlightStyle { translate_x: 1280 });
        let after = FloatingImagesTemplate {
            images: vec![FloatingImageView::from(&image)],
        }
        .render()
        .unwrap();
        assert!(after.contains("transform: translate(1280px, 0) scale(0); opacity: 0;"));
    }
}
