//! Placement zones derived from product metadata.
//!
//! Zones are never stored: [`derive_zones`] is a pure function of the product
//! title, the canvas size, and (when known) the rectangle the product image
//! actually occupies. Callers re-derive on every product or size change.

#[cfg(test)]
#[path = "zone_test.rs"]
mod zone_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZONE_HEIGHT, ZONE_HEIGHT_MAX_FRAC, ZONE_WIDTH_FRAC};
use crate::geom::{Point, Rect, Size};

/// Product size class, from the title keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Classify by case-insensitive substring; anything else is `Large`.
    #[must_use]
    pub fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("small") {
            Self::Small
        } else if title.contains("medium") {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// A rectangle on the canvas where decorations may be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub rect: Rect,
    pub label: String,
}

impl Zone {
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// How a band sits inside the reference height.
#[derive(Clone, Copy)]
enum Band {
    /// Zone top edge at this fraction.
    TopAt(f64),
    /// Zone centered on this fraction.
    CenteredAt(f64),
    /// Zone bottom edge at this fraction.
    BottomAt(f64),
}

impl Band {
    fn top(self, reference: &Rect, zone_h: f64) -> f64 {
        match self {
            Self::TopAt(f) => reference.y + reference.height * f,
            Self::CenteredAt(f) => reference.y + reference.height * f - zone_h / 2.0,
            Self::BottomAt(f) => reference.y + reference.height * f - zone_h,
        }
    }
}

fn layout(class: SizeClass) -> &'static [(Band, &'static str)] {
    match class {
        SizeClass::Small => &[(Band::CenteredAt(0.5), "Standard Placement")],
        SizeClass::Medium => &[(Band::TopAt(0.35), "Upper Placement"), (Band::BottomAt(0.65), "Lower Placement")],
        SizeClass::Large => &[(Band::TopAt(0.25), "Top"), (Band::CenteredAt(0.5), "Middle"), (Band::BottomAt(0.75), "Bottom")],
    }
}

/// Derive the ordered (top-to-bottom) zones for a product.
///
/// `image_rect` is the rectangle the product image is drawn into. When it is
/// known, zones are laid out on it so they stay on the physical product;
/// otherwise the full canvas is the reference. Always returns at least one
/// zone.
#[must_use]
pub fn derive_zones(title: &str, canvas: Size, image_rect: Option<Rect>) -> Vec<Zone> {
    let reference = image_rect
        .filter(|r| !Size::new(r.width, r.height).is_degenerate())
        .unwrap_or_else(|| Rect::new(0.0, 0.0, canvas.width.max(0.0), canvas.height.max(0.0)));

    let zone_w = reference.width * ZONE_WIDTH_FRAC;
    let zone_h = ZONE_HEIGHT.min(reference.height * ZONE_HEIGHT_MAX_FRAC);
    let zone_x = reference.x + (reference.width - zone_w) / 2.0;

    layout(SizeClass::classify(title))
        .iter()
        .enumerate()
        .map(|(i, (band, label))| Zone {
            id: format!("z{}", i + 1),
            rect: Rect::new(zone_x, band.top(&reference, zone_h), zone_w, zone_h),
            label: (*label).to_owned(),
        })
        .collect()
}
