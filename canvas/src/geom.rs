#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of an image or box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero, negative, or not finite.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle, `x`/`y` at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Clamp each axis of `pt` independently into the rectangle.
    #[must_use]
    pub fn clamp(&self, pt: Point) -> Point {
        Point::new(pt.x.clamp(self.x, self.right()), pt.y.clamp(self.y, self.bottom()))
    }

    /// Whether the two rectangles share interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Rectangle an image of `natural` size occupies when fit (contain, no crop)
/// into `frame`, scaled by `scale`, and centered.
///
/// `scale` is the product-level display factor that keeps every variant image
/// inside the fixed canvas; values outside `(0, 1]` are clamped to that range.
#[must_use]
pub fn contain_rect(natural: Size, frame: Size, scale: f64) -> Option<Rect> {
    if natural.is_degenerate() || frame.is_degenerate() {
        return None;
    }
    let scale = if scale.is_finite() && scale > 0.0 { scale.min(1.0) } else { 1.0 };
    let fit = (frame.width / natural.width).min(frame.height / natural.height) * scale;
    let width = natural.width * fit;
    let height = natural.height * fit;
    Some(Rect::new((frame.width - width) / 2.0, (frame.height - height) / 2.0, width, height))
}
