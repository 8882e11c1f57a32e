//! Placement constraint: map a pointer position onto the nearest zone.
//!
//! With auto-align off the pointer is clamped into the zone; with it on the
//! object jumps to the zone's anchor for the current alignment mode. Either
//! way the result lies inside exactly one zone's rectangle.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::consts::{ANCHOR_BOTTOM_FRAC, ANCHOR_MARGIN, ANCHOR_MIDDLE_FRAC, ANCHOR_TOP_FRAC};
use crate::geom::Point;
use crate::input::{AlignmentMode, HAlign, VAlign};
use crate::zone::Zone;

/// Index of the zone whose center is closest to `pt`. Ties go to the earlier zone.
#[must_use]
pub fn nearest_zone_index(pt: Point, zones: &[Zone]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, zone) in zones.iter().enumerate() {
        let d = pt.distance(zone.center());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// The zone whose center is closest to `pt`.
#[must_use]
pub fn nearest_zone(pt: Point, zones: &[Zone]) -> Option<&Zone> {
    zones.get(nearest_zone_index(pt, zones)?)
}

/// Row y for an alignment's vertical component.
#[must_use]
pub fn anchor_y(zone: &Zone, vertical: VAlign) -> f64 {
    let frac = match vertical {
        VAlign::Top => ANCHOR_TOP_FRAC,
        VAlign::Middle => ANCHOR_MIDDLE_FRAC,
        VAlign::Bottom => ANCHOR_BOTTOM_FRAC,
    };
    zone.rect.y + zone.rect.height * frac
}

/// The fixed snap point of `zone` for `mode`.
#[must_use]
pub fn anchor_point(zone: &Zone, mode: AlignmentMode) -> Point {
    let x = match mode.horizontal {
        HAlign::Left => zone.rect.x + ANCHOR_MARGIN,
        HAlign::Center => zone.center().x,
        HAlign::Right => zone.rect.right() - ANCHOR_MARGIN,
    };
    // Zones narrower than two margins would push the anchor outside.
    let x = x.clamp(zone.rect.x, zone.rect.right());
    Point::new(x, anchor_y(zone, mode.vertical))
}

/// Constrain a pointer position to the nearest zone.
///
/// Returns `None` only when there are no zones.
#[must_use]
pub fn constrain(pt: Point, zones: &[Zone], auto_align: bool, mode: AlignmentMode) -> Option<Point> {
    let zone = nearest_zone(pt, zones)?;
    Some(if auto_align { anchor_point(zone, mode) } else { zone.rect.clamp(pt) })
}
