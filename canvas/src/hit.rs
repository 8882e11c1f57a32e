//! Hit-testing and object footprints.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{EMBROIDERY_FONT_SIZE, FALLBACK_FOOTPRINT};
use crate::doc::{CanvasObject, ObjectId, ObjectKind, ObjectStore};
use crate::geom::{Point, Size};

/// Approximate glyph advance as a fraction of font size, for embroidery text
/// whose rendered width is not known to the core.
const GLYPH_ADVANCE_FRAC: f64 = 0.6;

/// On-canvas box of an object before rotation, centered on `(x, y)`.
///
/// Image objects use their decoded size times scale and fall back to a fixed
/// square until the image reports its size. Embroidery is estimated from its
/// character count.
#[must_use]
pub fn footprint(obj: &CanvasObject) -> Size {
    if let Some(size) = obj.scaled_size() {
        return size;
    }
    match &obj.kind {
        ObjectKind::Embroidery(style) => {
            #[allow(clippy::cast_precision_loss)]
            let chars = style.char_count().max(1) as f64;
            Size::new(
                chars * EMBROIDERY_FONT_SIZE * GLYPH_ADVANCE_FRAC * obj.scale_x.abs(),
                EMBROIDERY_FONT_SIZE * obj.scale_y.abs(),
            )
        }
        ObjectKind::Letter(_) | ObjectKind::Patch(_) | ObjectKind::Vinyl(_) => Size::new(
            FALLBACK_FOOTPRINT * obj.scale_x.abs(),
            FALLBACK_FOOTPRINT * obj.scale_y.abs(),
        ),
    }
}

/// Whether `pt` falls inside the object's rotated footprint.
#[must_use]
pub fn contains(obj: &CanvasObject, pt: Point) -> bool {
    let size = footprint(obj);
    // Rotate the point into the object's local frame.
    let (sin, cos) = (-obj.rotation.to_radians()).sin_cos();
    let dx = pt.x - obj.x;
    let dy = pt.y - obj.y;
    let lx = dx * cos - dy * sin;
    let ly = dx * sin + dy * cos;
    lx.abs() <= size.width / 2.0 && ly.abs() <= size.height / 2.0
}

/// The topmost object under `pt`. Later objects draw above earlier ones.
#[must_use]
pub fn hit_test(pt: Point, doc: &ObjectStore) -> Option<ObjectId> {
    doc.objects().iter().rev().find(|o| contains(o, pt)).map(|o| o.id)
}
