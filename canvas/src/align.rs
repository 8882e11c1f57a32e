//! Auto-align distributor.
//!
//! Spreads letters and patches evenly along a row inside the zone nearest to
//! each, honoring the session's alignment mode. The distributor is a pure
//! function of the object list: it returns the replacement list, or `None`
//! when nothing would move by more than [`ALIGN_EPSILON`]. That guard makes a
//! second pass over its own output a no-op, so running it after every commit
//! cannot loop.

#[cfg(test)]
#[path = "align_test.rs"]
mod align_test;

use crate::consts::{ALIGN_EPSILON, ANCHOR_MARGIN, SLOT_PADDING, SLOT_WIDTH};
use crate::doc::CanvasObject;
use crate::input::{AlignmentMode, HAlign};
use crate::placement::{anchor_y, nearest_zone_index};
use crate::zone::Zone;

/// Center-to-center distance between adjacent slots.
const SLOT_PITCH: f64 = SLOT_WIDTH + SLOT_PADDING;

/// Center x of the first slot in a row of `n` items.
fn row_start(zone: &Zone, n: usize, horizontal: HAlign) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = n as f64;
    match horizontal {
        HAlign::Left => zone.rect.x + ANCHOR_MARGIN,
        HAlign::Center => {
            let row_width = n * SLOT_WIDTH + (n - 1.0) * SLOT_PADDING;
            zone.center().x - row_width / 2.0 + SLOT_WIDTH / 2.0
        }
        HAlign::Right => zone.rect.right() - ANCHOR_MARGIN - (n - 1.0) * SLOT_PITCH,
    }
}

fn moved(a: &CanvasObject, b: &CanvasObject) -> bool {
    (a.x - b.x).abs() > ALIGN_EPSILON
        || (a.y - b.y).abs() > ALIGN_EPSILON
        || (a.rotation - b.rotation).abs() > ALIGN_EPSILON
}

/// Compute the distributed layout for `objects`.
///
/// Returns the full replacement list (same order, same ids) when at least one
/// letter or patch moves or un-rotates by more than [`ALIGN_EPSILON`];
/// otherwise `None`. Embroidery and vinyl are passed through untouched.
#[must_use]
pub fn distribute(objects: &[CanvasObject], zones: &[Zone], mode: AlignmentMode) -> Option<Vec<CanvasObject>> {
    // Per zone: indices into `objects` of the eligible members.
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); zones.len()];
    for (idx, obj) in objects.iter().enumerate() {
        if !obj.object_type().is_decal() {
            continue;
        }
        let zi = nearest_zone_index(obj.center(), zones)?;
        groups[zi].push(idx);
    }

    let mut next = objects.to_vec();
    for (zone, members) in zones.iter().zip(groups.iter_mut()) {
        if members.is_empty() {
            continue;
        }
        // Stable: equal x keeps insertion order.
        members.sort_by(|&a, &b| objects[a].x.total_cmp(&objects[b].x));
        let start = row_start(zone, members.len(), mode.horizontal);
        let y = anchor_y(zone, mode.vertical);
        for (slot, &idx) in members.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = slot as f64 * SLOT_PITCH;
            let obj = &mut next[idx];
            obj.x = start + offset;
            obj.y = y;
            obj.rotation = 0.0;
        }
    }

    let changed = objects.iter().zip(&next).any(|(a, b)| moved(a, b));
    if changed {
        tracing::debug!(count = next.len(), mode = %mode, "auto-align redistributed objects");
        Some(next)
    } else {
        None
    }
}
