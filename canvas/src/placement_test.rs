#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::{Rect, Size};
use crate::zone::derive_zones;

fn hoodie_zones() -> Vec<Zone> {
    // z1 60..540 x 150..230, z2 60..540 x 260..340, z3 60..540 x 370..450
    derive_zones("Large Hoodie", Size::new(600.0, 600.0), None)
}

fn zone(x: f64, y: f64, w: f64, h: f64) -> Zone {
    Zone { id: "z".into(), rect: Rect::new(x, y, w, h), label: String::new() }
}

// =============================================================
// nearest_zone
// =============================================================

#[test]
fn nearest_zone_by_center_distance() {
    let zones = hoodie_zones();
    assert_eq!(nearest_zone(Point::new(300.0, 0.0), &zones).unwrap().id, "z1");
    assert_eq!(nearest_zone(Point::new(10.0, 300.0), &zones).unwrap().id, "z2");
    assert_eq!(nearest_zone(Point::new(590.0, 599.0), &zones).unwrap().id, "z3");
}

#[test]
fn nearest_zone_tie_goes_to_first() {
    let zones = hoodie_zones();
    // Exactly between the z1 center (190) and z2 center (300).
    assert_eq!(nearest_zone(Point::new(300.0, 245.0), &zones).unwrap().id, "z1");
}

#[test]
fn nearest_zone_empty_is_none() {
    assert!(nearest_zone(Point::new(0.0, 0.0), &[]).is_none());
}

// =============================================================
// constrain: auto-align off
// =============================================================

#[test]
fn clamp_inside_zone_is_unchanged() {
    let zones = hoodie_zones();
    let out = constrain(Point::new(200.0, 300.0), &zones, false, AlignmentMode::default()).unwrap();
    assert_eq!(out, Point::new(200.0, 300.0));
}

#[test]
fn clamp_outside_pulls_to_edge_of_nearest() {
    let zones = hoodie_zones();
    let out = constrain(Point::new(10.0, 295.0), &zones, false, AlignmentMode::default()).unwrap();
    assert_eq!(out, Point::new(60.0, 295.0));

    let out = constrain(Point::new(700.0, 700.0), &zones, false, AlignmentMode::default()).unwrap();
    assert_eq!(out, Point::new(540.0, 450.0));
}

#[test]
fn clamped_point_lies_in_exactly_one_zone() {
    let zones = hoodie_zones();
    for x in (-100..=700).step_by(37) {
        for y in (-100..=700).step_by(29) {
            let out = constrain(Point::new(f64::from(x), f64::from(y)), &zones, false, AlignmentMode::default()).unwrap();
            let hits = zones.iter().filter(|z| z.rect.contains(out)).count();
            assert_eq!(hits, 1, "{out:?}");
        }
    }
}

#[test]
fn constrain_without_zones_is_none() {
    assert!(constrain(Point::new(1.0, 1.0), &[], false, AlignmentMode::default()).is_none());
}

// =============================================================
// constrain: auto-align on
// =============================================================

#[test]
fn nine_anchors_of_one_zone() {
    let z = zone(100.0, 100.0, 400.0, 80.0);
    let zones = vec![z];
    let cases = [
        ("top_left", 150.0, 120.0),
        ("top_center", 300.0, 120.0),
        ("top_right", 450.0, 120.0),
        ("middle_left", 150.0, 140.0),
        ("middle_center", 300.0, 140.0),
        ("middle_right", 450.0, 140.0),
        ("bottom_left", 150.0, 160.0),
        ("bottom_center", 300.0, 160.0),
        ("bottom_right", 450.0, 160.0),
    ];
    for (mode, x, y) in cases {
        let mode: AlignmentMode = mode.parse().unwrap();
        let out = constrain(Point::new(0.0, 0.0), &zones, true, mode).unwrap();
        assert_eq!(out, Point::new(x, y), "{mode}");
    }
}

#[test]
fn snap_ignores_pointer_within_zone() {
    let zones = hoodie_zones();
    let a = constrain(Point::new(70.0, 265.0), &zones, true, AlignmentMode::default()).unwrap();
    let b = constrain(Point::new(530.0, 335.0), &zones, true, AlignmentMode::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Point::new(300.0, 300.0));
}

#[test]
fn anchor_stays_inside_narrow_zone() {
    let z = zone(0.0, 0.0, 60.0, 20.0);
    let left = anchor_point(&z, AlignmentMode::new(VAlign::Top, HAlign::Left));
    let right = anchor_point(&z, AlignmentMode::new(VAlign::Top, HAlign::Right));
    assert!(z.rect.contains(left));
    assert!(z.rect.contains(right));
}
