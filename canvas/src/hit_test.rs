#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Decal, EmbroideryStyle, VinylArt};

fn letter_at(x: f64, y: f64) -> CanvasObject {
    CanvasObject::new(ObjectKind::Letter(Decal::default()), Point::new(x, y), None)
}

// =============================================================
// footprint
// =============================================================

#[test]
fn footprint_falls_back_before_image_loads() {
    let obj = letter_at(0.0, 0.0);
    assert_eq!(footprint(&obj), Size::new(50.0, 50.0));
}

#[test]
fn footprint_uses_natural_size_times_scale() {
    let mut obj = letter_at(0.0, 0.0);
    obj.natural = Some(Size::new(400.0, 200.0));
    obj.scale_x = 0.125;
    obj.scale_y = 0.125;
    assert_eq!(footprint(&obj), Size::new(50.0, 25.0));
}

#[test]
fn footprint_scales_fallback() {
    let mut obj = CanvasObject::new(ObjectKind::Vinyl(VinylArt::default()), Point::new(0.0, 0.0), None);
    obj.scale_x = 2.0;
    assert_eq!(footprint(&obj), Size::new(100.0, 50.0));
}

#[test]
fn footprint_embroidery_grows_with_text() {
    let short = CanvasObject::new(
        ObjectKind::Embroidery(EmbroideryStyle { text: "Hi".into(), ..EmbroideryStyle::default() }),
        Point::new(0.0, 0.0),
        None,
    );
    let long = CanvasObject::new(
        ObjectKind::Embroidery(EmbroideryStyle { text: "Hello there".into(), ..EmbroideryStyle::default() }),
        Point::new(0.0, 0.0),
        None,
    );
    assert!(footprint(&long).width > footprint(&short).width);
    assert_eq!(footprint(&short).height, 30.0);
}

// =============================================================
// contains
// =============================================================

#[test]
fn contains_center_and_edges() {
    let obj = letter_at(100.0, 100.0);
    assert!(contains(&obj, Point::new(100.0, 100.0)));
    assert!(contains(&obj, Point::new(125.0, 75.0)));
    assert!(!contains(&obj, Point::new(126.0, 100.0)));
}

#[test]
fn contains_respects_rotation() {
    let mut obj = letter_at(0.0, 0.0);
    obj.natural = Some(Size::new(100.0, 10.0));
    assert!(contains(&obj, Point::new(40.0, 0.0)));
    assert!(!contains(&obj, Point::new(0.0, 40.0)));
    obj.rotation = 90.0;
    assert!(!contains(&obj, Point::new(40.0, 0.0)));
    assert!(contains(&obj, Point::new(0.0, 40.0)));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_empty_store() {
    assert_eq!(hit_test(Point::new(0.0, 0.0), &ObjectStore::new()), None);
}

#[test]
fn hit_test_returns_topmost() {
    let mut doc = ObjectStore::new();
    let below = doc.insert(letter_at(100.0, 100.0));
    let above = doc.insert(letter_at(120.0, 100.0));
    assert_eq!(hit_test(Point::new(110.0, 100.0), &doc), Some(above));
    assert_eq!(hit_test(Point::new(80.0, 100.0), &doc), Some(below));
    assert_eq!(hit_test(Point::new(300.0, 300.0), &doc), None);
}
