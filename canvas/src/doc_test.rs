#![allow(clippy::float_cmp)]

use super::*;

fn letter(title: &str) -> ObjectKind {
    ObjectKind::Letter(Decal {
        variant_id: Some(format!("v-{title}")),
        product_id: format!("p-{title}"),
        product_title: title.to_owned(),
        variant_title: "Gold".into(),
        image: Some(format!("https://cdn.test/{title}.png")),
        color: Some("Gold".into()),
    })
}

fn embroidery(text: &str) -> ObjectKind {
    ObjectKind::Embroidery(EmbroideryStyle { text: text.to_owned(), ..EmbroideryStyle::default() })
}

fn vinyl() -> ObjectKind {
    ObjectKind::Vinyl(VinylArt { image: "data:image/png;base64,AAAA".into(), filename: Some("art.png".into()) })
}

fn at(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// ObjectId
// =============================================================

#[test]
fn singleton_ids_display_fixed_strings() {
    assert_eq!(ObjectId::Embroidery.to_string(), "embroidery-main");
    assert_eq!(ObjectId::Vinyl.to_string(), "vinyl-main");
}

#[test]
fn object_id_parse_accepts_fixed_and_uuid() {
    assert_eq!("embroidery-main".parse::<ObjectId>().unwrap(), ObjectId::Embroidery);
    assert_eq!("vinyl-main".parse::<ObjectId>().unwrap(), ObjectId::Vinyl);
    let item = ObjectId::new_item();
    assert_eq!(item.to_string().parse::<ObjectId>().unwrap(), item);
}

#[test]
fn object_id_parse_rejects_garbage() {
    let err = "letter-7".parse::<ObjectId>().unwrap_err();
    assert_eq!(err.to_string(), "invalid object id: letter-7");
}

#[test]
fn new_item_ids_are_unique() {
    assert_ne!(ObjectId::new_item(), ObjectId::new_item());
}

// =============================================================
// ObjectKind / CanvasObject
// =============================================================

#[test]
fn kind_reports_type_and_decal() {
    assert_eq!(letter("A").object_type(), ObjectType::Letter);
    assert!(letter("A").as_decal().is_some());
    assert!(embroidery("Hi").as_decal().is_none());
    assert!(ObjectType::Patch.is_decal());
    assert!(!ObjectType::Vinyl.is_decal());
}

#[test]
fn kind_decal_constructor_picks_variant() {
    let d = Decal::default();
    assert_eq!(ObjectKind::decal(DecalKind::Letter, d.clone()).object_type(), ObjectType::Letter);
    assert_eq!(ObjectKind::decal(DecalKind::Patch, d).object_type(), ObjectType::Patch);
}

#[test]
fn image_src_per_kind() {
    assert_eq!(letter("B").image_src(), Some("https://cdn.test/B.png"));
    assert_eq!(vinyl().image_src(), Some("data:image/png;base64,AAAA"));
    assert_eq!(embroidery("x").image_src(), None);
}

#[test]
fn new_object_has_identity_transform() {
    let obj = CanvasObject::new(letter("A"), at(10.0, 20.0), Some(15.0));
    assert!(matches!(obj.id, ObjectId::Item(_)));
    assert_eq!(obj.center(), at(10.0, 20.0));
    assert_eq!(obj.rotation, 0.0);
    assert_eq!((obj.scale_x, obj.scale_y), (1.0, 1.0));
    assert_eq!(obj.price, Some(15.0));
    assert_eq!(obj.scaled_size(), None);
}

#[test]
fn new_singleton_objects_use_fixed_ids() {
    assert_eq!(CanvasObject::new(embroidery("Hi"), at(0.0, 0.0), None).id, ObjectId::Embroidery);
    assert_eq!(CanvasObject::new(vinyl(), at(0.0, 0.0), None).id, ObjectId::Vinyl);
}

#[test]
fn scaled_size_uses_absolute_scale() {
    let mut obj = CanvasObject::new(letter("A"), at(0.0, 0.0), None);
    obj.natural = Some(Size::new(200.0, 100.0));
    obj.scale_x = -0.5;
    obj.scale_y = 0.25;
    assert_eq!(obj.scaled_size(), Some(Size::new(100.0, 25.0)));
}

#[test]
fn object_json_is_flat_with_type_tag() {
    let obj = CanvasObject::new(embroidery("Hi"), at(1.0, 2.0), Some(80.0));
    let json = serde_json::to_value(&obj).unwrap();
    assert_eq!(json["id"], "embroidery-main");
    assert_eq!(json["type"], "embroidery");
    assert_eq!(json["text"], "Hi");
    assert_eq!(json["fontFamily"], "Lucida");
    assert_eq!(json["scaleX"], 1.0);
    let back: CanvasObject = serde_json::from_value(json).unwrap();
    assert_eq!(back, obj);
}

#[test]
fn object_json_omits_missing_price() {
    let obj = CanvasObject::new(vinyl(), at(0.0, 0.0), None);
    let json = serde_json::to_value(&obj).unwrap();
    assert!(json.get("price").is_none());
}

#[test]
fn embroidery_char_count_counts_chars() {
    let style = EmbroideryStyle { text: "Zoë".into(), ..EmbroideryStyle::default() };
    assert_eq!(style.char_count(), 3);
    assert_eq!(EmbroideryStyle::default().color, "Black");
}

// =============================================================
// ObjectPatch
// =============================================================

#[test]
fn patch_position_sets_only_xy() {
    let p = ObjectPatch::position(at(3.0, 4.0));
    assert_eq!(p.x, Some(3.0));
    assert_eq!(p.y, Some(4.0));
    assert_eq!(p.rotation, None);
    assert!(!p.is_empty());
    assert!(ObjectPatch::default().is_empty());
}

#[test]
fn patch_serde_skips_absent_fields() {
    let json = serde_json::to_string(&ObjectPatch { rotation: Some(45.0), ..Default::default() }).unwrap();
    assert_eq!(json, r#"{"rotation":45.0}"#);
}

// =============================================================
// ObjectStore
// =============================================================

#[test]
fn store_starts_empty() {
    let store = ObjectStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn insert_preserves_order() {
    let mut store = ObjectStore::new();
    let a = store.insert(CanvasObject::new(letter("A"), at(0.0, 0.0), None));
    let e = store.insert(CanvasObject::new(embroidery("x"), at(0.0, 0.0), None));
    let b = store.insert(CanvasObject::new(letter("B"), at(0.0, 0.0), None));
    let ids: Vec<ObjectId> = store.objects().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![a, e, b]);
}

#[test]
fn second_embroidery_replaces_first_in_place() {
    let mut store = ObjectStore::new();
    store.insert(CanvasObject::new(letter("A"), at(0.0, 0.0), None));
    store.insert(CanvasObject::new(embroidery("one"), at(1.0, 1.0), None));
    store.insert(CanvasObject::new(letter("B"), at(0.0, 0.0), None));
    store.insert(CanvasObject::new(embroidery("two"), at(2.0, 2.0), None));

    assert_eq!(store.len(), 3);
    assert_eq!(store.count_of(ObjectType::Embroidery), 1);
    assert_eq!(store.objects()[1].id, ObjectId::Embroidery);
    let ObjectKind::Embroidery(style) = &store.objects()[1].kind else {
        panic!("expected embroidery");
    };
    assert_eq!(style.text, "two");
}

#[test]
fn singleton_payload_is_forced_onto_fixed_id() {
    let mut store = ObjectStore::new();
    let mut obj = CanvasObject::new(vinyl(), at(0.0, 0.0), None);
    obj.id = ObjectId::new_item();
    assert_eq!(store.insert(obj), ObjectId::Vinyl);
    assert!(store.contains(&ObjectId::Vinyl));
}

#[test]
fn decal_cannot_claim_singleton_id() {
    let mut store = ObjectStore::new();
    store.insert(CanvasObject::new(embroidery("keep"), at(0.0, 0.0), None));
    let mut obj = CanvasObject::new(letter("A"), at(0.0, 0.0), None);
    obj.id = ObjectId::Embroidery;
    let id = store.insert(obj);
    assert!(matches!(id, ObjectId::Item(_)));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&ObjectId::Embroidery).unwrap().object_type(), ObjectType::Embroidery);
}

#[test]
fn remove_returns_object() {
    let mut store = ObjectStore::new();
    let id = store.insert(CanvasObject::new(letter("A"), at(0.0, 0.0), None));
    assert!(store.remove(&id).is_some());
    assert!(store.remove(&id).is_none());
    assert!(store.is_empty());
}

#[test]
fn apply_patch_updates_present_fields_only() {
    let mut store = ObjectStore::new();
    let id = store.insert(CanvasObject::new(letter("A"), at(10.0, 10.0), Some(15.0)));
    let patch = ObjectPatch { x: Some(99.0), scale_y: Some(2.0), ..Default::default() };
    assert!(store.apply_patch(&id, &patch));
    let obj = store.get(&id).unwrap();
    assert_eq!(obj.x, 99.0);
    assert_eq!(obj.y, 10.0);
    assert_eq!(obj.scale_x, 1.0);
    assert_eq!(obj.scale_y, 2.0);
    assert_eq!(obj.price, Some(15.0));
}

#[test]
fn apply_patch_missing_object_is_false() {
    let mut store = ObjectStore::new();
    assert!(!store.apply_patch(&ObjectId::Vinyl, &ObjectPatch::position(at(1.0, 1.0))));
}

#[test]
fn replace_all_reapplies_id_rules() {
    let mut store = ObjectStore::new();
    store.insert(CanvasObject::new(letter("old"), at(0.0, 0.0), None));
    store.replace_all(vec![
        CanvasObject::new(embroidery("a"), at(0.0, 0.0), None),
        CanvasObject::new(embroidery("b"), at(0.0, 0.0), None),
        CanvasObject::new(letter("C"), at(0.0, 0.0), None),
    ]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.count_of(ObjectType::Letter), 1);
    assert_eq!(store.count_of(ObjectType::Embroidery), 1);
}

#[test]
fn count_of_and_clear() {
    let mut store = ObjectStore::new();
    store.insert(CanvasObject::new(letter("A"), at(0.0, 0.0), None));
    store.insert(CanvasObject::new(vinyl(), at(0.0, 0.0), None));
    store.insert(CanvasObject::new(ObjectKind::Patch(Decal::default()), at(0.0, 0.0), None));
    assert_eq!(store.count_of(ObjectType::Patch), 1);
    assert_eq!(store.count_of(ObjectType::Embroidery), 0);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn embroidery_apply_merges_present_fields() {
    let mut style = EmbroideryStyle::default();
    style.apply(&EmbroideryPatch { text: Some("Maya".into()), ..EmbroideryPatch::default() });
    style.apply(&EmbroideryPatch { color: Some("Gold".into()), ..EmbroideryPatch::default() });
    assert_eq!(style.text, "Maya");
    assert_eq!(style.font_family, "Lucida");
    assert_eq!(style.color, "Gold");
}
