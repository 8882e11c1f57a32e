use super::*;

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_default_is_color() {
    assert_eq!(Mode::default(), Mode::Color);
}

#[test]
fn mode_serde_snake_case() {
    assert_eq!(serde_json::to_string(&Mode::LettersPatches).unwrap(), "\"letters_patches\"");
    let back: Mode = serde_json::from_str("\"vinyl\"").unwrap();
    assert_eq!(back, Mode::Vinyl);
}

#[test]
fn mode_labels_are_distinct() {
    let mut labels: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
    labels.dedup();
    assert_eq!(labels.len(), 4);
}

// =============================================================
// AlignmentMode
// =============================================================

#[test]
fn alignment_default_is_middle_center() {
    assert_eq!(AlignmentMode::default().to_string(), "middle_center");
}

#[test]
fn alignment_all_has_nine_unique_modes() {
    let all = AlignmentMode::all();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(all[0].to_string(), "top_left");
    assert_eq!(all[8].to_string(), "bottom_right");
}

#[test]
fn alignment_parse_display_agree() {
    for mode in AlignmentMode::all() {
        let parsed: AlignmentMode = mode.to_string().parse().unwrap();
        assert_eq!(parsed, mode);
    }
}

#[test]
fn alignment_parse_rejects_garbage() {
    assert!("top".parse::<AlignmentMode>().is_err());
    assert!("center_middle".parse::<AlignmentMode>().is_err());
    assert!("top_centre".parse::<AlignmentMode>().is_err());
}

#[test]
fn alignment_serde_as_string() {
    let mode = AlignmentMode::new(VAlign::Bottom, HAlign::Left);
    assert_eq!(serde_json::to_string(&mode).unwrap(), "\"bottom_left\"");
    let back: AlignmentMode = serde_json::from_str("\"top_right\"").unwrap();
    assert_eq!(back, AlignmentMode::new(VAlign::Top, HAlign::Right));
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_reset_keeps_mode() {
    let mut ui = UiState {
        mode: Mode::Embroidery,
        selected_id: Some(ObjectId::Vinyl),
        show_design_aids: true,
        auto_align: true,
        alignment_mode: AlignmentMode::new(VAlign::Top, HAlign::Left),
    };
    ui.reset_toggles();
    assert_eq!(ui.mode, Mode::Embroidery);
    assert_eq!(ui.selected_id, None);
    assert!(!ui.show_design_aids);
    assert!(!ui.auto_align);
    assert_eq!(ui.alignment_mode, AlignmentMode::default());
}

#[test]
fn input_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert_eq!(InputState::Idle.active_id(), None);
}

#[test]
fn input_active_id_for_gestures() {
    let drag = InputState::DraggingObject {
        id: ObjectId::Embroidery,
        grab_offset: Point::new(0.0, 0.0),
        origin: Point::new(1.0, 1.0),
    };
    assert_eq!(drag.active_id(), Some(ObjectId::Embroidery));
    assert_eq!(InputState::TransformingObject { id: ObjectId::Vinyl }.active_id(), Some(ObjectId::Vinyl));
}
