//! Input model: session mode, alignment mode, UI toggles, and the gesture
//! state machine.
//!
//! `UiState` is the persistent, user-visible part of the session (which panel
//! is open, what is selected, design aids and auto-align). `InputState` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the
//! context needed to apply incremental moves and commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::ObjectId;
use crate::geom::Point;

/// Which customization panel is active.
///
/// Switching mode never destroys objects placed under another mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pick the product color/variant (initial).
    #[default]
    Color,
    /// Drag letters and patches from the catalog.
    LettersPatches,
    /// Edit the embroidery text.
    Embroidery,
    /// Upload vinyl artwork.
    Vinyl,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Color, Mode::LettersPatches, Mode::Embroidery, Mode::Vinyl];

    /// Panel label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Color => "Pick Personalisation (Color)",
            Self::LettersPatches => "Letters & Patches",
            Self::Embroidery => "Embroidery",
            Self::Vinyl => "Cricut/Vinyl",
        }
    }
}

/// Vertical component of an alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Horizontal component of an alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// One of the nine anchor combinations, written `vertical_horizontal`
/// (e.g. `top_left`, `middle_center`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AlignmentMode {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl AlignmentMode {
    #[must_use]
    pub fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Self { vertical, horizontal }
    }

    /// All nine modes, row-major from top-left.
    #[must_use]
    pub fn all() -> [AlignmentMode; 9] {
        let v = [VAlign::Top, VAlign::Middle, VAlign::Bottom];
        let h = [HAlign::Left, HAlign::Center, HAlign::Right];
        std::array::from_fn(|i| Self::new(v[i / 3], h[i % 3]))
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        };
        let h = match self.horizontal {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        };
        write!(f, "{v}_{h}")
    }
}

/// Error returned when a string is not a valid [`AlignmentMode`].
#[derive(Debug, thiserror::Error)]
#[error("invalid alignment mode: {0}")]
pub struct InvalidAlignmentMode(pub String);

impl FromStr for AlignmentMode {
    type Err = InvalidAlignmentMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidAlignmentMode(s.to_owned());
        let (v, h) = s.split_once('_').ok_or_else(err)?;
        let vertical = match v {
            "top" => VAlign::Top,
            "middle" => VAlign::Middle,
            "bottom" => VAlign::Bottom,
            _ => return Err(err()),
        };
        let horizontal = match h {
            "left" => HAlign::Left,
            "center" => HAlign::Center,
            "right" => HAlign::Right,
            _ => return Err(err()),
        };
        Ok(Self { vertical, horizontal })
    }
}

impl From<AlignmentMode> for String {
    fn from(mode: AlignmentMode) -> Self {
        mode.to_string()
    }
}

impl TryFrom<String> for AlignmentMode {
    type Error = InvalidAlignmentMode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Persistent UI state visible to the renderer and the panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub mode: Mode,
    /// The id of the currently selected object, if any.
    pub selected_id: Option<ObjectId>,
    /// Draw zone outlines over the product.
    pub show_design_aids: bool,
    /// Snap and redistribute letters/patches instead of following free drag.
    pub auto_align: bool,
    pub alignment_mode: AlignmentMode,
}

impl UiState {
    /// Reset the toggles and selection, keeping the active mode.
    pub fn reset_toggles(&mut self) {
        *self = Self { mode: self.mode, ..Self::default() };
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an object across the canvas.
    DraggingObject {
        id: ObjectId,
        /// Pointer position minus object center at grab time.
        grab_offset: Point,
        /// Object center at the start of the drag.
        origin: Point,
    },
    /// The user is resizing or rotating an object with the transformer.
    TransformingObject { id: ObjectId },
}

impl InputState {
    /// Id of the object the current gesture is acting on.
    #[must_use]
    pub fn active_id(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::DraggingObject { id, .. } | Self::TransformingObject { id } => Some(*id),
        }
    }
}
