//! Validation and pricing.
//!
//! Both are pure functions of the session snapshot, recomputed on demand.
//! Nothing here mutates state; the engine asks for a [`Quote`] or a
//! [`Validation`] whenever the host needs to show one.

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;

use serde::Serialize;

use crate::consts::{DEFAULT_CURRENCY, DEFAULT_EMBROIDERY_PRICE, DEFAULT_VINYL_PRICE, LINE_THRESHOLD};
use crate::doc::{CanvasObject, EmbroideryStyle, ObjectKind};
use crate::input::Mode;
use crate::product::{AddOns, BaseProduct, ProductRules};

// =============================================================
// Pricing
// =============================================================

/// Price charged for embroidery: the add-on variant price when known.
#[must_use]
pub fn embroidery_price(addons: &AddOns) -> f64 {
    addons.embroidery.as_ref().map_or(DEFAULT_EMBROIDERY_PRICE, |a| a.price)
}

/// Price charged for vinyl: the add-on variant price when known.
#[must_use]
pub fn vinyl_price(addons: &AddOns) -> f64 {
    addons.vinyl.as_ref().map_or(DEFAULT_VINYL_PRICE, |a| a.price)
}

/// The price an object contributes to the total.
///
/// Stamped prices win. Unstamped vinyl and embroidery fall back to their
/// add-on price; unstamped letters and patches are free.
#[must_use]
pub fn item_price(obj: &CanvasObject, addons: &AddOns) -> f64 {
    let price = match (&obj.kind, obj.price) {
        (_, Some(p)) => p,
        (ObjectKind::Vinyl(_), None) => vinyl_price(addons),
        (ObjectKind::Embroidery(_), None) => embroidery_price(addons),
        (ObjectKind::Letter(_) | ObjectKind::Patch(_), None) => 0.0,
    };
    if price.is_finite() { price } else { 0.0 }
}

/// Running subtotal for the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub base_price: f64,
    pub customization_total: f64,
    pub total: f64,
    pub currency: String,
}

impl Quote {
    /// Display form, e.g. `AED 170.00`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{} {:.2}", self.currency, self.total)
    }
}

/// Base price plus every object's contribution.
#[must_use]
pub fn quote(product: Option<&BaseProduct>, objects: &[CanvasObject], addons: &AddOns) -> Quote {
    let base_price = product.map_or(0.0, |p| p.price);
    let customization_total: f64 = objects.iter().map(|o| item_price(o, addons)).sum();
    Quote {
        base_price,
        customization_total,
        total: base_price + customization_total,
        currency: product.map_or_else(|| DEFAULT_CURRENCY.to_owned(), |p| p.currency.clone()),
    }
}

// =============================================================
// Validation
// =============================================================

/// A rule the current design breaks. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("You can have a maximum of {max_characters} embroidery characters.")]
    EmbroideryTooLong { max_characters: usize, characters: usize },
    #[error(
        "You can have a maximum of {max_lines} lines and {max_items_per_line} items per line. Make sure all items are aligned."
    )]
    LineLayout { max_lines: usize, max_items_per_line: usize, lines: usize, max_items_used: usize },
}

/// Outcome of validating the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub embroidery_valid: bool,
    pub lines_valid: bool,
    pub line_count: usize,
    pub max_items_used: usize,
    /// Checkout is refused while this is set.
    pub blocked: bool,
    pub violations: Vec<Violation>,
}

impl Validation {
    /// User-facing messages, in validation order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

/// Group letters and patches into horizontal lines.
///
/// Objects are taken in ascending y. Each joins the first existing line whose
/// first member is less than [`LINE_THRESHOLD`] away in y, else opens a new
/// line.
#[must_use]
pub fn group_lines(objects: &[CanvasObject]) -> Vec<Vec<&CanvasObject>> {
    let mut decals: Vec<&CanvasObject> = objects.iter().filter(|o| o.object_type().is_decal()).collect();
    decals.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut lines: Vec<Vec<&CanvasObject>> = Vec::new();
    for obj in decals {
        match lines.iter_mut().find(|line| (line[0].y - obj.y).abs() < LINE_THRESHOLD) {
            Some(line) => line.push(obj),
            None => lines.push(vec![obj]),
        }
    }
    lines
}

/// Check embroidery length and the letter/patch line layout.
///
/// `embroidery` is the embroidery state when the feature is enabled.
#[must_use]
pub fn validate(rules: &ProductRules, embroidery: Option<&EmbroideryStyle>, objects: &[CanvasObject]) -> Validation {
    let mut violations = Vec::new();

    let characters = embroidery.map_or(0, EmbroideryStyle::char_count);
    let embroidery_valid = embroidery.is_none() || characters <= rules.max_characters;
    if !embroidery_valid {
        violations.push(Violation::EmbroideryTooLong { max_characters: rules.max_characters, characters });
    }

    let lines = group_lines(objects);
    let line_count = lines.len();
    let max_items_used = lines.iter().map(Vec::len).max().unwrap_or(0);
    let lines_valid = line_count <= rules.max_lines && max_items_used <= rules.max_items_per_line;
    let has_decals = line_count > 0;
    if has_decals && !lines_valid {
        violations.push(Violation::LineLayout {
            max_lines: rules.max_lines,
            max_items_per_line: rules.max_items_per_line,
            lines: line_count,
            max_items_used,
        });
    }

    Validation {
        embroidery_valid,
        lines_valid,
        line_count,
        max_items_used,
        blocked: !embroidery_valid || (has_decals && !lines_valid),
        violations,
    }
}

/// Modes offered for a product, honoring its feature switches.
#[must_use]
pub fn available_modes(rules: &ProductRules) -> Vec<Mode> {
    Mode::ALL
        .into_iter()
        .filter(|m| match m {
            Mode::LettersPatches => rules.letters_patches_enabled,
            Mode::Vinyl => rules.vinyl_enabled,
            Mode::Color | Mode::Embroidery => true,
        })
        .collect()
}
