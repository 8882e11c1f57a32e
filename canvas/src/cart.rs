//! Cart bundle assembly.
//!
//! Turns a settled session into one [`LinesAdd`] request: the base product
//! line, then the embroidery and vinyl add-on lines, then one line per
//! purchasable letter or patch. Every child line carries the same
//! `Parent_Ref` as the base line's `Customization_Ref`, so the order system
//! can regroup the bundle.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use commerce::{CartLine, LinesAdd};

use crate::doc::{CanvasObject, EmbroideryStyle, VinylArt};
use crate::product::{AddOns, BaseProduct};
use crate::rules;

pub const ATTR_TOTAL_ITEMS: &str = "Total_Items";
pub const ATTR_CUSTOMIZATION_REF: &str = "Customization_Ref";
pub const ATTR_INCLUDES_EMBROIDERY: &str = "Includes_Embroidery";
pub const ATTR_INCLUDES_VINYL: &str = "Includes_Vinyl";
pub const ATTR_PARENT_REF: &str = "Parent_Ref";

/// Filename reported for vinyl uploads that did not carry one.
const DEFAULT_VINYL_FILENAME: &str = "Uploaded Image";

/// Errors that prevent a bundle from being built.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("no base product loaded")]
    NoBaseProduct,
    #[error("base product has no purchasable variant")]
    MissingVariant,
    #[error("checkout blocked: {}", .0.join(" "))]
    Blocked(Vec<String>),
}

/// Reference shared by every line of one submission.
#[must_use]
pub fn customization_ref(millis: u64) -> String {
    format!("Ref-{millis}")
}

/// Everything the bundle is built from.
#[derive(Debug, Clone, Copy)]
pub struct BundleSource<'a> {
    pub product: Option<&'a BaseProduct>,
    pub objects: &'a [CanvasObject],
    /// Embroidery state when the feature is enabled.
    pub embroidery: Option<&'a EmbroideryStyle>,
    /// Vinyl state when an image is set.
    pub vinyl: Option<&'a VinylArt>,
    pub addons: &'a AddOns,
}

/// Whole-number attribute text. Halves round toward positive infinity, so
/// -45.5 becomes -45.
fn rounded(v: f64) -> String {
    // Adding zero turns -0 into 0.
    format!("{:.0}", (v + 0.5).floor() + 0.0)
}

/// Build the cart request for one submission.
///
/// Add-on and decal lines whose purchasable variant is unknown are left out
/// with a warning; the base line is always first.
///
/// # Errors
///
/// Returns [`CartError::NoBaseProduct`] without a product,
/// [`CartError::MissingVariant`] when the product has no variant id, and
/// [`CartError::Blocked`] while validation fails.
pub fn build_lines(src: &BundleSource<'_>, reference: &str) -> Result<LinesAdd, CartError> {
    let product = src.product.ok_or(CartError::NoBaseProduct)?;
    let variant_id = product.variant_id.as_deref().ok_or(CartError::MissingVariant)?;

    let validation = rules::validate(&product.rules, src.embroidery, src.objects);
    if validation.blocked {
        return Err(CartError::Blocked(validation.messages()));
    }

    let mut base = CartLine::new(variant_id)
        .with_attribute(ATTR_TOTAL_ITEMS, src.objects.len().to_string())
        .with_attribute(ATTR_CUSTOMIZATION_REF, reference);
    if src.embroidery.is_some() {
        base = base.with_attribute(ATTR_INCLUDES_EMBROIDERY, "Yes");
    }
    if src.vinyl.is_some() {
        base = base.with_attribute(ATTR_INCLUDES_VINYL, "Yes");
    }
    let mut lines = vec![base];

    if let Some(style) = src.embroidery {
        match &src.addons.embroidery {
            Some(addon) => lines.push(
                CartLine::new(addon.variant_id.as_str())
                    .with_attribute("Text", style.text.as_str())
                    .with_attribute("Font", style.font_family.as_str())
                    .with_attribute("Color", style.color.as_str())
                    .with_attribute(ATTR_PARENT_REF, reference),
            ),
            None => tracing::warn!("embroidery enabled but no embroidery add-on variant; line omitted"),
        }
    }

    if let Some(art) = src.vinyl {
        match &src.addons.vinyl {
            Some(addon) => lines.push(
                CartLine::new(addon.variant_id.as_str())
                    .with_attribute("Filename", art.filename.as_deref().unwrap_or(DEFAULT_VINYL_FILENAME))
                    .with_attribute(ATTR_PARENT_REF, reference),
            ),
            None => tracing::warn!("vinyl image set but no vinyl add-on variant; line omitted"),
        }
    }

    for obj in src.objects {
        let Some(decal) = obj.kind.as_decal() else {
            continue;
        };
        let Some(merchandise_id) = decal.variant_id.as_deref() else {
            tracing::warn!(id = %obj.id, title = %decal.product_title, "decal has no variant; line omitted");
            continue;
        };
        lines.push(
            CartLine::new(merchandise_id)
                .with_attribute("Placement_X", rounded(obj.x))
                .with_attribute("Placement_Y", rounded(obj.y))
                .with_attribute("Rotation", rounded(obj.rotation))
                .with_attribute("Scale", format!("{:.2}", obj.scale_x))
                .with_attribute(ATTR_PARENT_REF, reference),
        );
    }

    tracing::info!(lines = lines.len(), reference, "assembled cart bundle");
    Ok(LinesAdd { lines })
}
