//! Base product context and catalog adapters.
//!
//! `BaseProduct` is the engine's view of the product being customized. It is
//! built from a storefront [`ProductRecord`] plus one selected variant and is
//! replaced wholesale on variant/color switches; nothing mutates it in place.
//! `AddOn` captures the purchasable SKU behind the embroidery and vinyl
//! features, and `DropPayload` is the data a catalog tile carries while it is
//! dragged onto the canvas.

#[cfg(test)]
#[path = "product_test.rs"]
mod product_test;

use commerce::{CatalogProduct, ProductRecord, Variant};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CURRENCY, DEFAULT_MAX_CHARACTERS, DEFAULT_MAX_ITEMS_PER_LINE, DEFAULT_MAX_LINES,
};
use crate::doc::{Decal, DecalKind};
use crate::geom::Size;

/// Per-product customization limits and feature switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRules {
    pub max_characters: usize,
    pub max_lines: usize,
    pub max_items_per_line: usize,
    /// Letters & patches mode offered.
    pub letters_patches_enabled: bool,
    /// Vinyl (cricut) mode offered.
    pub vinyl_enabled: bool,
    /// Display scale applied to every variant image so none is cropped.
    pub display_scale: f64,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_lines: DEFAULT_MAX_LINES,
            max_items_per_line: DEFAULT_MAX_ITEMS_PER_LINE,
            letters_patches_enabled: true,
            vinyl_enabled: true,
            display_scale: 1.0,
        }
    }
}

impl ProductRules {
    /// Read rules from product metafields, falling back to defaults per field.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        let defaults = Self::default();
        Self {
            max_characters: record
                .max_characters
                .as_ref()
                .and_then(commerce::Metafield::as_limit)
                .unwrap_or(defaults.max_characters),
            max_lines: record
                .max_lines
                .as_ref()
                .and_then(commerce::Metafield::as_limit)
                .unwrap_or(defaults.max_lines),
            max_items_per_line: record
                .max_items_per_line
                .as_ref()
                .and_then(commerce::Metafield::as_limit)
                .unwrap_or(defaults.max_items_per_line),
            letters_patches_enabled: record
                .lp_enabled
                .as_ref()
                .and_then(commerce::Metafield::as_flag)
                .unwrap_or(defaults.letters_patches_enabled),
            vinyl_enabled: record
                .cricut_enabled
                .as_ref()
                .and_then(commerce::Metafield::as_flag)
                .unwrap_or(defaults.vinyl_enabled),
            display_scale: record
                .display_scale
                .as_ref()
                .and_then(commerce::Metafield::as_number)
                .unwrap_or(defaults.display_scale),
        }
    }
}

/// The product being customized, pinned to one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// Image drawn as the canvas background.
    pub image: Option<String>,
    /// Intrinsic image size when the catalog reports it.
    pub image_size: Option<Size>,
    pub price: f64,
    pub currency: String,
    pub variant_id: Option<String>,
    pub color: Option<String>,
    pub rules: ProductRules,
    /// Informational copy shown in the vinyl panel.
    pub vinyl_note: Option<String>,
}

impl BaseProduct {
    /// Build from a product record and one of its variants.
    ///
    /// With no variant the product still loads; it just has no purchasable
    /// variant and a zero price until one is selected.
    #[must_use]
    pub fn from_record(record: &ProductRecord, variant: Option<&Variant>) -> Self {
        let mut product = Self {
            id: record.id.clone(),
            title: record.title.clone(),
            handle: record.handle.clone(),
            image: record.featured_image.as_ref().map(|i| i.url.clone()),
            image_size: record.featured_image.as_ref().and_then(image_size),
            price: 0.0,
            currency: DEFAULT_CURRENCY.to_owned(),
            variant_id: None,
            color: None,
            rules: ProductRules::from_record(record),
            vinyl_note: record.cricut_text.as_ref().map(|m| m.value.clone()),
        };
        if let Some(v) = variant {
            product.apply_variant(v);
        }
        product
    }

    /// Build from a record using its initial (selected or first) variant.
    #[must_use]
    pub fn from_initial_variant(record: &ProductRecord) -> Self {
        Self::from_record(record, record.initial_variant())
    }

    /// A copy pinned to `variant`: new image, price, variant id, and color.
    /// Title, handle, and rules carry over.
    #[must_use]
    pub fn with_variant(&self, variant: &Variant) -> Self {
        let mut next = self.clone();
        next.apply_variant(variant);
        next
    }

    fn apply_variant(&mut self, variant: &Variant) {
        if let Some(img) = variant.display_image() {
            self.image = Some(img.url.clone());
            self.image_size = image_size(img);
        }
        self.price = variant.price.value();
        if let Some(code) = variant.price.currency_code.as_ref() {
            self.currency.clone_from(code);
        }
        self.variant_id = Some(variant.id.clone()).filter(|id| !id.is_empty());
        self.color = variant.color().map(str::to_owned);
    }
}

fn image_size(img: &commerce::ImageRef) -> Option<Size> {
    let size = Size::new(img.width?, img.height?);
    (!size.is_degenerate()).then_some(size)
}

/// The purchasable SKU behind a feature add-on (embroidery, vinyl).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub variant_id: String,
    pub price: f64,
}

impl AddOn {
    /// The add-on product's initial variant, if it has a usable id.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Option<Self> {
        let variant = record.initial_variant()?;
        let variant_id = record.addon_variant_id()?.to_owned();
        Some(Self { variant_id, price: variant.price.value() })
    }
}

/// Add-on SKUs known to the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddOns {
    pub embroidery: Option<AddOn>,
    pub vinyl: Option<AddOn>,
}

/// Errors produced when reading a drag payload.
#[derive(Debug, thiserror::Error)]
pub enum DropError {
    #[error("drop payload is empty")]
    Empty,
    #[error("malformed drop payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Data carried by a catalog tile while it is dragged onto the canvas.
///
/// Serialized as the `application/json` drag payload; the field names match
/// what the browsing panels write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    #[serde(rename = "type")]
    pub kind: DecalKind,
    /// Purchasable variant id.
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_title: String,
    #[serde(default)]
    pub variant_title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl DropPayload {
    /// Payload for dragging `variant` of catalog `product`.
    #[must_use]
    pub fn from_catalog(kind: DecalKind, product: &CatalogProduct, variant: &Variant) -> Self {
        Self {
            kind,
            id: variant.id.clone(),
            product_id: product.id.clone(),
            product_title: product.title.clone(),
            variant_title: variant.title.clone(),
            image: variant.image.as_ref().map(|i| i.url.clone()),
            price: variant.price.value(),
            color: variant.color().map(str::to_owned),
        }
    }

    /// Parse the raw drag data. Anything but a letter/patch payload is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DropError::Empty`] for blank input and
    /// [`DropError::Malformed`] when the JSON does not describe a decal.
    pub fn parse(raw: &str) -> Result<Self, DropError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DropError::Empty);
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Decal payload for the canvas object created by this drop.
    #[must_use]
    pub fn to_decal(&self) -> Decal {
        Decal {
            variant_id: Some(self.id.clone()).filter(|id| !id.is_empty()),
            product_id: self.product_id.clone(),
            product_title: self.product_title.clone(),
            variant_title: self.variant_title.clone(),
            image: self.image.clone(),
            color: self.color.clone(),
        }
    }
}
