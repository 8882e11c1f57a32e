//! Document model: canvas objects, their payloads, and the ordered store.
//!
//! This module defines what can sit on the product canvas (`CanvasObject`,
//! whose `ObjectKind` is a closed sum over letter / patch / embroidery /
//! vinyl), a sparse-update type for incremental edits (`ObjectPatch`), and the
//! runtime store that owns all placed objects (`ObjectStore`).
//!
//! Embroidery and vinyl are singletons. Their identity is not a convention:
//! `ObjectId` has dedicated variants for them, and [`ObjectStore::insert`]
//! derives the id from the payload so a second embroidery object can only
//! ever replace the first.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_EMBROIDERY_COLOR, DEFAULT_EMBROIDERY_FONT};
use crate::geom::{Point, Size};

const EMBROIDERY_ID: &str = "embroidery-main";
const VINYL_ID: &str = "vinyl-main";

/// Unique, stable identifier for a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ObjectId {
    /// The single embroidery text object.
    Embroidery,
    /// The single vinyl artwork object.
    Vinyl,
    /// A dropped letter or patch.
    Item(Uuid),
}

impl ObjectId {
    /// A fresh id for a letter or patch.
    #[must_use]
    pub fn new_item() -> Self {
        Self::Item(Uuid::new_v4())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embroidery => f.write_str(EMBROIDERY_ID),
            Self::Vinyl => f.write_str(VINYL_ID),
            Self::Item(id) => write!(f, "{id}"),
        }
    }
}

/// Error returned when a string is not a valid [`ObjectId`].
#[derive(Debug, thiserror::Error)]
#[error("invalid object id: {0}")]
pub struct InvalidObjectId(pub String);

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EMBROIDERY_ID => Ok(Self::Embroidery),
            VINYL_ID => Ok(Self::Vinyl),
            other => Uuid::parse_str(other)
                .map(Self::Item)
                .map_err(|_| InvalidObjectId(other.to_owned())),
        }
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Payload-free object type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Letter,
    Patch,
    Embroidery,
    Vinyl,
}

impl ObjectType {
    /// Letters and patches: catalog decals with their own purchasable variant.
    #[must_use]
    pub fn is_decal(self) -> bool {
        match self {
            Self::Letter | Self::Patch => true,
            Self::Embroidery | Self::Vinyl => false,
        }
    }
}

/// The two droppable catalog kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecalKind {
    Letter,
    Patch,
}

/// A catalog letter or patch placed on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decal {
    /// Purchasable catalog variant. Decals without one are not sent to the cart.
    pub variant_id: Option<String>,
    pub product_id: String,
    pub product_title: String,
    pub variant_title: String,
    pub image: Option<String>,
    pub color: Option<String>,
}

/// Embroidery text settings, mirrored into the embroidery object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbroideryStyle {
    pub text: String,
    pub font_family: String,
    pub color: String,
}

impl Default for EmbroideryStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: DEFAULT_EMBROIDERY_FONT.to_owned(),
            color: DEFAULT_EMBROIDERY_COLOR.to_owned(),
        }
    }
}

impl EmbroideryStyle {
    /// Text length in characters (not bytes).
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Merge the present fields of `patch`.
    pub fn apply(&mut self, patch: &EmbroideryPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(font) = &patch.font_family {
            self.font_family.clone_from(font);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
    }
}

/// Sparse update for the embroidery settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbroideryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Uploaded vinyl artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VinylArt {
    /// Image data (usually a data URL).
    pub image: String,
    pub filename: Option<String>,
}

/// Per-type payload of a canvas object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Letter(Decal),
    Patch(Decal),
    Embroidery(EmbroideryStyle),
    Vinyl(VinylArt),
}

impl ObjectKind {
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Letter(_) => ObjectType::Letter,
            Self::Patch(_) => ObjectType::Patch,
            Self::Embroidery(_) => ObjectType::Embroidery,
            Self::Vinyl(_) => ObjectType::Vinyl,
        }
    }

    /// Build a letter or patch payload.
    #[must_use]
    pub fn decal(kind: DecalKind, decal: Decal) -> Self {
        match kind {
            DecalKind::Letter => Self::Letter(decal),
            DecalKind::Patch => Self::Patch(decal),
        }
    }

    /// The decal payload for letters and patches.
    #[must_use]
    pub fn as_decal(&self) -> Option<&Decal> {
        match self {
            Self::Letter(d) | Self::Patch(d) => Some(d),
            Self::Embroidery(_) | Self::Vinyl(_) => None,
        }
    }

    /// Image source to draw, if the payload is image-based.
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        match self {
            Self::Letter(d) | Self::Patch(d) => d.image.as_deref(),
            Self::Vinyl(v) => Some(v.image.as_str()),
            Self::Embroidery(_) => None,
        }
    }

    /// The fixed id this payload must live under, for singleton kinds.
    fn singleton_id(&self) -> Option<ObjectId> {
        match self {
            Self::Embroidery(_) => Some(ObjectId::Embroidery),
            Self::Vinyl(_) => Some(ObjectId::Vinyl),
            Self::Letter(_) | Self::Patch(_) => None,
        }
    }
}

/// A placed decoration with its transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    pub id: ObjectId,
    /// Visual center x in canvas units.
    pub x: f64,
    /// Visual center y in canvas units.
    pub y: f64,
    /// Clockwise rotation in degrees around the center.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Price stamped at placement time; vinyl may be unstamped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Intrinsic image size once the image has decoded.
    #[serde(skip)]
    pub natural: Option<Size>,
}

impl CanvasObject {
    /// A new object at `at` with identity transform.
    #[must_use]
    pub fn new(kind: ObjectKind, at: Point, price: Option<f64>) -> Self {
        let id = kind.singleton_id().unwrap_or_else(ObjectId::new_item);
        Self { id, x: at.x, y: at.y, rotation: 0.0, scale_x: 1.0, scale_y: 1.0, price, kind, natural: None }
    }

    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// On-canvas size, if the natural size is known.
    #[must_use]
    pub fn scaled_size(&self) -> Option<Size> {
        self.natural
            .map(|n| Size::new(n.width * self.scale_x.abs(), n.height * self.scale_y.abs()))
    }
}

/// Sparse update for a canvas object. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ObjectPatch {
    /// A patch that moves an object's center.
    #[must_use]
    pub fn position(pt: Point) -> Self {
        Self { x: Some(pt.x), y: Some(pt.y), ..Default::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ordered store of placed objects. Order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: Vec<CanvasObject>,
}

impl ObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Insert an object, or replace the existing object with the same id in
    /// place. Singleton payloads are forced onto their fixed id and decals
    /// can never claim one. Returns the id the object was stored under.
    pub fn insert(&mut self, mut obj: CanvasObject) -> ObjectId {
        obj.id = match (obj.kind.singleton_id(), obj.id) {
            (Some(fixed), _) => fixed,
            (None, ObjectId::Embroidery | ObjectId::Vinyl) => ObjectId::new_item(),
            (None, id) => id,
        };
        let id = obj.id;
        match self.position(&id) {
            Some(idx) => self.objects[idx] = obj,
            None => self.objects.push(obj),
        }
        id
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<CanvasObject> {
        let idx = self.position(id)?;
        Some(self.objects.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub(crate) fn get_mut(&mut self, id: &ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    /// Apply a partial update. Returns false if the object doesn't exist.
    pub fn apply_patch(&mut self, id: &ObjectId, patch: &ObjectPatch) -> bool {
        let Some(obj) = self.get_mut(id) else {
            return false;
        };
        if let Some(x) = patch.x {
            obj.x = x;
        }
        if let Some(y) = patch.y {
            obj.y = y;
        }
        if let Some(r) = patch.rotation {
            obj.rotation = r;
        }
        if let Some(sx) = patch.scale_x {
            obj.scale_x = sx;
        }
        if let Some(sy) = patch.scale_y {
            obj.scale_y = sy;
        }
        if let Some(p) = patch.price {
            obj.price = Some(p);
        }
        true
    }

    /// Replace all objects with a full snapshot, re-running the id rules.
    pub fn replace_all(&mut self, objects: Vec<CanvasObject>) {
        self.objects.clear();
        for obj in objects {
            self.insert(obj);
        }
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// Number of objects of the given type.
    #[must_use]
    pub fn count_of(&self, ty: ObjectType) -> usize {
        self.objects.iter().filter(|o| o.object_type() == ty).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
