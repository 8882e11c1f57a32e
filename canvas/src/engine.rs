//! Engine: the customizer session container and its browser wrapper.
//!
//! `EngineCore` owns every piece of mutable session state: the base product,
//! the object store, UI toggles, the in-flight gesture, and the embroidery and
//! vinyl feature state. All mutations flow through [`EngineCore::dispatch`],
//! which applies one [`Command`] and then lets the auto-align distributor
//! settle the layout. Handlers return [`Action`]s describing what changed so
//! the host can re-render or navigate.
//!
//! `Engine` wraps the core with the browser canvas element and the decoded
//! image cache, and owns rendering and PNG export.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use commerce::{LinesAdd, Variant};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::align;
use crate::cart::{self, BundleSource, CartError};
use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, EXPORT_PIXEL_RATIO, INITIAL_FIT_PX, MAX_DECAL_BOX, MIN_BOX,
};
use crate::doc::{
    CanvasObject, EmbroideryPatch, EmbroideryStyle, ObjectId, ObjectKind, ObjectPatch, ObjectStore, VinylArt,
};
use crate::geom::{Point, Rect, Size, contain_rect};
use crate::hit;
use crate::input::{AlignmentMode, InputState, Mode, UiState};
use crate::placement;
use crate::product::{AddOns, BaseProduct, DropPayload};
use crate::render;
use crate::rules::{self, Quote, Validation};
use crate::zone::{self, Zone};

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ObjectCreated { id: ObjectId },
    ObjectUpdated { id: ObjectId },
    ObjectDeleted { id: ObjectId },
    /// The distributor moved letters and patches.
    ObjectsRealigned,
    /// Objects and feature state were reset.
    Cleared,
    SelectionChanged { id: Option<ObjectId> },
    ModeChanged { mode: Mode },
    /// `back` was requested from the initial mode; the host leaves the customizer.
    NavigateBack,
    RenderNeeded,
}

/// One atomic session operation.
///
/// Scripts and hosts drive the engine exclusively through this type; see
/// [`EngineCore::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetCanvasSize { width: f64, height: f64 },
    SetBaseProduct { product: BaseProduct },
    SelectVariant { variant: Variant },
    BaseImageLoaded { width: f64, height: f64 },
    SetAddons { addons: AddOns },
    SetMode { mode: Mode },
    Back,
    AddObject { object: CanvasObject },
    ReplaceObjects { objects: Vec<CanvasObject> },
    UpdateObject { id: ObjectId, patch: ObjectPatch },
    RemoveObject { id: ObjectId },
    RemoveSelected,
    Select { id: Option<ObjectId> },
    /// A catalog tile dropped at `(x, y)`. `payload` is the drag data, either
    /// as a JSON string or inline.
    Drop { payload: serde_json::Value, x: f64, y: f64 },
    ImageLoaded { id: ObjectId, width: f64, height: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    BeginTransform { id: ObjectId },
    Transform { id: ObjectId, patch: ObjectPatch },
    EnableEmbroidery,
    UpdateEmbroidery { patch: EmbroideryPatch },
    SetVinylImage { image: String, filename: Option<String> },
    ClearVinyl,
    Clear,
    ToggleDesignAids { on: bool },
    ToggleAutoAlign { on: bool },
    SetAlignmentMode { mode: AlignmentMode },
}

/// Filename for an exported design snapshot.
#[must_use]
pub fn design_filename(millis: u64) -> String {
    format!("custom-design-{millis}.png")
}

/// Session state and logic that do not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    product: Option<BaseProduct>,
    doc: ObjectStore,
    ui: UiState,
    input: InputState,
    embroidery_enabled: bool,
    embroidery: EmbroideryStyle,
    /// Vinyl artwork while an image is set.
    vinyl: Option<VinylArt>,
    addons: AddOns,
    canvas_width: f64,
    canvas_height: f64,
    /// Decoded size of the base product image.
    base_image_natural: Option<Size>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            product: None,
            doc: ObjectStore::new(),
            ui: UiState::default(),
            input: InputState::default(),
            embroidery_enabled: false,
            embroidery: EmbroideryStyle::default(),
            vinyl: None,
            addons: AddOns::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            base_image_natural: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command, then let the distributor settle the layout.
    pub fn dispatch(&mut self, cmd: Command) -> Vec<Action> {
        let mut actions = self.apply(cmd);
        if let Some(action) = self.settle() {
            actions.push(action);
        }
        if !actions.is_empty() && !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn apply(&mut self, cmd: Command) -> Vec<Action> {
        match cmd {
            Command::SetCanvasSize { width, height } => self.set_canvas_size(width, height),
            Command::SetBaseProduct { product } => self.set_base_product(product),
            Command::SelectVariant { variant } => self.select_variant(&variant),
            Command::BaseImageLoaded { width, height } => self.base_image_loaded(width, height),
            Command::SetAddons { addons } => self.set_addons(addons),
            Command::SetMode { mode } => self.set_mode(mode),
            Command::Back => self.back(),
            Command::AddObject { object } => self.add_object(object),
            Command::ReplaceObjects { objects } => self.replace_objects(objects),
            Command::UpdateObject { id, patch } => self.update_object(&id, &patch),
            Command::RemoveObject { id } => self.remove_object(&id),
            Command::RemoveSelected => self.remove_selected(),
            Command::Select { id } => self.select(id),
            Command::Drop { payload, x, y } => {
                let raw = match payload {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                self.drop_payload(&raw, Point::new(x, y))
            }
            Command::ImageLoaded { id, width, height } => self.image_loaded(&id, width, height),
            Command::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            Command::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            Command::PointerUp { x, y } => self.pointer_up(Point::new(x, y)),
            Command::BeginTransform { id } => self.begin_transform(&id),
            Command::Transform { id, patch } => self.transform(&id, &patch),
            Command::EnableEmbroidery => self.enable_embroidery(),
            Command::UpdateEmbroidery { patch } => self.update_embroidery(&patch),
            Command::SetVinylImage { image, filename } => self.set_vinyl_image(image, filename),
            Command::ClearVinyl => self.clear_vinyl(),
            Command::Clear => self.clear(),
            Command::ToggleDesignAids { on } => self.toggle_design_aids(on),
            Command::ToggleAutoAlign { on } => self.toggle_auto_align(on),
            Command::SetAlignmentMode { mode } => self.set_alignment_mode(mode),
        }
    }

    /// Redistribute letters and patches when auto-align is on and no gesture
    /// is in flight.
    fn settle(&mut self) -> Option<Action> {
        if !self.ui.auto_align || self.input != InputState::Idle {
            return None;
        }
        let zones = self.zones();
        let next = align::distribute(self.doc.objects(), &zones, self.ui.alignment_mode)?;
        self.doc.replace_all(next);
        Some(Action::ObjectsRealigned)
    }

    // --- Product and canvas ---

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Vec<Action> {
        if Size::new(width, height).is_degenerate() {
            tracing::debug!(width, height, "ignoring degenerate canvas size");
            return Vec::new();
        }
        self.canvas_width = width;
        self.canvas_height = height;
        vec![Action::RenderNeeded]
    }

    /// Replace the base product. Objects persist; the image rectangle is reset
    /// to whatever the catalog reports until the new image decodes.
    pub fn set_base_product(&mut self, product: BaseProduct) -> Vec<Action> {
        tracing::info!(id = %product.id, title = %product.title, "base product set");
        self.base_image_natural = product.image_size;
        self.product = Some(product);
        let mut actions = Vec::new();
        if !self.available_modes().contains(&self.ui.mode) {
            actions.extend(self.set_mode(Mode::Color));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Switch the product to another variant (color).
    pub fn select_variant(&mut self, variant: &Variant) -> Vec<Action> {
        let Some(current) = &self.product else {
            tracing::debug!(variant = %variant.id, "variant selected without a base product");
            return Vec::new();
        };
        let next = current.with_variant(variant);
        self.set_base_product(next)
    }

    /// The base image finished decoding at its natural size.
    pub fn base_image_loaded(&mut self, width: f64, height: f64) -> Vec<Action> {
        let size = Size::new(width, height);
        if size.is_degenerate() {
            return Vec::new();
        }
        self.base_image_natural = Some(size);
        vec![Action::RenderNeeded]
    }

    /// Set the embroidery and vinyl add-on SKUs. An existing embroidery
    /// object is re-stamped with the new price.
    pub fn set_addons(&mut self, addons: AddOns) -> Vec<Action> {
        self.addons = addons;
        let price = rules::embroidery_price(&self.addons);
        match self.doc.get_mut(&ObjectId::Embroidery) {
            Some(obj) => {
                obj.price = Some(price);
                vec![Action::ObjectUpdated { id: ObjectId::Embroidery }]
            }
            None => Vec::new(),
        }
    }

    // --- Mode ---

    /// Change the active panel. Clears the selection; objects are kept.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        if !self.available_modes().contains(&mode) {
            tracing::debug!(?mode, "mode not offered for this product");
            return Vec::new();
        }
        let mut actions = self.select(None);
        if self.ui.mode != mode {
            self.ui.mode = mode;
            actions.push(Action::ModeChanged { mode });
        }
        actions
    }

    /// Leave the current panel, or the customizer when already at the start.
    pub fn back(&mut self) -> Vec<Action> {
        if self.ui.mode == Mode::Color {
            vec![Action::NavigateBack]
        } else {
            self.set_mode(Mode::Color)
        }
    }

    // --- Objects ---

    /// Append an object and select it.
    pub fn add_object(&mut self, mut object: CanvasObject) -> Vec<Action> {
        if matches!(object.kind, ObjectKind::Embroidery(_)) && object.price.is_none() {
            object.price = Some(rules::embroidery_price(&self.addons));
        }
        let id = self.doc.insert(object);
        self.sync_singletons();
        let mut actions = vec![Action::ObjectCreated { id }];
        actions.extend(self.select(Some(id)));
        actions
    }

    /// Replace the whole object list.
    pub fn replace_objects(&mut self, objects: Vec<CanvasObject>) -> Vec<Action> {
        self.doc.replace_all(objects);
        self.sync_singletons();
        let mut actions = self.drop_stale_selection();
        actions.push(Action::ObjectsRealigned);
        actions
    }

    /// Shallow-merge `patch` into an object.
    pub fn update_object(&mut self, id: &ObjectId, patch: &ObjectPatch) -> Vec<Action> {
        if patch.is_empty() || !self.doc.apply_patch(id, patch) {
            return Vec::new();
        }
        vec![Action::ObjectUpdated { id: *id }]
    }

    /// Remove an object, clearing the selection if it was selected.
    pub fn remove_object(&mut self, id: &ObjectId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        self.sync_singletons();
        if self.input.active_id() == Some(*id) {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::ObjectDeleted { id: *id }];
        actions.extend(self.drop_stale_selection());
        actions
    }

    pub fn remove_selected(&mut self) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) => self.remove_object(&id),
            None => Vec::new(),
        }
    }

    /// Select an object, or deselect with `None`. Unknown ids deselect.
    pub fn select(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        let id = id.filter(|id| self.doc.contains(id));
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged { id }]
    }

    fn drop_stale_selection(&mut self) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) if !self.doc.contains(&id) => self.select(None),
            _ => Vec::new(),
        }
    }

    /// Re-derive the embroidery and vinyl feature state from the store.
    fn sync_singletons(&mut self) {
        match self.doc.get(&ObjectId::Embroidery).map(|o| &o.kind) {
            Some(ObjectKind::Embroidery(style)) => {
                self.embroidery = style.clone();
                self.embroidery_enabled = true;
            }
            _ => self.embroidery_enabled = false,
        }
        self.vinyl = match self.doc.get(&ObjectId::Vinyl).map(|o| &o.kind) {
            Some(ObjectKind::Vinyl(art)) => Some(art.clone()),
            _ => None,
        };
    }

    /// Place a catalog tile dropped at `at`. Malformed payloads are ignored.
    pub fn drop_payload(&mut self, raw: &str, at: Point) -> Vec<Action> {
        let payload = match DropPayload::parse(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring drop");
                return Vec::new();
            }
        };
        let zones = self.zones();
        let pos = placement::constrain(at, &zones, self.ui.auto_align, self.ui.alignment_mode).unwrap_or(at);
        let kind = ObjectKind::decal(payload.kind, payload.to_decal());
        self.add_object(CanvasObject::new(kind, pos, Some(payload.price)))
    }

    /// An object's image decoded. Letters and patches still at unit scale are
    /// fit into the initial box.
    pub fn image_loaded(&mut self, id: &ObjectId, width: f64, height: f64) -> Vec<Action> {
        let size = Size::new(width, height);
        if size.is_degenerate() {
            return Vec::new();
        }
        let Some(obj) = self.doc.get_mut(id) else {
            return Vec::new();
        };
        obj.natural = Some(size);
        let unit = (obj.scale_x - 1.0).abs() < f64::EPSILON && (obj.scale_y - 1.0).abs() < f64::EPSILON;
        if obj.object_type().is_decal() && unit {
            let scale = INITIAL_FIT_PX / width.max(height);
            obj.scale_x = scale;
            obj.scale_y = scale;
        }
        vec![Action::ObjectUpdated { id: *id }]
    }

    // --- Gestures ---

    /// Start dragging the topmost object under `pt`, or deselect on empty canvas.
    pub fn pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let Some(obj) = hit::hit_test(pt, &self.doc).and_then(|id| self.doc.get(&id)) else {
            self.input = InputState::Idle;
            return self.select(None);
        };
        let id = obj.id;
        let origin = obj.center();
        self.input = InputState::DraggingObject { id, grab_offset: Point::new(pt.x - origin.x, pt.y - origin.y), origin };
        self.select(Some(id))
    }

    pub fn pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let InputState::DraggingObject { id, grab_offset, .. } = self.input else {
            return Vec::new();
        };
        self.drag_to(&id, Point::new(pt.x - grab_offset.x, pt.y - grab_offset.y));
        vec![Action::RenderNeeded]
    }

    /// Finish the drag. Reports an update only if the object moved.
    pub fn pointer_up(&mut self, pt: Point) -> Vec<Action> {
        let InputState::DraggingObject { id, grab_offset, origin } = self.input else {
            return Vec::new();
        };
        self.drag_to(&id, Point::new(pt.x - grab_offset.x, pt.y - grab_offset.y));
        self.input = InputState::Idle;
        match self.doc.get(&id) {
            Some(obj) if obj.center() != origin => vec![Action::ObjectUpdated { id }],
            _ => Vec::new(),
        }
    }

    /// Move the dragged object toward `target`. The first real movement
    /// hands layout back to the user.
    fn drag_to(&mut self, id: &ObjectId, target: Point) {
        if self.doc.get(id).is_some_and(|o| o.center() != target) {
            self.ui.auto_align = false;
        }
        let zones = self.zones();
        let pos = placement::constrain(target, &zones, self.ui.auto_align, self.ui.alignment_mode).unwrap_or(target);
        self.doc.apply_patch(id, &ObjectPatch::position(pos));
    }

    /// The transformer grabbed an object.
    pub fn begin_transform(&mut self, id: &ObjectId) -> Vec<Action> {
        if !self.doc.contains(id) {
            return Vec::new();
        }
        self.input = InputState::TransformingObject { id: *id };
        self.ui.auto_align = false;
        self.select(Some(*id))
    }

    /// Commit a resize/rotate. Boxes beyond the size limits are refused and
    /// the object keeps its previous transform.
    pub fn transform(&mut self, id: &ObjectId, patch: &ObjectPatch) -> Vec<Action> {
        if self.input.active_id() == Some(*id) {
            self.input = InputState::Idle;
        }
        let Some(current) = self.doc.get(id) else {
            return Vec::new();
        };
        self.ui.auto_align = false;
        let mut candidate = current.clone();
        if let Some(v) = patch.x {
            candidate.x = v;
        }
        if let Some(v) = patch.y {
            candidate.y = v;
        }
        if let Some(v) = patch.scale_x {
            candidate.scale_x = v;
        }
        if let Some(v) = patch.scale_y {
            candidate.scale_y = v;
        }
        let size = hit::footprint(&candidate);
        let too_small = size.width < MIN_BOX || size.height < MIN_BOX;
        let too_large =
            candidate.object_type().is_decal() && (size.width > MAX_DECAL_BOX || size.height > MAX_DECAL_BOX);
        if too_small || too_large {
            tracing::debug!(%id, width = size.width, height = size.height, "transform rejected");
            return vec![Action::RenderNeeded];
        }
        self.update_object(id, patch)
    }

    // --- Embroidery ---

    /// Turn embroidery on, placing its object at the canvas center. Idempotent.
    pub fn enable_embroidery(&mut self) -> Vec<Action> {
        if self.embroidery_enabled {
            return Vec::new();
        }
        let center = Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
        let object = CanvasObject::new(ObjectKind::Embroidery(self.embroidery.clone()), center, None);
        self.add_object(object)
    }

    /// Update the embroidery settings, mirrored into the embroidery object.
    pub fn update_embroidery(&mut self, patch: &EmbroideryPatch) -> Vec<Action> {
        self.embroidery.apply(patch);
        match self.doc.get_mut(&ObjectId::Embroidery) {
            Some(obj) => {
                obj.kind = ObjectKind::Embroidery(self.embroidery.clone());
                vec![Action::ObjectUpdated { id: ObjectId::Embroidery }]
            }
            None => Vec::new(),
        }
    }

    // --- Vinyl ---

    /// Set the vinyl artwork, creating the vinyl object or updating it in place.
    /// An empty image clears vinyl.
    pub fn set_vinyl_image(&mut self, image: String, filename: Option<String>) -> Vec<Action> {
        if image.trim().is_empty() {
            return self.clear_vinyl();
        }
        let art = VinylArt { image, filename };
        let mut actions = match self.doc.get_mut(&ObjectId::Vinyl) {
            Some(obj) => {
                obj.kind = ObjectKind::Vinyl(art.clone());
                obj.natural = None;
                vec![Action::ObjectUpdated { id: ObjectId::Vinyl }]
            }
            None => {
                let center = Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
                self.doc.insert(CanvasObject::new(ObjectKind::Vinyl(art.clone()), center, None));
                vec![Action::ObjectCreated { id: ObjectId::Vinyl }]
            }
        };
        self.vinyl = Some(art);
        actions.extend(self.select(Some(ObjectId::Vinyl)));
        actions
    }

    pub fn clear_vinyl(&mut self) -> Vec<Action> {
        let actions = self.remove_object(&ObjectId::Vinyl);
        self.vinyl = None;
        actions
    }

    // --- Session ---

    /// Reset objects, selection, feature state, and toggles. The product and
    /// mode are kept.
    pub fn clear(&mut self) -> Vec<Action> {
        self.doc.clear();
        self.ui.reset_toggles();
        self.input = InputState::Idle;
        self.embroidery_enabled = false;
        self.embroidery = EmbroideryStyle::default();
        self.vinyl = None;
        vec![Action::Cleared]
    }

    pub fn toggle_design_aids(&mut self, on: bool) -> Vec<Action> {
        self.ui.show_design_aids = on;
        vec![Action::RenderNeeded]
    }

    pub fn toggle_auto_align(&mut self, on: bool) -> Vec<Action> {
        self.ui.auto_align = on;
        vec![Action::RenderNeeded]
    }

    pub fn set_alignment_mode(&mut self, mode: AlignmentMode) -> Vec<Action> {
        self.ui.alignment_mode = mode;
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn product(&self) -> Option<&BaseProduct> {
        self.product.as_ref()
    }

    #[must_use]
    pub fn doc(&self) -> &ObjectStore {
        &self.doc
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn embroidery_enabled(&self) -> bool {
        self.embroidery_enabled
    }

    /// Current embroidery settings, kept while embroidery is off.
    #[must_use]
    pub fn embroidery(&self) -> &EmbroideryStyle {
        &self.embroidery
    }

    #[must_use]
    pub fn vinyl(&self) -> Option<&VinylArt> {
        self.vinyl.as_ref()
    }

    #[must_use]
    pub fn addons(&self) -> &AddOns {
        &self.addons
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Where the base image is drawn, once its size is known.
    #[must_use]
    pub fn image_rect(&self) -> Option<Rect> {
        let scale = self.product.as_ref().map_or(1.0, |p| p.rules.display_scale);
        contain_rect(self.base_image_natural?, self.canvas_size(), scale)
    }

    /// Placement zones for the current product and canvas.
    #[must_use]
    pub fn zones(&self) -> Vec<Zone> {
        let title = self.product.as_ref().map_or("", |p| p.title.as_str());
        zone::derive_zones(title, self.canvas_size(), self.image_rect())
    }

    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        self.doc.objects()
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.doc.get(id)
    }

    /// The currently selected object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    /// Modes offered for the current product.
    #[must_use]
    pub fn available_modes(&self) -> Vec<Mode> {
        match &self.product {
            Some(p) => rules::available_modes(&p.rules),
            None => Mode::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn quote(&self) -> Quote {
        rules::quote(self.product.as_ref(), self.doc.objects(), &self.addons)
    }

    #[must_use]
    pub fn validation(&self) -> Validation {
        let rules = self.product.as_ref().map(|p| p.rules.clone()).unwrap_or_default();
        rules::validate(&rules, self.enabled_embroidery(), self.doc.objects())
    }

    fn enabled_embroidery(&self) -> Option<&EmbroideryStyle> {
        self.embroidery_enabled.then_some(&self.embroidery)
    }

    /// Assemble the cart request, stamping every line with one reference
    /// derived from `millis`.
    ///
    /// # Errors
    ///
    /// See [`cart::build_lines`].
    pub fn cart_lines(&self, millis: u64) -> Result<LinesAdd, CartError> {
        let source = BundleSource {
            product: self.product.as_ref(),
            objects: self.doc.objects(),
            embroidery: self.enabled_embroidery(),
            vinyl: self.vinyl.as_ref(),
            addons: &self.addons,
        };
        cart::build_lines(&source, &cart::customization_ref(millis))
    }
}

/// A rendered PNG export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub data_url: String,
    pub filename: String,
}

/// Backing-store size of an export at `ratio` device pixels per canvas pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn export_dimensions(size: Size, ratio: f64) -> (u32, u32) {
    ((size.width * ratio).round().max(1.0) as u32, (size.height * ratio).round().max(1.0) as u32)
}

fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    /// Decoded images by source URL.
    images: HashMap<String, HtmlImageElement>,
    core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, sized to it.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let mut core = EngineCore::new();
        core.set_canvas_size(f64::from(canvas.width()), f64::from(canvas.height()));
        Self { canvas, images: HashMap::new(), core }
    }

    pub fn dispatch(&mut self, cmd: Command) -> Vec<Action> {
        self.core.dispatch(cmd)
    }

    /// Read-only view of the session.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Register a decoded image and size every object (and the base product)
    /// that draws it.
    pub fn image_ready(&mut self, src: &str, img: HtmlImageElement) -> Vec<Action> {
        let width = f64::from(img.natural_width());
        let height = f64::from(img.natural_height());
        self.images.insert(src.to_owned(), img);

        let mut actions = Vec::new();
        if self.core.product().and_then(|p| p.image.as_deref()) == Some(src) {
            actions.extend(self.core.dispatch(Command::BaseImageLoaded { width, height }));
        }
        let ids: Vec<ObjectId> = self
            .core
            .objects()
            .iter()
            .filter(|o| o.kind.image_src() == Some(src))
            .map(|o| o.id)
            .collect();
        for id in ids {
            actions.extend(self.core.dispatch(Command::ImageLoaded { id, width, height }));
        }
        actions
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = context(&self.canvas)?;
        render::draw(&ctx, &self.core, &self.images, 1.0)
    }

    /// Export the design as a PNG data URL at [`EXPORT_PIXEL_RATIO`]. The
    /// selection is cleared first so no selection UI is captured; the scene
    /// is drawn to an offscreen canvas and the visible one is redrawn.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the offscreen canvas cannot be created, or if
    /// rendering or encoding fails.
    pub fn snapshot_png(&mut self) -> Result<Snapshot, JsValue> {
        self.core.dispatch(Command::Select { id: None });
        self.render()?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let offscreen = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
        let (width, height) = export_dimensions(self.core.canvas_size(), EXPORT_PIXEL_RATIO);
        offscreen.set_width(width);
        offscreen.set_height(height);
        render::draw(&context(&offscreen)?, &self.core, &self.images, EXPORT_PIXEL_RATIO)?;

        let data_url = offscreen.to_data_url()?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = js_sys::Date::now() as u64;
        Ok(Snapshot { data_url, filename: design_filename(millis) })
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.core.selection()
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.core.object(id)
    }

    #[must_use]
    pub fn zones(&self) -> Vec<Zone> {
        self.core.zones()
    }
}
