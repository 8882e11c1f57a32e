//! Rendering: draws the customizer scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine core plus the decoded image
//! cache and produces pixels; it does not mutate any application state.
//!
//! Images that have not decoded (or failed to) are skipped. The object stays
//! in the store and is drawn once the host registers its image.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::EMBROIDERY_FONT_SIZE;
use crate::doc::{CanvasObject, EmbroideryStyle, ObjectKind};
use crate::engine::EngineCore;
use crate::geom::{Rect, Size, contain_rect};
use crate::hit;
use crate::zone::Zone;

const BACKGROUND: &str = "#FFFFFF";
const ZONE_STROKE: &str = "#EF4444";
const ZONE_LABEL_FONT: &str = "12px sans-serif";
const SELECTION_STROKE: &str = "#1E90FF";

/// Dash segment length for zone outlines and the selection box.
const DASH: f64 = 4.0;

/// Gap between an object's footprint and its selection box.
const SELECTION_PAD: f64 = 4.0;

/// Draw the full scene: base image, design aids, objects, then selection UI.
/// `pixel_ratio` scales canvas units to the backing store.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    images: &HashMap<String, HtmlImageElement>,
    pixel_ratio: f64,
) -> Result<(), JsValue> {
    let size = core.canvas_size();

    // Layer 1: clear.
    ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, size.width, size.height);

    // Layer 2: base product image.
    if let Some(src) = core.product().and_then(|p| p.image.as_deref()) {
        if let Some(img) = ready(images, src) {
            let rect = core.image_rect().or_else(|| {
                let natural = Size::new(f64::from(img.natural_width()), f64::from(img.natural_height()));
                contain_rect(natural, size, 1.0)
            });
            if let Some(r) = rect {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, r.x, r.y, r.width, r.height)?;
            }
        }
    }

    // Layer 3: design aids.
    if core.ui().show_design_aids {
        for zone in &core.zones() {
            draw_zone(ctx, zone)?;
        }
    }

    // Layer 4: objects in insertion order.
    for obj in core.objects() {
        draw_object(ctx, obj, images)?;
    }

    // Layer 5: selection UI.
    if let Some(obj) = core.selection().and_then(|id| core.object(&id)) {
        draw_selection(ctx, obj)?;
    }

    Ok(())
}

/// The cached image for `src`, if it decoded successfully.
fn ready<'a>(images: &'a HashMap<String, HtmlImageElement>, src: &str) -> Option<&'a HtmlImageElement> {
    images.get(src).filter(|img| img.complete() && img.natural_width() > 0)
}

// =============================================================
// Design aids
// =============================================================

fn draw_zone(ctx: &CanvasRenderingContext2d, zone: &Zone) -> Result<(), JsValue> {
    let Rect { x, y, width, height } = zone.rect;
    ctx.save();
    ctx.set_stroke_style_str(ZONE_STROKE);
    ctx.set_line_width(1.0);
    set_dash(ctx, DASH)?;
    ctx.stroke_rect(x, y, width, height);

    ctx.set_fill_style_str(ZONE_STROKE);
    ctx.set_font(ZONE_LABEL_FONT);
    ctx.set_text_align("left");
    ctx.set_text_baseline("bottom");
    ctx.fill_text(&zone.label, x, y - 2.0)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Objects
// =============================================================

fn draw_object(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(obj.x, obj.y)?;
    ctx.rotate(obj.rotation.to_radians())?;
    let result = match &obj.kind {
        ObjectKind::Letter(_) | ObjectKind::Patch(_) | ObjectKind::Vinyl(_) => draw_image_object(ctx, obj, images),
        ObjectKind::Embroidery(style) => draw_embroidery(ctx, obj, style),
    };
    ctx.restore();
    result
}

fn draw_image_object(
    ctx: &CanvasRenderingContext2d,
    obj: &CanvasObject,
    images: &HashMap<String, HtmlImageElement>,
) -> Result<(), JsValue> {
    let Some(img) = obj.kind.image_src().and_then(|src| ready(images, src)) else {
        return Ok(());
    };
    let natural = Size::new(f64::from(img.natural_width()), f64::from(img.natural_height()));
    let w = natural.width * obj.scale_x;
    let h = natural.height * obj.scale_y;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h)
}

fn draw_embroidery(ctx: &CanvasRenderingContext2d, obj: &CanvasObject, style: &EmbroideryStyle) -> Result<(), JsValue> {
    if style.text.is_empty() {
        return Ok(());
    }
    ctx.scale(obj.scale_x, obj.scale_y)?;
    ctx.set_font(&format!("{EMBROIDERY_FONT_SIZE}px {}", style.font_family));
    ctx.set_fill_style_str(&style.color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&style.text, 0.0, 0.0)
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, obj: &CanvasObject) -> Result<(), JsValue> {
    let size = hit::footprint(obj);
    let w = size.width + SELECTION_PAD * 2.0;
    let h = size.height + SELECTION_PAD * 2.0;

    ctx.save();
    ctx.translate(obj.x, obj.y)?;
    ctx.rotate(obj.rotation.to_radians())?;
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0);
    set_dash(ctx, DASH)?;
    ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
    ctx.restore();
    Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)
}
