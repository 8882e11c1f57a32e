//! Shared numeric constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width before the host reports its real size.
pub const DEFAULT_CANVAS_WIDTH: f64 = 600.0;

/// Default canvas height before the host reports its real size.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Device pixels per canvas pixel in exported snapshots.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

// ── Zones ───────────────────────────────────────────────────────

/// Zone width as a fraction of the reference rectangle width.
pub const ZONE_WIDTH_FRAC: f64 = 0.8;

/// Nominal zone strip height.
pub const ZONE_HEIGHT: f64 = 80.0;

/// Upper bound on zone height as a fraction of the reference height, so the
/// bands never overlap on short reference rectangles.
pub const ZONE_HEIGHT_MAX_FRAC: f64 = 0.14;

// ── Alignment ───────────────────────────────────────────────────

/// Inset of left/right anchors from the zone edge.
pub const ANCHOR_MARGIN: f64 = 50.0;

/// Vertical anchor fractions of zone height for top / middle / bottom.
pub const ANCHOR_TOP_FRAC: f64 = 0.25;
pub const ANCHOR_MIDDLE_FRAC: f64 = 0.5;
pub const ANCHOR_BOTTOM_FRAC: f64 = 0.75;

/// Width of one distribution slot.
pub const SLOT_WIDTH: f64 = 50.0;

/// Gap between adjacent slots.
pub const SLOT_PADDING: f64 = 10.0;

/// Movement below this is treated as "unchanged" by the distributor.
pub const ALIGN_EPSILON: f64 = 1.0;

// ── Sizing ──────────────────────────────────────────────────────

/// Letters and patches are scaled to fit this box when their image first loads.
pub const INITIAL_FIT_PX: f64 = 50.0;

/// Largest box a letter or patch may be transformed to.
pub const MAX_DECAL_BOX: f64 = 100.0;

/// Smallest box any object may be transformed to.
pub const MIN_BOX: f64 = 5.0;

/// Footprint used for hit-testing before an image reports its size.
pub const FALLBACK_FOOTPRINT: f64 = 50.0;

/// Embroidery font size in canvas units.
pub const EMBROIDERY_FONT_SIZE: f64 = 30.0;

// ── Validation ──────────────────────────────────────────────────

/// Two letters/patches closer than this in y share a line.
pub const LINE_THRESHOLD: f64 = 30.0;

pub const DEFAULT_MAX_CHARACTERS: usize = 30;
pub const DEFAULT_MAX_LINES: usize = 1;
pub const DEFAULT_MAX_ITEMS_PER_LINE: usize = 4;

// ── Pricing ─────────────────────────────────────────────────────

/// Embroidery price when no add-on variant price is known.
pub const DEFAULT_EMBROIDERY_PRICE: f64 = 80.0;

/// Vinyl price when no add-on variant price is known.
pub const DEFAULT_VINYL_PRICE: f64 = 60.0;

pub const DEFAULT_CURRENCY: &str = "AED";

// ── Embroidery defaults ─────────────────────────────────────────

pub const DEFAULT_EMBROIDERY_FONT: &str = "Lucida";
pub const DEFAULT_EMBROIDERY_COLOR: &str = "Black";
