//! Product customization engine for the storefront.
//!
//! This crate is compiled to WebAssembly and runs in the browser; it also
//! builds natively so the headless runner and the tests can drive it. It owns
//! the whole customization session: deriving placement zones from the
//! product, constraining drags and drops to them, auto-aligning letters and
//! patches, validating and pricing the design, and assembling the cart
//! bundle. The host JavaScript layer only wires DOM events to
//! [`engine::Command`]s and reacts to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session container [`engine::EngineCore`], command dispatch, browser [`engine::Engine`] |
//! | [`doc`] | Canvas objects and the ordered object store |
//! | [`product`] | Base product, add-ons, and catalog drag payloads |
//! | [`zone`] | Placement zones derived from the product |
//! | [`placement`] | Clamp/snap of pointer positions into the nearest zone |
//! | [`align`] | Auto-align distributor for letters and patches |
//! | [`rules`] | Validation and pricing |
//! | [`cart`] | Cart bundle assembly |
//! | [`input`] | Session mode, alignment mode, UI state, gesture state machine |
//! | [`hit`] | Object footprints and hit-testing |
//! | [`geom`] | Points, sizes, rectangles, contain-fit |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (zone geometry, size limits, prices) |

pub mod align;
pub mod cart;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod placement;
pub mod product;
pub mod render;
pub mod rules;
pub mod zone;
