//! Hint dependency graph and ordering engine for TrueType hinting.
//!
//! A hint ties one or more glyph outline points to an instruction:
//! anchor, align, shift, interpolate, a stem distance, or a macro or
//! function call. A hint whose placement depends on other points may
//! only compile after the hints that position ("touch") those points.
//!
//! This crate models the hints of one glyph along one axis as an
//! arena-backed forest and keeps three things consistent through
//! structural edits:
//!
//! - **Nesting**: a hint whose reference resolves to another hint's
//!   target is that hint's child. [`Document::rebuild`] reconstructs
//!   the nesting from a flat list by fixpoint placement; hints whose
//!   references match nothing stay at the top level rather than being
//!   dropped.
//! - **Order**: siblings are sorted so that no hint refers forward to
//!   a target defined later, with ties keeping source order.
//! - **Touch state**: per point, the set of hints targeting it, which
//!   is what ordering and set-building decisions are made from.
//!
//! The crate consumes a parsed, schema-validated document
//! ([`RawHint`]) and a glyph's point list ([`PointIndex`]), and
//! produces an ordered structure ([`Document::compile_order`],
//! [`Document::export`]) for the bytecode compiler and the view layer.
//! Rasterization, instruction encoding, and file formats live with
//! collaborators.

mod builder;
mod cvt;
mod document;
mod error;
mod hint;
mod identifier;
mod order;
mod point;
mod resolver;
mod schema;
mod touch;
mod types;

pub use cvt::{ControlValue, ControlValueKind, ControlValues};
pub use document::{Document, DocumentEvent};
pub use error::{Error, Result};
pub use hint::{HintKind, HintRecord, RawHint, StemColor};
pub use identifier::{Identifier, parse_coord};
pub use order::Precedence;
pub use point::{LabelPref, Point};
pub use resolver::{PointIndex, Resolved};
pub use schema::{BasicSchema, ValidationError, Validator};
pub use touch::TouchTracker;
pub use types::{Axis, HintId, PointId};

/// Re-nest and re-order a flat hint list in one call.
///
/// Convenience wrapper for the common batch case: load, rebuild, and
/// export, returning the document in compile order with implicit
/// references stripped.
///
/// # Example
///
/// ```
/// use stemfit_hint_model::{Axis, HintKind, PointIndex, RawHint, reorder};
///
/// let index = PointIndex::from_coords([(0, 0, true, 0), (0, 700, true, 0)]);
/// let nodes = vec![
///     RawHint::new(HintKind::Align, 1u16).with_reference(0u16),
///     RawHint::new(HintKind::Anchor, 0u16),
/// ];
/// let ordered = reorder(index, Axis::Y, nodes);
/// assert_eq!(ordered[0].kind, HintKind::Anchor);
/// ```
pub fn reorder(index: PointIndex, axis: Axis, nodes: Vec<RawHint>) -> Vec<RawHint> {
    let mut doc = Document::load(axis, index, nodes);
    doc.rebuild();
    doc.export()
}
