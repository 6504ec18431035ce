//! Glyph outline point extraction for hint editing.
//!
//! Hints address glyph points by outline index; this crate reads those
//! points from a font binary so documents can be resolved and
//! displayed. Only TrueType (`glyf`) outlines are supported.

mod error;
mod outline;

pub use error::{Error, Result};
pub use outline::{GlyphOutline, OutlinePoint, glyph_outline};
