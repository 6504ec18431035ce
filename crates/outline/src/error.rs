use std::result;

use read_fonts::ReadError;

/// Error types for stemfit-outline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("no glyf table (CFF outlines not supported)")]
    NoGlyfTable,

    #[error("glyph not found: {0}")]
    GlyphNotFound(String),
}

pub type Result<T> = result::Result<T, Error>;
