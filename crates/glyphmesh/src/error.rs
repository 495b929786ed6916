// this_file: crates/glyphmesh/src/error.rs

//! Error types for glyphmesh
//!
//! Fatal conditions abort the whole font load and surface as [`FontError`].
//! Conditions that only degrade the result are collected as [`Warning`]s on
//! the loaded font.

use thiserror::Error;

use crate::tables::Tag;

pub type Result<T> = std::result::Result<T, FontError>;

/// Main error type for font loading
#[derive(Debug, Error)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Read of {len} bytes at offset {offset} exceeds buffer of {size} bytes")]
    OutOfRange { offset: usize, len: usize, size: usize },

    #[error("Required table '{0}' is missing")]
    MissingTable(Tag),

    #[error("Unsupported character map: {0}")]
    UnsupportedCmap(String),

    #[error("Malformed outline for glyph {glyph}: {reason}")]
    MalformedOutline { glyph: u16, reason: String },
}

impl FontError {
    pub(crate) fn malformed(glyph: u16, reason: impl Into<String>) -> Self {
        FontError::MalformedOutline {
            glyph,
            reason: reason.into(),
        }
    }
}

/// Non-fatal conditions met while loading a font
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("Triangulation of glyph {glyph} stalled with {remaining} vertices left")]
    TriangulationStalled { glyph: u16, remaining: usize },

    #[error("Kerning lookup {lookup} has unsupported type {kind}")]
    UnknownLookupType { lookup: u16, kind: u16 },

    #[error("Kerning lookup {lookup} skipped for flag {flag:#06x}")]
    FlaggedLookupSkipped { lookup: u16, flag: u16 },

    #[error("Kerning lookup {lookup} has unsupported PairPos format {format}")]
    UnsupportedPairPosFormat { lookup: u16, format: u16 },

    #[error("cmap maps U+{start:04X}..U+{end:04X} past the glyph count {glyph_count}")]
    CmapGlyphsOutOfRange { start: u32, end: u32, glyph_count: u16 },
}
