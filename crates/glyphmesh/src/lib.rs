// this_file: crates/glyphmesh/src/lib.rs

//! glyphmesh: TrueType glyphs as GPU-ready triangles
//!
//! A font file goes in, one triangle mesh per glyph comes out. Straight
//! edges become solid triangles, quadratic curves become curve triangles a
//! fragment shader fills with the `u² - v` coverage test.
//!
//! ## The Load
//!
//! 1. **Tables** - `head`, `maxp`, `hhea`, `hmtx`, `loca`, `cmap`, `glyf`
//!    and optionally `GPOS` are decoded from big-endian bytes
//! 2. **Outlines** - simple glyphs decode directly, compound glyphs are
//!    flattened with their component transforms
//! 3. **Contours** - implied on-curve points are filled in and each contour
//!    is split into a polygon and curve wedges
//! 4. **Holes** - ray casting sorts contours into outer shapes and holes,
//!    and each hole is bridged into its outer shape
//! 5. **Triangles** - ear clipping fills the bridged polygons
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyphmesh::{Color, Font};
//!
//! let font = Font::open("DejaVuSans.ttf")?;
//! let mesh = font.text_mesh("Hello", Color::black());
//! let scale = font.scale_for_size(32.0);
//! println!("{} triangles, {} px wide", mesh.triangle_count(), mesh.advance * scale);
//! # Ok::<(), glyphmesh::FontError>(())
//! ```

pub mod error;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod mesh;
pub mod options;
pub mod reader;
pub mod tables;

pub use error::{FontError, Result, Warning};
pub use font::Font;
pub use glyph::{Color, Glyph, GlyphVertex};
pub use layout::{GlyphSource, TextMesh};
pub use options::LoadOptions;
pub use tables::Tag;
