// this_file: crates/glyphmesh/src/font.rs

//! Loading a TrueType font into ready-to-draw glyph meshes.
//!
//! Everything happens up front in [`Font::from_bytes_with_options`]: tables
//! are decoded, every outline is tessellated and the results are indexed by
//! glyph id and by character. Afterwards a [`Font`] is immutable and can be
//! shared freely between threads.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, Warning};
use crate::glyph::{Color, Glyph};
use crate::layout::{self, GlyphSource, TextMesh};
use crate::mesh::{self, GlyphMesh};
use crate::options::LoadOptions;
use crate::reader::ByteReader;
use crate::tables::glyf::{self, RawOutline};
use crate::tables::gpos::{self, KerningMap};
use crate::tables::{cmap, metrics, TableDirectory};

/// A loaded font: metrics, kerning and one triangle mesh per glyph.
#[derive(Debug, Clone)]
pub struct Font {
    units_per_em: f32,
    glyph_count: u16,
    glyphs: Vec<Arc<Glyph>>,
    by_char: HashMap<char, Arc<Glyph>>,
    kerning: KerningMap,
    warnings: Vec<Warning>,
}

impl Font {
    /// Load a font file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &LoadOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a font from an in-memory SFNT with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, &LoadOptions::default())
    }

    pub fn from_bytes_with_options(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let dir = TableDirectory::parse(&mut reader)?;
        dir.check_required()?;

        let units_per_em = metrics::units_per_em(&mut reader, &dir)?;
        if units_per_em == 0 {
            log::warn!("unitsPerEm is 0, size scaling disabled");
        }
        let glyph_count = metrics::glyph_count(&mut reader, &dir)?;
        let locations = metrics::glyph_locations(&mut reader, &dir, glyph_count)?;
        let mut warnings = Vec::new();
        let char_map = cmap::parse(&mut reader, &dir, glyph_count, &mut warnings)?;
        let hmetrics = metrics::horizontal_metrics(&mut reader, &dir, glyph_count)?;

        let kerning = if options.load_kerning {
            let mut universe: Vec<u16> = char_map.iter().map(|entry| entry.glyph).collect();
            universe.sort_unstable();
            universe.dedup();
            gpos::parse(&mut reader, &dir, &universe, &mut warnings)?
        } else {
            log::debug!("Kerning disabled by options");
            KerningMap::new()
        };

        let mut outlines = Vec::with_capacity(glyph_count as usize);
        for index in 0..glyph_count {
            outlines.push(glyf::read_outline(
                &mut reader,
                &locations,
                index,
                options.max_compound_depth,
            )?);
        }

        let meshes = tessellate_all(&outlines, options);

        let mut glyphs = Vec::with_capacity(meshes.len());
        for ((index, mesh), metric) in (0..glyph_count).zip(meshes).zip(&hmetrics) {
            for &remaining in &mesh.stalled {
                warnings.push(Warning::TriangulationStalled {
                    glyph: index,
                    remaining,
                });
            }
            glyphs.push(Arc::new(Glyph::new(
                index,
                metric.advance_width,
                metric.left_side_bearing,
                mesh.vertices,
                mesh.indices,
            )));
        }

        let mut by_char = HashMap::with_capacity(char_map.len());
        for entry in &char_map {
            let Some(c) = char::from_u32(entry.codepoint) else {
                log::debug!("cmap: skipping non-scalar codepoint {:#x}", entry.codepoint);
                continue;
            };
            let Some(glyph) = glyphs.get(entry.glyph as usize) else {
                log::debug!(
                    "cmap: {c:?} maps to glyph {} past the glyph count {glyph_count}",
                    entry.glyph
                );
                continue;
            };
            by_char.entry(c).or_insert_with(|| Arc::clone(glyph));
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }
        log::info!(
            "Loaded font: {glyph_count} glyphs, {} characters, {} kerning pairs",
            by_char.len(),
            kerning.len()
        );

        Ok(Self {
            units_per_em: units_per_em as f32,
            glyph_count,
            glyphs,
            by_char,
            kerning,
            warnings,
        })
    }

    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    pub fn glyph_count(&self) -> u16 {
        self.glyph_count
    }

    /// Glyph by glyph id.
    pub fn glyph(&self, index: u16) -> Option<&Glyph> {
        self.glyphs.get(index as usize).map(Arc::as_ref)
    }

    /// Glyph mapped to `c`, if any.
    pub fn glyph_for_char(&self, c: char) -> Option<&Glyph> {
        self.by_char.get(&c).map(Arc::as_ref)
    }

    /// Horizontal kerning adjustment in font units, 0 for unknown pairs.
    pub fn kerning(&self, left: u16, right: u16) -> i16 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0)
    }

    pub fn kerning_pairs(&self) -> usize {
        self.kerning.len()
    }

    /// Mapped characters in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let mut chars: Vec<char> = self.by_char.keys().copied().collect();
        chars.sort_unstable();
        chars.into_iter()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Factor turning font units into pixels at `px` per em.
    pub fn scale_for_size(&self, px: f32) -> f32 {
        if self.units_per_em > 0.0 {
            px / self.units_per_em
        } else {
            0.0
        }
    }

    /// Lay `text` out on one line starting at the origin.
    pub fn text_mesh(&self, text: &str, color: Color) -> TextMesh {
        layout::build_text_mesh(self, text, color)
    }
}

impl GlyphSource for Font {
    fn glyph_for_char(&self, c: char) -> Option<&Glyph> {
        Font::glyph_for_char(self, c)
    }

    fn kerning(&self, left: u16, right: u16) -> i16 {
        Font::kerning(self, left, right)
    }
}

#[cfg(feature = "parallel")]
fn tessellate_all(outlines: &[RawOutline], options: &LoadOptions) -> Vec<GlyphMesh> {
    use rayon::prelude::*;

    if options.parallel {
        log::debug!("Tessellating {} glyphs on the rayon pool", outlines.len());
        outlines
            .par_iter()
            .map(|outline| mesh::tessellate(outline, options.ear_clip_budget))
            .collect()
    } else {
        tessellate_sequential(outlines, options)
    }
}

#[cfg(not(feature = "parallel"))]
fn tessellate_all(outlines: &[RawOutline], options: &LoadOptions) -> Vec<GlyphMesh> {
    if options.parallel {
        log::debug!("parallel requested but the `parallel` feature is off");
    }
    tessellate_sequential(outlines, options)
}

fn tessellate_sequential(outlines: &[RawOutline], options: &LoadOptions) -> Vec<GlyphMesh> {
    outlines
        .iter()
        .map(|outline| mesh::tessellate(outline, options.ear_clip_budget))
        .collect()
}
