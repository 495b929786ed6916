// this_file: crates/glyphmesh/src/tables/metrics.rs

//! Font-wide metrics and per-glyph locations.
//!
//! Reads `head`, `maxp`, `hhea`, `hmtx` and `loca` into plain per-glyph
//! arrays indexed by glyph id.

use crate::error::Result;
use crate::reader::ByteReader;
use crate::tables::{TableDirectory, Tag};

const HEAD_UNITS_PER_EM: usize = 18;
const HEAD_INDEX_TO_LOC_FORMAT: usize = 50;
const MAXP_NUM_GLYPHS: usize = 4;
const HHEA_NUMBER_OF_HMETRICS: usize = 34;

/// Horizontal metrics for one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HMetric {
    pub advance_width: u16,
    pub left_side_bearing: i16,
}

/// Where a glyph's outline lives inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphLocation {
    /// Absolute byte offset of the glyph record.
    pub offset: usize,
    /// The `loca` span is zero-length: the glyph has no outline.
    pub empty: bool,
}

/// `unitsPerEm` from `head`.
pub fn units_per_em(reader: &mut ByteReader<'_>, dir: &TableDirectory) -> Result<u16> {
    let head = dir.require(Tag::HEAD)?;
    reader.goto(head.offset() + HEAD_UNITS_PER_EM)?;
    reader.u16()
}

/// `numGlyphs` from `maxp`.
pub fn glyph_count(reader: &mut ByteReader<'_>, dir: &TableDirectory) -> Result<u16> {
    let maxp = dir.require(Tag::MAXP)?;
    reader.goto(maxp.offset() + MAXP_NUM_GLYPHS)?;
    reader.u16()
}

/// Absolute outline offsets for every glyph, resolved through `loca`.
///
/// `indexToLocFormat == 0` selects 2-byte entries storing half the offset,
/// anything else 4-byte entries.
pub fn glyph_locations(
    reader: &mut ByteReader<'_>,
    dir: &TableDirectory,
    glyph_count: u16,
) -> Result<Vec<GlyphLocation>> {
    let head = dir.require(Tag::HEAD)?;
    reader.goto(head.offset() + HEAD_INDEX_TO_LOC_FORMAT)?;
    let short_entries = reader.i16()? == 0;

    let loca = dir.require(Tag::LOCA)?;
    let glyf = dir.require(Tag::GLYF)?;
    let entry_size = if short_entries { 2 } else { 4 };

    let read_entry = |reader: &mut ByteReader<'_>, i: usize| -> Result<usize> {
        reader.goto(loca.offset() + i * entry_size)?;
        Ok(if short_entries {
            reader.u16()? as usize * 2
        } else {
            reader.u32()? as usize
        })
    };

    let count = glyph_count as usize;
    // The trailing entry is optional here: truncated `loca` tables still load,
    // their last glyph is just never treated as empty.
    let entry_count = if (count + 1) * entry_size <= loca.length as usize {
        count + 1
    } else {
        count
    };

    let mut offsets = Vec::with_capacity(entry_count);
    for i in 0..entry_count {
        offsets.push(read_entry(reader, i)?);
    }

    let locations = (0..count)
        .map(|i| GlyphLocation {
            offset: glyf.offset() + offsets[i],
            empty: offsets.get(i + 1).is_some_and(|&next| next == offsets[i]),
        })
        .collect();

    log::debug!(
        "loca: {} glyphs, {} entries",
        count,
        if short_entries { "short" } else { "long" }
    );
    Ok(locations)
}

/// Advance width and left side bearing for every glyph.
///
/// Glyphs past `numberOfHMetrics` reuse the last advance width but still
/// read their own left side bearing.
pub fn horizontal_metrics(
    reader: &mut ByteReader<'_>,
    dir: &TableDirectory,
    glyph_count: u16,
) -> Result<Vec<HMetric>> {
    let hhea = dir.require(Tag::HHEA)?;
    reader.goto(hhea.offset() + HHEA_NUMBER_OF_HMETRICS)?;
    let long_metrics = reader.u16()?.min(glyph_count) as usize;

    let hmtx = dir.require(Tag::HMTX)?;
    reader.goto(hmtx.offset())?;

    let mut metrics = Vec::with_capacity(glyph_count as usize);
    for _ in 0..long_metrics {
        metrics.push(HMetric {
            advance_width: reader.u16()?,
            left_side_bearing: reader.i16()?,
        });
    }

    let last_advance = metrics.last().map(|m| m.advance_width).unwrap_or(0);
    for _ in long_metrics..glyph_count as usize {
        metrics.push(HMetric {
            advance_width: last_advance,
            left_side_bearing: reader.i16()?,
        });
    }

    Ok(metrics)
}
