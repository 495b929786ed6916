// this_file: crates/glyphmesh/src/tables/cmap.rs

//! Unicode character map decoding.
//!
//! Only Unicode-platform subtables are considered: encoding 4 (full
//! repertoire) is preferred over encoding 3 (BMP). Formats 4 and 12 are
//! decoded into a flat list of `(codepoint, glyph index)` pairs in table
//! order.

use crate::error::{FontError, Result, Warning};
use crate::reader::ByteReader;
use crate::tables::{TableDirectory, Tag};

const PLATFORM_UNICODE: u16 = 0;
const ENCODING_UNICODE_FULL: u16 = 4;
const ENCODING_UNICODE_BMP: u16 = 3;

/// Codepoint used for the synthesized "missing glyph" entry.
pub const MISSING_GLYPH_CODEPOINT: u32 = 0xFFFF;

/// Last Unicode codepoint; format 12 groups are clamped to it.
pub const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// One decoded mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmapEntry {
    pub codepoint: u32,
    pub glyph: u16,
}

impl CmapEntry {
    pub const fn new(codepoint: u32, glyph: u16) -> Self {
        Self { codepoint, glyph }
    }
}

/// Decode the best Unicode subtable of the font's `cmap`.
///
/// Format 12 groups mapping past `glyph_count` are cut short and reported
/// in `warnings`.
pub fn parse(
    reader: &mut ByteReader<'_>,
    dir: &TableDirectory,
    glyph_count: u16,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<CmapEntry>> {
    let cmap = dir.require(Tag::CMAP)?;
    reader.goto(cmap.offset())?;

    let _version = reader.u16()?;
    let subtable_count = reader.u16()?;

    let mut selected: Option<(u16, u32)> = None;
    for _ in 0..subtable_count {
        let platform = reader.u16()?;
        let encoding = reader.u16()?;
        let offset = reader.u32()?;

        if platform != PLATFORM_UNICODE {
            continue;
        }
        match encoding {
            ENCODING_UNICODE_FULL => selected = Some((encoding, offset)),
            ENCODING_UNICODE_BMP if selected.is_none() => selected = Some((encoding, offset)),
            _ => {},
        }
    }

    let (encoding, offset) = selected.ok_or_else(|| {
        FontError::UnsupportedCmap("no Unicode platform subtable with encoding 3 or 4".into())
    })?;
    log::debug!("cmap: using platform 0 encoding {encoding} at +{offset}");

    decode_subtable(reader, cmap.offset() + offset as usize, glyph_count, warnings)
}

/// Decode the subtable starting at the absolute offset `start`.
pub fn decode_subtable(
    reader: &mut ByteReader<'_>,
    start: usize,
    glyph_count: u16,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<CmapEntry>> {
    reader.goto(start)?;
    match reader.u16()? {
        4 => decode_format4(reader),
        12 => decode_format12(reader, glyph_count, warnings),
        other => Err(FontError::UnsupportedCmap(format!("format {other}"))),
    }
}

fn decode_format12(
    reader: &mut ByteReader<'_>,
    glyph_count: u16,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<CmapEntry>> {
    let _reserved = reader.u16()?;
    let _length = reader.u32()?;
    let _language = reader.u32()?;
    let group_count = reader.u32()?;

    let mut entries = Vec::new();
    for _ in 0..group_count {
        let start_code = reader.u32()?;
        let end_code = reader.u32()?;
        let start_glyph = reader.u32()?;

        if end_code < start_code || start_code > MAX_CODEPOINT {
            log::debug!("cmap12: skipping group {start_code:#x}..{end_code:#x}");
            continue;
        }
        let end_code = end_code.min(MAX_CODEPOINT);

        // codes mapping to glyph_count or beyond are dropped
        let available = u32::from(glyph_count).saturating_sub(start_glyph);
        let last_mapped = if available == 0 {
            None
        } else {
            Some(start_code + (available - 1).min(end_code - start_code))
        };
        let mapped_end = last_mapped.map_or(start_code, |last| last + 1);
        if mapped_end <= end_code {
            warnings.push(Warning::CmapGlyphsOutOfRange {
                start: mapped_end,
                end: end_code,
                glyph_count,
            });
        }

        if entries.len() + (mapped_end - start_code) as usize > (MAX_CODEPOINT + 1) as usize {
            log::warn!("cmap12: more mappings than Unicode codepoints, ignoring the rest");
            break;
        }
        entries.extend((start_code..mapped_end).map(|code| {
            // in range by construction: start_glyph + offset < glyph_count
            CmapEntry::new(code, (start_glyph + (code - start_code)) as u16)
        }));
    }

    Ok(entries)
}

fn decode_format4(reader: &mut ByteReader<'_>) -> Result<Vec<CmapEntry>> {
    let _length = reader.u16()?;
    let _language = reader.u16()?;
    let seg_count = (reader.u16()? / 2) as usize;
    // searchRange, entrySelector, rangeShift
    reader.skip(6)?;

    let mut end_codes = Vec::with_capacity(seg_count);
    for _ in 0..seg_count {
        end_codes.push(reader.u16()?);
    }
    let _reserved_pad = reader.u16()?;

    let mut start_codes = Vec::with_capacity(seg_count);
    for _ in 0..seg_count {
        start_codes.push(reader.u16()?);
    }

    let mut id_deltas = Vec::with_capacity(seg_count);
    for _ in 0..seg_count {
        id_deltas.push(reader.u16()?);
    }

    // idRangeOffset is relative to the position of the entry itself
    let mut range_offsets = Vec::with_capacity(seg_count);
    for _ in 0..seg_count {
        let location = reader.position();
        range_offsets.push((reader.u16()?, location));
    }

    let mut entries = Vec::new();
    let mut saw_missing_glyph = false;

    for seg in 0..seg_count {
        let start = start_codes[seg];
        let end = end_codes[seg];
        let delta = id_deltas[seg];
        let (range_offset, range_location) = range_offsets[seg];

        if start == 0xFFFF {
            continue;
        }

        for code in start..=end {
            let glyph = if range_offset == 0 {
                code.wrapping_add(delta)
            } else {
                let location = range_location
                    + range_offset as usize
                    + 2 * (code - start) as usize;
                reader.goto(location)?;
                match reader.u16()? {
                    0 => 0,
                    index => index.wrapping_add(delta),
                }
            };

            if glyph == 0 {
                saw_missing_glyph = true;
            } else {
                entries.push(CmapEntry::new(code as u32, glyph));
            }
        }
    }

    if !saw_missing_glyph {
        entries.push(CmapEntry::new(MISSING_GLYPH_CODEPOINT, 0));
    }

    Ok(entries)
}
