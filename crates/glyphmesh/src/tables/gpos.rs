// this_file: crates/glyphmesh/src/tables/gpos.rs

//! Pair kerning from the `GPOS` table.
//!
//! Only the `kern` feature's PairPos lookups (type 2, formats 1 and 2) are
//! read, and only the x-advance of the first value record is kept. This is
//! the subset a left-to-right mesh layout needs, not a shaping engine.

use std::collections::{HashMap, HashSet};

use crate::error::{FontError, Result, Warning};
use crate::reader::ByteReader;
use crate::tables::{TableDirectory, Tag};

/// Lookups with this flag bit are not applied to plain glyph pairs.
const LOOKUP_FLAG_IGNORE_MARKS: u16 = 0x0008;
const LOOKUP_TYPE_PAIR_POS: u16 = 2;

const VALUE_X_PLACEMENT: u16 = 0x0001;
const VALUE_Y_PLACEMENT: u16 = 0x0002;
const VALUE_X_ADVANCE: u16 = 0x0004;

/// Every possible glyph id once; coverage and class tables never need more.
const MAX_GLYPH_IDS: usize = 1 << 16;

/// `(left glyph, right glyph) -> x advance adjustment` in font units.
pub type KerningMap = HashMap<(u16, u16), i16>;

/// Byte size of a value record: two bytes for each of the eight fields present.
pub fn value_record_size(format: u16) -> usize {
    2 * (format & 0x00FF).count_ones() as usize
}

/// Read a value record and return its x advance, leaving the reader just
/// past the record. Device table offsets are skipped, never followed.
fn read_x_advance(reader: &mut ByteReader<'_>, format: u16) -> Result<i16> {
    let start = reader.position();
    let mut skip = 0;
    if format & VALUE_X_PLACEMENT != 0 {
        skip += 2;
    }
    if format & VALUE_Y_PLACEMENT != 0 {
        skip += 2;
    }
    let advance = if format & VALUE_X_ADVANCE != 0 {
        reader.goto(start + skip)?;
        reader.i16()?
    } else {
        0
    };
    reader.goto(start + value_record_size(format))?;
    Ok(advance)
}

/// Build the kerning map for the font.
///
/// `right_glyphs` is the glyph universe PairPos format 2 class matrices are
/// expanded against. A font without `GPOS` kerns nothing.
pub fn parse(
    reader: &mut ByteReader<'_>,
    dir: &TableDirectory,
    right_glyphs: &[u16],
    warnings: &mut Vec<Warning>,
) -> Result<KerningMap> {
    let mut pairs = KerningMap::new();
    let Some(gpos) = dir.get(Tag::GPOS) else {
        log::debug!("no GPOS table, kerning disabled");
        return Ok(pairs);
    };
    let base = gpos.offset();

    reader.goto(base)?;
    let _major = reader.u16()?;
    let _minor = reader.u16()?;
    let _script_list = reader.u16()?;
    let feature_list = base + reader.u16()? as usize;
    let lookup_list = base + reader.u16()? as usize;

    let kern_lookups = kern_lookup_indices(reader, feature_list)?;
    if kern_lookups.is_empty() {
        log::debug!("GPOS has no kern feature");
        return Ok(pairs);
    }

    reader.goto(lookup_list)?;
    let lookup_count = reader.u16()?;
    let mut lookup_offsets = Vec::with_capacity(lookup_count as usize);
    for _ in 0..lookup_count {
        lookup_offsets.push(reader.u16()?);
    }

    for lookup_index in kern_lookups {
        let Some(&offset) = lookup_offsets.get(lookup_index as usize) else {
            log::debug!("kern feature references missing lookup {lookup_index}");
            continue;
        };
        let lookup = lookup_list + offset as usize;
        reader.goto(lookup)?;
        let kind = reader.u16()?;
        let flag = reader.u16()?;
        let subtable_count = reader.u16()?;

        if flag & LOOKUP_FLAG_IGNORE_MARKS != 0 {
            log::debug!("skipping kern lookup {lookup_index} with flag {flag:#06x}");
            warnings.push(Warning::FlaggedLookupSkipped {
                lookup: lookup_index,
                flag,
            });
            continue;
        }
        if kind != LOOKUP_TYPE_PAIR_POS {
            log::debug!("skipping kern lookup {lookup_index} of type {kind}");
            warnings.push(Warning::UnknownLookupType {
                lookup: lookup_index,
                kind,
            });
            continue;
        }

        let mut subtables = Vec::with_capacity(subtable_count as usize);
        for _ in 0..subtable_count {
            subtables.push(lookup + reader.u16()? as usize);
        }

        for subtable in subtables {
            reader.goto(subtable)?;
            match reader.u16()? {
                1 => read_pair_pos_format1(reader, subtable, &mut pairs)?,
                2 => read_pair_pos_format2(reader, subtable, right_glyphs, &mut pairs)?,
                format => warnings.push(Warning::UnsupportedPairPosFormat {
                    lookup: lookup_index,
                    format,
                }),
            }
        }
    }

    log::debug!("GPOS: {} kerning pairs", pairs.len());
    Ok(pairs)
}

/// Lookup indices of every `kern` feature, first occurrence order.
fn kern_lookup_indices(reader: &mut ByteReader<'_>, feature_list: usize) -> Result<Vec<u16>> {
    reader.goto(feature_list)?;
    let feature_count = reader.u16()?;

    let mut kern_features = Vec::new();
    for _ in 0..feature_count {
        let tag = reader.tag()?;
        let offset = reader.u16()?;
        if tag == Tag::KERN_FEATURE {
            kern_features.push(feature_list + offset as usize);
        }
    }

    let mut seen = HashSet::new();
    let mut indices = Vec::new();
    for feature in kern_features {
        reader.goto(feature)?;
        let _feature_params = reader.u16()?;
        let count = reader.u16()?;
        for _ in 0..count {
            let index = reader.u16()?;
            if seen.insert(index) {
                indices.push(index);
            }
        }
    }
    Ok(indices)
}

/// Individual glyph pairs.
fn read_pair_pos_format1(
    reader: &mut ByteReader<'_>,
    subtable: usize,
    pairs: &mut KerningMap,
) -> Result<()> {
    let coverage = subtable + reader.u16()? as usize;
    let format1 = reader.u16()?;
    let format2 = reader.u16()?;
    let pair_set_count = reader.u16()?;
    let mut pair_sets = Vec::with_capacity(pair_set_count as usize);
    for _ in 0..pair_set_count {
        pair_sets.push(subtable + reader.u16()? as usize);
    }

    let left_glyphs = read_coverage(reader, coverage)?;
    let second_size = value_record_size(format2);

    for (&left, &pair_set) in left_glyphs.iter().zip(&pair_sets) {
        reader.goto(pair_set)?;
        let pair_count = reader.u16()?;
        for _ in 0..pair_count {
            let right = reader.u16()?;
            let advance = read_x_advance(reader, format1)?;
            reader.skip(second_size)?;
            if advance != 0 {
                pairs.entry((left, right)).or_insert(advance);
            }
        }
    }
    Ok(())
}

/// Class-based pairs, expanded against the known right glyphs.
fn read_pair_pos_format2(
    reader: &mut ByteReader<'_>,
    subtable: usize,
    right_glyphs: &[u16],
    pairs: &mut KerningMap,
) -> Result<()> {
    let coverage = subtable + reader.u16()? as usize;
    let format1 = reader.u16()?;
    let format2 = reader.u16()?;
    let class_def1 = subtable + reader.u16()? as usize;
    let class_def2 = subtable + reader.u16()? as usize;
    let class1_count = reader.u16()? as usize;
    let class2_count = reader.u16()? as usize;

    if format1 & VALUE_X_ADVANCE == 0 {
        log::debug!("PairPos format 2 at +{subtable} has no x advances");
        return Ok(());
    }

    // The class matrix follows the 16-byte header directly
    reader.goto(subtable + 16)?;
    let second_size = value_record_size(format2);
    let cells = class1_count * class2_count;
    let needed = cells.saturating_mul(value_record_size(format1) + second_size);
    if needed > reader.remaining() {
        return Err(FontError::OutOfRange {
            offset: reader.position(),
            len: needed,
            size: reader.len(),
        });
    }

    let mut matrix = Vec::with_capacity(cells);
    for _ in 0..cells {
        matrix.push(read_x_advance(reader, format1)?);
        reader.skip(second_size)?;
    }

    let left_glyphs = read_coverage(reader, coverage)?;
    let left_classes = read_class_def(reader, class_def1)?;
    let right_classes = read_class_def(reader, class_def2)?;

    for left in left_glyphs {
        let class1 = left_classes.get(&left).copied().unwrap_or(0) as usize;
        if class1 >= class1_count {
            continue;
        }
        for &right in right_glyphs {
            let class2 = right_classes.get(&right).copied().unwrap_or(0) as usize;
            if class2 >= class2_count {
                continue;
            }
            let advance = matrix[class1 * class2_count + class2];
            if advance != 0 {
                pairs.entry((left, right)).or_insert(advance);
            }
        }
    }
    Ok(())
}

/// Ordered glyph list of a coverage table; unknown formats cover nothing.
fn read_coverage(reader: &mut ByteReader<'_>, offset: usize) -> Result<Vec<u16>> {
    reader.goto(offset)?;
    let mut glyphs = Vec::new();
    match reader.u16()? {
        1 => {
            let count = reader.u16()?;
            for _ in 0..count {
                glyphs.push(reader.u16()?);
            }
        },
        2 => {
            let range_count = reader.u16()?;
            for _ in 0..range_count {
                let start = reader.u16()?;
                let end = reader.u16()?;
                let _start_coverage_index = reader.u16()?;
                let room = MAX_GLYPH_IDS - glyphs.len();
                glyphs.extend((start..=end).take(room));
                if glyphs.len() == MAX_GLYPH_IDS {
                    log::debug!("coverage at +{offset} lists more glyphs than exist");
                    break;
                }
            }
        },
        format => log::debug!("unsupported coverage format {format}"),
    }
    Ok(glyphs)
}

/// Glyph -> class map of a class definition table.
fn read_class_def(reader: &mut ByteReader<'_>, offset: usize) -> Result<HashMap<u16, u16>> {
    reader.goto(offset)?;
    let mut classes = HashMap::new();
    match reader.u16()? {
        1 => {
            let start = reader.u16()?;
            let count = reader.u16()?;
            for i in 0..count {
                classes.insert(start.wrapping_add(i), reader.u16()?);
            }
        },
        2 => {
            let range_count = reader.u16()?;
            let mut assigned = 0;
            for _ in 0..range_count {
                let start = reader.u16()?;
                let end = reader.u16()?;
                let class = reader.u16()?;
                for glyph in (start..=end).take(MAX_GLYPH_IDS - assigned) {
                    classes.insert(glyph, class);
                    assigned += 1;
                }
                if assigned == MAX_GLYPH_IDS {
                    log::debug!("class definition at +{offset} assigns more glyphs than exist");
                    break;
                }
            }
        },
        format => log::debug!("unsupported class definition format {format}"),
    }
    Ok(classes)
}
