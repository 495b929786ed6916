// this_file: crates/glyphmesh/src/tables/mod.rs

//! SFNT table directory and the tables the mesh pipeline reads.
//!
//! - [`metrics`]: `head`, `maxp`, `hhea`, `hmtx`, `loca`
//! - [`cmap`]: Unicode character maps (formats 4 and 12)
//! - [`glyf`]: simple and compound glyph outlines
//! - [`gpos`]: pair kerning from `GPOS` lookup type 2

use std::collections::HashMap;
use std::fmt;

use crate::error::{FontError, Result};
use crate::reader::ByteReader;

pub mod cmap;
pub mod glyf;
pub mod gpos;
pub mod metrics;

/// A 4-byte table or feature tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const HEAD: Self = Self(*b"head");
    pub const MAXP: Self = Self(*b"maxp");
    pub const HHEA: Self = Self(*b"hhea");
    pub const HMTX: Self = Self(*b"hmtx");
    pub const LOCA: Self = Self(*b"loca");
    pub const GLYF: Self = Self(*b"glyf");
    pub const CMAP: Self = Self(*b"cmap");
    pub const GPOS: Self = Self(*b"GPOS");
    pub const KERN_FEATURE: Self = Self(*b"kern");

    /// Tables every font must carry for the mesh pipeline.
    pub const REQUIRED: [Tag; 7] = [
        Self::HEAD,
        Self::MAXP,
        Self::HHEA,
        Self::HMTX,
        Self::LOCA,
        Self::GLYF,
        Self::CMAP,
    ];

    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag('{self}')")
    }
}

/// One entry of the table directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset as usize
    }
}

/// Tag-keyed view of the SFNT table directory.
#[derive(Debug, Clone, Default)]
pub struct TableDirectory {
    records: HashMap<Tag, TableRecord>,
}

impl TableDirectory {
    /// Parse the directory at the start of the font file.
    ///
    /// Layout: sfnt version (4 bytes, skipped), `numTables: u16`, the three
    /// binary-search fields (6 bytes, skipped), then 16-byte table records.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        reader.goto(0)?;
        reader.skip(4)?;
        let table_count = reader.u16()?;
        reader.skip(6)?;

        let mut records = HashMap::with_capacity(table_count as usize);
        for _ in 0..table_count {
            let record = TableRecord {
                tag: reader.tag()?,
                checksum: reader.u32()?,
                offset: reader.u32()?,
                length: reader.u32()?,
            };
            log::trace!(
                "table {} at {} ({} bytes)",
                record.tag,
                record.offset,
                record.length
            );
            // First record wins on duplicated tags
            records.entry(record.tag).or_insert(record);
        }

        Ok(Self { records })
    }

    pub fn get(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.get(&tag)
    }

    /// Look up a table the pipeline cannot work without.
    pub fn require(&self, tag: Tag) -> Result<&TableRecord> {
        self.get(tag).ok_or(FontError::MissingTable(tag))
    }

    /// Fail fast if any required table is absent.
    pub fn check_required(&self) -> Result<()> {
        for tag in Tag::REQUIRED {
            self.require(tag)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by file offset.
    pub fn records(&self) -> Vec<TableRecord> {
        let mut records: Vec<_> = self.records.values().copied().collect();
        records.sort_by_key(|r| r.offset);
        records
    }
}
