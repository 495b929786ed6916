// this_file: crates/glyphmesh/src/reader.rs

//! Big-endian cursor over raw font bytes.
//!
//! Every SFNT structure is stored big-endian. The reader keeps an absolute
//! position into the whole font file so table offsets from the directory can
//! be used directly with [`ByteReader::goto`].

use crate::error::{FontError, Result};
use crate::tables::Tag;

/// Sequential/random-access reader over a borrowed font buffer.
#[derive(Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left after the cursor.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Jump to an absolute byte offset.
    pub fn goto(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(self.out_of_range(offset, 0));
        }
        self.pos = offset;
        Ok(())
    }

    /// Move the cursor forward by `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        let target = self
            .pos
            .checked_add(count)
            .ok_or_else(|| self.out_of_range(self.pos, count))?;
        self.goto(target).map_err(|_| self.out_of_range(self.pos, count))
    }

    fn out_of_range(&self, offset: usize, len: usize) -> FontError {
        FontError::OutOfRange {
            offset,
            len,
            size: self.data.len(),
        }
    }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.out_of_range(self.pos, n))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.array()?))
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    pub fn i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.array()?))
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    /// Raw run of `count` bytes, borrowed from the font buffer.
    pub fn bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Four-character table or feature tag.
    pub fn tag(&mut self) -> Result<Tag> {
        Ok(Tag(self.array()?))
    }

    /// Signed 2.14 fixed-point number.
    pub fn f2dot14(&mut self) -> Result<f32> {
        Ok(self.i16()? as f32 / 16384.0)
    }
}

impl std::fmt::Debug for ByteReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteReader")
            .field("pos", &self.pos)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Whether bit `index` is set in `flags`.
#[inline]
pub(crate) fn flag_bit(flags: u16, index: u32) -> bool {
    (flags >> index) & 1 == 1
}
