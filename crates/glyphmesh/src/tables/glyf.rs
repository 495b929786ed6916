// this_file: crates/glyphmesh/src/tables/glyf.rs

//! Glyph outline extraction from the `glyf` table.
//!
//! Simple glyphs decode straight into on/off-curve points. Compound glyphs
//! are flattened with an explicit worklist: each component is queued with the
//! accumulated transform of its parents and a nesting depth, so cyclic or
//! absurdly deep references stop with [`FontError::MalformedOutline`] instead
//! of recursing forever.

use kurbo::{Affine, Point};

use crate::error::{FontError, Result};
use crate::reader::{flag_bit, ByteReader};
use crate::tables::metrics::GlyphLocation;

// Simple glyph flag bits
const ON_CURVE: u32 = 0;
const X_SHORT: u32 = 1;
const Y_SHORT: u32 = 2;
const REPEAT: u32 = 3;
const X_SAME_OR_POSITIVE: u32 = 4;
const Y_SAME_OR_POSITIVE: u32 = 5;

// Compound glyph flag bits
const ARGS_ARE_WORDS: u32 = 0;
const ARGS_ARE_XY_VALUES: u32 = 1;
const HAS_SCALE: u32 = 3;
const MORE_COMPONENTS: u32 = 5;
const HAS_XY_SCALE: u32 = 6;
const HAS_TWO_BY_TWO: u32 = 7;

/// Component offsets are stored in a tenth of the unit the mesh uses.
const COMPONENT_OFFSET_DIVISOR: f64 = 10.0;

/// Upper bound on queued components for a single glyph.
const MAX_COMPONENTS: usize = u16::MAX as usize;

/// A decoded outline point in glyph space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    pub pos: Point,
    pub on_curve: bool,
}

impl OutlinePoint {
    pub fn new(x: f64, y: f64, on_curve: bool) -> Self {
        Self {
            pos: Point::new(x, y),
            on_curve,
        }
    }
}

/// Points of every contour back to back, with the inclusive index of each
/// contour's last point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutline {
    pub points: Vec<OutlinePoint>,
    pub contour_ends: Vec<usize>,
}

impl RawOutline {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point spans of each contour.
    pub fn contours(&self) -> impl Iterator<Item = &[OutlinePoint]> + '_ {
        let mut start = 0;
        self.contour_ends.iter().map(move |&end| {
            let span = &self.points[start..=end];
            start = end + 1;
            span
        })
    }

    fn append(&mut self, other: RawOutline, transform: Affine) {
        let base = self.points.len();
        self.points.extend(other.points.into_iter().map(|p| OutlinePoint {
            pos: transform * p.pos,
            on_curve: p.on_curve,
        }));
        self.contour_ends
            .extend(other.contour_ends.into_iter().map(|end| end + base));
    }
}

/// One reference inside a compound glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Component {
    glyph: u16,
    transform: Affine,
}

struct Pending {
    glyph: u16,
    transform: Affine,
    depth: usize,
}

/// Decode the outline of `glyph`, flattening compound references.
pub fn read_outline(
    reader: &mut ByteReader<'_>,
    locations: &[GlyphLocation],
    glyph: u16,
    max_depth: usize,
) -> Result<RawOutline> {
    let mut outline = RawOutline::default();
    let mut work = vec![Pending {
        glyph,
        transform: Affine::IDENTITY,
        depth: 0,
    }];
    let mut visited = 0usize;

    while let Some(item) = work.pop() {
        visited += 1;
        if visited > MAX_COMPONENTS {
            return Err(FontError::malformed(glyph, "too many components"));
        }

        let location = locations.get(item.glyph as usize).ok_or_else(|| {
            FontError::malformed(
                glyph,
                format!(
                    "component references glyph {} of {}",
                    item.glyph,
                    locations.len()
                ),
            )
        })?;
        if location.empty {
            continue;
        }

        reader.goto(location.offset)?;
        let contour_count = reader.i16()?;

        if contour_count >= 0 {
            let simple = read_simple(reader, contour_count as usize, glyph)?;
            outline.append(simple, item.transform);
            continue;
        }

        if item.depth >= max_depth {
            return Err(FontError::malformed(
                glyph,
                format!("compound nesting exceeds depth {max_depth}"),
            ));
        }

        let components = read_components(reader)?;
        // Reverse so components pop in declaration order
        for component in components.into_iter().rev() {
            work.push(Pending {
                glyph: component.glyph,
                transform: item.transform * component.transform,
                depth: item.depth + 1,
            });
        }
    }

    Ok(outline)
}

/// Decode a simple glyph body; the reader sits just past `numberOfContours`.
fn read_simple(
    reader: &mut ByteReader<'_>,
    contour_count: usize,
    glyph: u16,
) -> Result<RawOutline> {
    if contour_count == 0 {
        return Ok(RawOutline::default());
    }

    // xMin, yMin, xMax, yMax
    reader.skip(8)?;

    let mut contour_ends = Vec::with_capacity(contour_count);
    for _ in 0..contour_count {
        let end = reader.u16()? as usize;
        if let Some(&previous) = contour_ends.last() {
            if end <= previous {
                return Err(FontError::malformed(
                    glyph,
                    format!("contour end index {end} does not follow {previous}"),
                ));
            }
        }
        contour_ends.push(end);
    }
    let point_count = contour_ends.last().map_or(0, |&end| end + 1);

    let instruction_length = reader.u16()? as usize;
    reader.skip(instruction_length)?;

    let mut flags = Vec::with_capacity(point_count);
    while flags.len() < point_count {
        let flag = reader.u8()? as u16;
        flags.push(flag);
        if flag_bit(flag, REPEAT) {
            let repeat = reader.u8()? as usize;
            let room = point_count - flags.len();
            flags.extend(std::iter::repeat(flag).take(repeat.min(room)));
        }
    }

    let xs = read_coordinates(reader, &flags, X_SHORT, X_SAME_OR_POSITIVE)?;
    let ys = read_coordinates(reader, &flags, Y_SHORT, Y_SAME_OR_POSITIVE)?;

    let points = flags
        .iter()
        .zip(xs.into_iter().zip(ys))
        .map(|(&flag, (x, y))| OutlinePoint::new(x as f64, y as f64, flag_bit(flag, ON_CURVE)))
        .collect();

    Ok(RawOutline {
        points,
        contour_ends,
    })
}

/// Decode one coordinate axis as accumulated deltas.
fn read_coordinates(
    reader: &mut ByteReader<'_>,
    flags: &[u16],
    short_bit: u32,
    same_or_positive_bit: u32,
) -> Result<Vec<i32>> {
    let mut coords = Vec::with_capacity(flags.len());
    let mut value = 0i32;

    for &flag in flags {
        if flag_bit(flag, short_bit) {
            let delta = reader.u8()? as i32;
            value += if flag_bit(flag, same_or_positive_bit) {
                delta
            } else {
                -delta
            };
        } else if !flag_bit(flag, same_or_positive_bit) {
            value += reader.i16()? as i32;
        }
        coords.push(value);
    }

    Ok(coords)
}

/// Read every component record; the reader sits just past `numberOfContours`.
fn read_components(reader: &mut ByteReader<'_>) -> Result<Vec<Component>> {
    // bounding box
    reader.skip(8)?;

    let mut components = Vec::new();
    loop {
        let flags = reader.u16()?;
        let glyph = reader.u16()?;

        let (arg1, arg2) = if flag_bit(flags, ARGS_ARE_WORDS) {
            (reader.i16()? as f64, reader.i16()? as f64)
        } else {
            (reader.i8()? as f64, reader.i8()? as f64)
        };
        let (dx, dy) = if flag_bit(flags, ARGS_ARE_XY_VALUES) {
            (arg1, arg2)
        } else {
            log::debug!("component glyph {glyph}: point-matched placement treated as zero offset");
            (0.0, 0.0)
        };

        let (scale_x, scale_y) = if flag_bit(flags, HAS_SCALE) {
            let scale = reader.f2dot14()? as f64;
            (scale, scale)
        } else if flag_bit(flags, HAS_XY_SCALE) {
            (reader.f2dot14()? as f64, reader.f2dot14()? as f64)
        } else if flag_bit(flags, HAS_TWO_BY_TWO) {
            // Consumed to keep the stream aligned; applied as identity
            reader.skip(8)?;
            log::debug!("component glyph {glyph}: 2x2 transform ignored");
            (1.0, 1.0)
        } else {
            (1.0, 1.0)
        };

        components.push(Component {
            glyph,
            transform: Affine::new([
                scale_x,
                0.0,
                0.0,
                scale_y,
                dx / COMPONENT_OFFSET_DIVISOR,
                dy / COMPONENT_OFFSET_DIVISOR,
            ]),
        });

        if !flag_bit(flags, MORE_COMPONENTS) {
            break;
        }
    }

    Ok(components)
}
