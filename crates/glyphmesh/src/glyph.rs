// this_file: crates/glyphmesh/src/glyph.rs

//! Tessellated glyphs and their vertex format.

use kurbo::Point;

/// Simple RGBA color carried through to every vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// One mesh vertex.
///
/// `curve` tells a shader how to fill the triangle: [`GlyphVertex::SOLID`]
/// triangles are filled outright, [`GlyphVertex::CURVE`] triangles are
/// filled where `u * u - v` has the sign given by `side`, using the
/// interpolated `texcoord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphVertex {
    /// Font units; `z` is always 0 for glyph geometry.
    pub position: [f32; 3],
    pub color: Color,
    pub texcoord: [f32; 2],
    pub curve: i16,
    pub side: i16,
}

impl GlyphVertex {
    pub const CURVE: i16 = 1;
    pub const SOLID: i16 = -1;

    /// Coverage coordinates assigned to the corners of a curve triangle.
    pub const CURVE_TEXCOORDS: [[f32; 2]; 3] = [[0.0, 0.0], [0.5, 0.0], [1.0, 1.0]];

    pub fn curve(point: Point, texcoord: [f32; 2], side: i16) -> Self {
        Self {
            position: [point.x as f32, point.y as f32, 0.0],
            color: Color::default(),
            texcoord,
            curve: Self::CURVE,
            side,
        }
    }

    pub fn solid(point: Point) -> Self {
        Self {
            position: [point.x as f32, point.y as f32, 0.0],
            color: Color::default(),
            texcoord: [0.0, 0.0],
            curve: Self::SOLID,
            side: 1,
        }
    }

    pub fn is_curve(&self) -> bool {
        self.curve == Self::CURVE
    }

    /// Position projected onto the glyph plane.
    pub fn point(&self) -> Point {
        Point::new(self.position[0] as f64, self.position[1] as f64)
    }
}

/// A glyph's metrics and triangles.
///
/// Built once at load time and never changed afterwards; `indices` always
/// holds a multiple of three entries, each below `vertices.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    index: u16,
    advance_width: u16,
    left_side_bearing: i16,
    vertices: Vec<GlyphVertex>,
    indices: Vec<u32>,
}

impl Glyph {
    pub(crate) fn new(
        index: u16,
        advance_width: u16,
        left_side_bearing: i16,
        vertices: Vec<GlyphVertex>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            index,
            advance_width,
            left_side_bearing,
            vertices,
            indices,
        }
    }

    /// Glyph id inside the font.
    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn advance_width(&self) -> u16 {
        self.advance_width
    }

    pub fn left_side_bearing(&self) -> i16 {
        self.left_side_bearing
    }

    pub fn vertices(&self) -> &[GlyphVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// No geometry, e.g. a space.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn curve_triangle_count(&self) -> usize {
        self.indices
            .chunks_exact(3)
            .filter(|tri| self.vertices[tri[0] as usize].is_curve())
            .count()
    }
}
