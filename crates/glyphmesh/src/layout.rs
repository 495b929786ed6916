// this_file: crates/glyphmesh/src/layout.rs

//! Single-line text layout over prebuilt glyph meshes.

use kurbo::Rect;

use crate::glyph::{Color, Glyph, GlyphVertex};

/// Anything that can hand out glyphs and kerning for layout.
pub trait GlyphSource {
    fn glyph_for_char(&self, c: char) -> Option<&Glyph>;

    /// Kerning in font units between two glyph ids.
    fn kerning(&self, left: u16, right: u16) -> i16;
}

/// Vertex and index buffers for a run of text, in font units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
    /// Pen position after the last character.
    pub advance: f32,
}

impl TextMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Extent of the emitted vertices; `None` when nothing was drawn.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.vertices.iter().map(GlyphVertex::point);
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p)))
    }
}

/// Place the glyphs of `text` left to right.
///
/// Kerning is applied between each glyph and the one before it, starting
/// from glyph 0. Characters without a glyph, and the space glyph itself,
/// only advance the pen by the space width.
pub fn build_text_mesh<S: GlyphSource + ?Sized>(source: &S, text: &str, color: Color) -> TextMesh {
    let space = source.glyph_for_char(' ');
    let mut mesh = TextMesh::default();
    let mut pen = 0i64;
    let mut previous = 0u16;

    for c in text.chars() {
        let glyph = match source.glyph_for_char(c) {
            Some(glyph) if space.map_or(true, |s| s.index() != glyph.index()) => glyph,
            _ => {
                if let Some(space) = space {
                    pen += i64::from(source.kerning(previous, space.index()));
                    pen += i64::from(space.advance_width());
                    previous = space.index();
                }
                continue;
            },
        };

        pen += i64::from(source.kerning(previous, glyph.index()));

        let base = mesh.vertices.len() as u32;
        let offset = pen as f32;
        mesh.vertices.extend(glyph.vertices().iter().map(|v| GlyphVertex {
            position: [v.position[0] + offset, v.position[1], v.position[2]],
            color,
            ..*v
        }));
        mesh.indices.extend(glyph.indices().iter().map(|i| i + base));

        pen += i64::from(glyph.advance_width());
        previous = glyph.index();
    }

    mesh.advance = pen as f32;
    mesh
}
