// this_file: crates/glyphmesh/src/mesh/contour.rs

//! Closing raw contours into polygons plus curve wedges.

use kurbo::Point;

use super::{cross, rightmost, winding_sign};
use crate::tables::glyf::OutlinePoint;

/// A quadratic wedge `a -> b -> c` where `b` is the control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }
}

/// One closed contour of a glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    /// Outline points with implied on-curve midpoints filled in.
    pub glyph_points: Vec<OutlinePoint>,
    /// Straight-edged polygon approximating the contour.
    pub fixed_points: Vec<Point>,
    /// Curve wedges, one per off-curve point.
    pub curves: Vec<Triangle>,
}

impl Contour {
    /// Build a contour from one raw point span.
    pub fn build(raw: &[OutlinePoint]) -> Self {
        let glyph_points = insert_implied_points(raw);
        let n = glyph_points.len();

        let mut fixed_points = Vec::with_capacity(n);
        let mut curves = Vec::new();
        for i in 0..n {
            let curr = glyph_points[i];
            if curr.on_curve {
                fixed_points.push(curr.pos);
                continue;
            }
            let prev = glyph_points[(i + n - 1) % n].pos;
            let next = glyph_points[(i + 1) % n].pos;
            if cross(curr.pos - prev, next - prev) > 0.0 {
                fixed_points.push(curr.pos);
            }
            curves.push(Triangle::new(prev, curr.pos, next));
        }

        Self {
            glyph_points,
            fixed_points,
            curves,
        }
    }

    /// Fewer than three polygon corners: nothing to fill.
    pub fn is_degenerate(&self) -> bool {
        self.fixed_points.len() < 3
    }

    pub fn outline_positions(&self) -> Vec<Point> {
        self.glyph_points.iter().map(|p| p.pos).collect()
    }

    /// `-1` when the outline runs clockwise, `+1` otherwise.
    pub fn winding(&self) -> f64 {
        winding_sign(&self.outline_positions())
    }

    /// First outline point with the largest x.
    pub fn rightmost_outline_point(&self) -> Option<Point> {
        rightmost(&self.outline_positions()).map(|(_, p)| p)
    }

    /// First polygon corner with the largest x, with its index.
    pub fn rightmost_fixed_point(&self) -> Option<(usize, Point)> {
        rightmost(&self.fixed_points)
    }
}

/// Insert an on-curve midpoint between every pair of consecutive off-curve
/// points, wrapping around the end of the contour.
fn insert_implied_points(raw: &[OutlinePoint]) -> Vec<OutlinePoint> {
    let n = raw.len();
    let mut points = Vec::with_capacity(n * 2);
    for i in 0..n {
        let curr = raw[i];
        let next = raw[(i + 1) % n];
        points.push(curr);
        if n > 1 && !curr.on_curve && !next.on_curve {
            points.push(OutlinePoint {
                pos: curr.pos.midpoint(next.pos),
                on_curve: true,
            });
        }
    }
    points
}
