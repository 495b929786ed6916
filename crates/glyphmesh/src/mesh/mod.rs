// this_file: crates/glyphmesh/src/mesh/mod.rs

//! Glyph outline to triangle mesh.
//!
//! The pipeline for one glyph:
//!
//! 1. [`contour`] closes each raw contour, inserts implied on-curve points and
//!    splits it into a straight-edged polygon plus quadratic curve triangles.
//! 2. [`hierarchy`] casts horizontal rays between contours to find which ones
//!    are holes of which outer contour.
//! 3. [`bridge`] cuts every hole into its parent polygon with a zero-width seam.
//! 4. [`triangulate`] ear-clips the resulting simple polygons.
//!
//! Contours live in a plain `Vec` arena and every relationship between them
//! is an index into it.
//!
//! Winding convention used throughout: a polygon is clockwise when its signed
//! shoelace area is negative; zero area counts as counter-clockwise (see
//! [`sign_non_zero`]).

use kurbo::{Point, Vec2};

use crate::glyph::GlyphVertex;
use crate::tables::glyf::RawOutline;

pub mod bridge;
pub mod contour;
pub mod hierarchy;
pub mod triangulate;

#[cfg(test)]
mod proptests;

pub use contour::{Contour, Triangle};
pub use hierarchy::Hierarchy;

/// Tolerance for orientation tests and coincident points.
pub const EPSILON: f64 = 1e-6;

/// Sign of `x`, with zero mapped to `+1`.
#[inline]
pub fn sign_non_zero(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x.signum()
    }
}

/// Twice the signed shoelace area of a closed polygon (positive when
/// counter-clockwise in a y-up space).
pub fn signed_area2(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// `-1` for clockwise polygons, `+1` otherwise.
#[inline]
pub fn winding_sign(points: &[Point]) -> f64 {
    sign_non_zero(signed_area2(points))
}

#[inline]
pub fn is_clockwise(points: &[Point]) -> bool {
    winding_sign(points) < 0.0
}

/// Z component of the cross product of two edge vectors.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Whether `p` lies strictly inside triangle `abc`, in either orientation.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    (d1 > EPSILON && d2 > EPSILON && d3 > EPSILON)
        || (d1 < -EPSILON && d2 < -EPSILON && d3 < -EPSILON)
}

/// Whether `p` lies inside triangle `abc` or on its boundary.
pub fn point_in_closed_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    (d1 >= -EPSILON && d2 >= -EPSILON && d3 >= -EPSILON)
        || (d1 <= EPSILON && d2 <= EPSILON && d3 <= EPSILON)
}

/// Whether `p` lies on the closed segment `ab`.
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    cross(b - a, p - a).abs() <= EPSILON
        && p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

#[inline]
pub fn coincident(a: Point, b: Point) -> bool {
    (a - b).hypot2() < EPSILON
}

/// One crossing of a rightward horizontal ray with a polygon edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Edge start.
    pub p0: Point,
    /// Edge end.
    pub p1: Point,
    /// Where the ray meets the edge.
    pub point: Point,
    /// Parameter of `point` along `p0 -> p1`.
    pub t: f64,
    /// Horizontal distance from the ray origin.
    pub distance: f64,
}

/// Cast a ray from `origin` towards `+x` through the closed polygon `points`.
///
/// An edge counts when `origin.y` lies in its half-open y-span `[min, max)`,
/// so a ray through a shared vertex is counted once. Horizontal edges never
/// count.
pub fn cast_ray(origin: Point, points: &[Point]) -> Vec<RayHit> {
    cast(origin, points, false)
}

/// Like [`cast_ray`], but an edge also counts when the ray passes through
/// its upper end, so a vertex on the ray is always reported.
pub fn cast_ray_closed(origin: Point, points: &[Point]) -> Vec<RayHit> {
    cast(origin, points, true)
}

fn cast(origin: Point, points: &[Point], closed: bool) -> Vec<RayHit> {
    let n = points.len();
    let mut hits = Vec::new();
    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        let dy = p1.y - p0.y;
        if dy.abs() < EPSILON {
            continue;
        }
        let (min, max) = (p0.y.min(p1.y), p0.y.max(p1.y));
        if origin.y < min || origin.y > max || (!closed && origin.y == max) {
            continue;
        }
        let t = (origin.y - p0.y) / dy;
        let x = p0.x + (p1.x - p0.x) * t;
        if x >= origin.x {
            hits.push(RayHit {
                p0,
                p1,
                point: Point::new(x, origin.y),
                t,
                distance: x - origin.x,
            });
        }
    }
    hits
}

/// Index and position of the first point with the largest x.
pub fn rightmost(points: &[Point]) -> Option<(usize, Point)> {
    points
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            Some((_, b)) if b.x >= p.x => best,
            _ => Some((i, p)),
        })
}

/// Triangles of one glyph, ready to upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
    /// Vertices left over per stalled polygon.
    pub stalled: Vec<usize>,
}

impl GlyphMesh {
    fn push_triangle(&mut self, corners: [GlyphVertex; 3]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(corners);
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Append a curve triangle, reordered clockwise, keeping the side of its input winding.
    fn push_curve(&mut self, triangle: &Triangle) {
        let mut corners = [triangle.a, triangle.b, triangle.c];
        let clockwise = is_clockwise(&corners);
        let side = if clockwise { 1 } else { -1 };
        if !clockwise {
            corners.reverse();
        }
        let uv = GlyphVertex::CURVE_TEXCOORDS;
        self.push_triangle([
            GlyphVertex::curve(corners[0], uv[0], side),
            GlyphVertex::curve(corners[1], uv[1], side),
            GlyphVertex::curve(corners[2], uv[2], side),
        ]);
    }

    fn push_solid(&mut self, corners: [Point; 3]) {
        self.push_triangle(corners.map(GlyphVertex::solid));
    }
}

/// Turn a decoded outline into curve and solid triangles.
pub fn tessellate(outline: &RawOutline, ear_clip_budget: usize) -> GlyphMesh {
    let contours: Vec<Contour> = outline
        .contours()
        .map(Contour::build)
        .filter(|contour| !contour.is_degenerate())
        .collect();

    let mut mesh = GlyphMesh::default();
    if contours.is_empty() {
        return mesh;
    }

    let hierarchy = hierarchy::classify(&contours);
    for (root, holes) in hierarchy.iter() {
        let merged = bridge::bridge_holes(&contours, root, holes);

        for triangle in &merged.curves {
            mesh.push_curve(triangle);
        }

        let clipped = triangulate::ear_clip(&merged.fixed_points, ear_clip_budget);
        for &corners in &clipped.triangles {
            mesh.push_solid(corners);
        }
        if clipped.stalled() {
            mesh.stalled.push(clipped.remaining);
        }
    }

    mesh
}
