// this_file: crates/glyphmesh/src/mesh/triangulate.rs

//! Ear clipping.

use kurbo::Point;

use super::{
    coincident, cross, is_clockwise, point_in_triangle, point_on_segment, signed_area2, EPSILON,
};

/// Result of clipping one polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarClip {
    pub triangles: Vec<[Point; 3]>,
    /// Vertices left when clipping stopped; more than three means the
    /// attempt budget ran out. A leftover with no area reports zero.
    pub remaining: usize,
}

impl EarClip {
    pub fn stalled(&self) -> bool {
        self.remaining > 3
    }
}

/// Triangulate a simple polygon, giving up after `budget * len` attempts.
pub fn ear_clip(polygon: &[Point], budget: usize) -> EarClip {
    let mut points = polygon.to_vec();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));
    if points.len() < 3 {
        return EarClip {
            triangles,
            remaining: points.len(),
        };
    }

    let max_attempts = budget.saturating_mul(points.len());
    let mut clockwise = is_clockwise(&points);
    let mut cursor = 0;
    let mut attempts = 0;

    while points.len() > 3 && attempts < max_attempts {
        attempts += 1;
        let n = points.len();
        let prev = points[(cursor + n - 1) % n];
        let curr = points[cursor];
        let next = points[(cursor + 1) % n];

        if is_ear(&points, prev, curr, next, clockwise) {
            triangles.push([prev, curr, next]);
            points.remove(cursor);
            clockwise = is_clockwise(&points);
            cursor = (cursor + points.len() - 1) % points.len();
        } else {
            cursor = (cursor + 1) % n;
        }
    }

    let mut remaining = points.len();
    if remaining == 3 {
        triangles.push([points[0], points[1], points[2]]);
    } else if signed_area2(&points).abs() <= EPSILON {
        log::trace!("ear clipping left {remaining} vertices enclosing no area");
        remaining = 0;
    } else {
        log::trace!("ear clipping stopped after {attempts} attempts with {remaining} vertices");
    }

    EarClip {
        triangles,
        remaining,
    }
}

fn is_ear(points: &[Point], prev: Point, curr: Point, next: Point, clockwise: bool) -> bool {
    let turn = cross(curr - prev, next - prev);
    let convex = if clockwise {
        turn < -EPSILON
    } else {
        turn > EPSILON
    };
    if !convex {
        return false;
    }

    // a vertex on the cut would leave the rest of the polygon touching itself
    !points.iter().any(|&p| {
        !coincident(p, prev)
            && !coincident(p, curr)
            && !coincident(p, next)
            && (point_in_triangle(p, prev, curr, next) || point_on_segment(p, prev, next))
    })
}
