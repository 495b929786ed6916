// this_file: crates/glyphmesh/src/mesh/bridge.rs

//! Cutting holes into their outer polygon.
//!
//! Each hole is joined to the outer polygon by a zero-width seam running from
//! the hole's rightmost corner to a vertex of the outer polygon that it can
//! see, which turns a polygon-with-holes into one simple polygon the ear
//! clipper can handle.

use kurbo::{Point, Vec2};

use super::{
    cast_ray_closed, coincident, cross, is_clockwise, point_in_closed_triangle, Contour, EPSILON,
};

/// Merge `holes` into `contours[root]`, in order.
///
/// Holes no ray from their rightmost corner can connect are left out.
pub fn bridge_holes(contours: &[Contour], root: usize, holes: &[usize]) -> Contour {
    let mut merged = contours[root].clone();
    for &hole in holes {
        if !bridge_one(&mut merged, &contours[hole]) {
            log::debug!("contour {hole}: no visible vertex in contour {root}, hole skipped");
        }
    }
    merged
}

fn bridge_one(merged: &mut Contour, hole: &Contour) -> bool {
    let Some((start, v)) = hole.rightmost_fixed_point() else {
        return false;
    };
    let Some(target) = find_bridge_point(&merged.fixed_points, v) else {
        return false;
    };
    let Some(at) = splice_index(&merged.fixed_points, target, v) else {
        return false;
    };

    let n = hole.fixed_points.len();
    let mut seam = Vec::with_capacity(n + 2);
    seam.extend((0..n).map(|k| hole.fixed_points[(start + k) % n]));
    seam.push(v);
    seam.push(target);

    merged.fixed_points.splice(at + 1..at + 1, seam);
    merged.curves.extend_from_slice(&hole.curves);
    true
}

/// Where along `points` to cut in a seam from `target` to `v`.
///
/// Once earlier holes are bridged the same vertex can occur several times;
/// the seam has to leave from the occurrence whose interior wedge faces `v`,
/// or it would cross the seams already there.
fn splice_index(points: &[Point], target: Point, v: Point) -> Option<usize> {
    let n = points.len();
    let clockwise = is_clockwise(points);
    let occurrences: Vec<usize> = (0..n).filter(|&i| coincident(points[i], target)).collect();
    occurrences
        .iter()
        .copied()
        .find(|&i| {
            let p = points[i];
            let to_prev = points[(i + n - 1) % n] - p;
            let to_next = points[(i + 1) % n] - p;
            in_sector(v - p, to_prev, to_next, clockwise)
        })
        .or_else(|| occurrences.first().copied())
}

/// Whether direction `d` points into the polygon interior at a corner with
/// edges towards `to_prev` and `to_next`.
fn in_sector(d: Vec2, to_prev: Vec2, to_next: Vec2, clockwise: bool) -> bool {
    // interior runs counter-clockwise from `from` to `to`
    let (from, to) = if clockwise {
        (to_prev, to_next)
    } else {
        (to_next, to_prev)
    };
    if cross(from, to) > EPSILON {
        cross(from, d) > EPSILON && cross(d, to) > EPSILON
    } else {
        !(cross(to, d) >= -EPSILON && cross(d, from) >= -EPSILON)
    }
}

/// The outer-polygon vertex the seam from `v` should run to.
///
/// Vertices lying exactly on the ray, or on the edge of the visibility
/// triangle, block the seam just like vertices strictly inside it.
pub fn find_bridge_point(outer: &[Point], v: Point) -> Option<Point> {
    let hit = cast_ray_closed(v, outer)
        .into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

    if (hit.p0 - hit.point).hypot() < EPSILON {
        return Some(hit.p0);
    }
    if (hit.p1 - hit.point).hypot() < EPSILON {
        return Some(hit.p1);
    }

    let candidate = if hit.p0.x > hit.p1.x { hit.p0 } else { hit.p1 };

    let clockwise = is_clockwise(outer);
    let n = outer.len();
    let occluder = (0..n)
        .filter(|&i| {
            let prev = outer[(i + n - 1) % n];
            let next = outer[(i + 1) % n];
            let turn = cross(outer[i] - prev, next - prev);
            if clockwise {
                turn > EPSILON
            } else {
                turn < -EPSILON
            }
        })
        .map(|i| outer[i])
        .filter(|&p| !coincident(p, v) && !coincident(p, candidate))
        .filter(|&p| point_in_closed_triangle(p, v, hit.point, candidate))
        .min_by(|&a, &b| {
            ray_angle(v, a)
                .total_cmp(&ray_angle(v, b))
                .then_with(|| (a - v).hypot2().total_cmp(&(b - v).hypot2()))
        });

    Some(occluder.unwrap_or(candidate))
}

/// Angle between `+x` and the direction from `v` to `p`.
fn ray_angle(v: Point, p: Point) -> f64 {
    let d: Vec2 = p - v;
    d.y.atan2(d.x).abs()
}
