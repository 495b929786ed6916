// this_file: crates/glyphmesh/src/mesh/proptests.rs

use super::triangulate::ear_clip;
use super::*;
use crate::tables::glyf::OutlinePoint;
use proptest::prelude::*;

fn polygon() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1000i16..1000, -1000i16..1000), 3..24)
        .prop_map(|pts| pts.into_iter().map(|(x, y)| Point::new(x as f64, y as f64)).collect())
}

/// Regular polygon, strictly convex for every generated size.
fn convex_polygon() -> impl Strategy<Value = Vec<Point>> {
    (3usize..40, 10.0f64..1000.0, any::<bool>()).prop_map(|(n, radius, reverse)| {
        let mut pts: Vec<Point> = (0..n)
            .map(|k| {
                let angle = std::f64::consts::TAU * k as f64 / n as f64;
                Point::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        if reverse {
            pts.reverse();
        }
        pts
    })
}

// Property: winding does not depend on which vertex the polygon starts at
proptest! {
    #[test]
    fn prop_winding_ignores_start_vertex(pts in polygon(), shift in 0usize..24) {
        let mut rotated = pts.clone();
        let len = rotated.len();
        rotated.rotate_left(shift % len);
        prop_assert_eq!(winding_sign(&pts), winding_sign(&rotated));
    }
}

// Property: reversing a polygon with non-zero area flips its winding
proptest! {
    #[test]
    fn prop_reversal_flips_winding(pts in polygon()) {
        prop_assume!(signed_area2(&pts) != 0.0);
        let mut reversed = pts.clone();
        reversed.reverse();
        prop_assert_eq!(is_clockwise(&pts), !is_clockwise(&reversed));
    }
}

// Property: a convex polygon with n corners clips into exactly n - 2 triangles
proptest! {
    #[test]
    fn prop_convex_polygon_fully_triangulated(pts in convex_polygon()) {
        let result = ear_clip(&pts, 100);
        prop_assert_eq!(result.triangles.len(), pts.len() - 2);
        prop_assert!(!result.stalled());

        let covered: f64 = result.triangles.iter().map(|t| signed_area2(t).abs()).sum();
        let expected = signed_area2(&pts).abs();
        prop_assert!((covered - expected).abs() <= expected * 1e-9);
    }
}

// Property: ear clipping always terminates and never invents vertices
proptest! {
    #[test]
    fn prop_ear_clip_uses_input_vertices(pts in polygon()) {
        let result = ear_clip(&pts, 100);
        prop_assert!(result.triangles.len() <= pts.len() - 2);
        for tri in &result.triangles {
            for corner in tri {
                prop_assert!(pts.contains(corner));
            }
        }
    }
}

// Property: every mesh index refers to a vertex and triangles are complete
proptest! {
    #[test]
    fn prop_rectangle_mesh_indices_valid(x0 in -500i16..0, y0 in -500i16..0, w in 1i16..500, h in 1i16..500) {
        let (x0, y0, x1, y1) = (x0 as f64, y0 as f64, (x0 + w) as f64, (y0 + h) as f64);
        let outline = RawOutline {
            points: vec![
                OutlinePoint::new(x0, y0, true),
                OutlinePoint::new(x0, y1, true),
                OutlinePoint::new(x1, y1, true),
                OutlinePoint::new(x1, y0, true),
            ],
            contour_ends: vec![3],
        };
        let mesh = tessellate(&outline, 100);
        prop_assert_eq!(mesh.indices.len(), 6);
        prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}

fn outline(contours: &[Vec<(f64, f64, bool)>]) -> RawOutline {
    let mut points = Vec::new();
    let mut contour_ends = Vec::new();
    for contour in contours {
        points.extend(contour.iter().map(|&(x, y, on)| OutlinePoint::new(x, y, on)));
        contour_ends.push(points.len() - 1);
    }
    RawOutline {
        points,
        contour_ends,
    }
}

/// Total area of the mesh triangles with the given curve flag.
fn area_of(mesh: &GlyphMesh, curve: i16) -> f64 {
    mesh.indices
        .chunks_exact(3)
        .map(|tri| tri.iter().map(|&i| mesh.vertices[i as usize]).collect::<Vec<_>>())
        .filter(|corners| corners[0].curve == curve)
        .map(|corners| signed_area2(&corners.iter().map(|v| v.point()).collect::<Vec<_>>()).abs() / 2.0)
        .sum()
}

/// Grid of 40-unit cells, each optionally carrying a rectangular counter.
fn holed_grid() -> impl Strategy<Value = (usize, usize, Vec<Option<(u8, u8, u8, u8)>>)> {
    (
        1usize..=3,
        1usize..=3,
        prop::collection::vec(prop::option::of((0u8..3, 0u8..3, 0u8..3, 0u8..3)), 9),
    )
}

// Property: solid triangles cover the outer box minus every counter, all clockwise
proptest! {
    #[test]
    fn prop_counters_are_cut_out_exactly((cols, rows, cells) in holed_grid()) {
        const CELL: f64 = 40.0;
        let (width, height) = (cols as f64 * CELL, rows as f64 * CELL);
        let mut contours = vec![vec![
            (0.0, 0.0, true),
            (0.0, height, true),
            (width, height, true),
            (width, 0.0, true),
        ]];
        let mut expected = width * height;
        for (k, cell) in cells.iter().take(cols * rows).enumerate() {
            let Some((a, b, c, d)) = *cell else { continue };
            let (cx, cy) = ((k % cols) as f64 * CELL, (k / cols) as f64 * CELL);
            let (x0, y0) = (cx + 5.0 + 5.0 * a as f64, cy + 5.0 + 5.0 * b as f64);
            let (x1, y1) = (cx + 25.0 + 5.0 * c as f64, cy + 25.0 + 5.0 * d as f64);
            contours.push(vec![(x1, y0, true), (x1, y1, true), (x0, y1, true), (x0, y0, true)]);
            expected -= (x1 - x0) * (y1 - y0);
        }

        let mesh = tessellate(&outline(&contours), 100);
        prop_assert!(mesh.stalled.is_empty(), "stalled: {:?}", mesh.stalled);
        let solid = area_of(&mesh, GlyphVertex::SOLID);
        prop_assert!((solid - expected).abs() < 1e-6, "solid {} != {}", solid, expected);
        for tri in mesh.indices.chunks_exact(3) {
            let corners: Vec<Point> = tri.iter().map(|&i| mesh.vertices[i as usize].point()).collect();
            prop_assert!(signed_area2(&corners) <= EPSILON, "{:?} is wound backwards", corners);
        }
    }
}

/// Clockwise box whose four edges bow through one control point each.
fn bowed_box() -> impl Strategy<Value = Vec<(f64, f64, bool)>> {
    let bow = (any::<bool>(), 1i32..10).prop_map(|(out, k)| if out { k } else { -k });
    (2i32..=50, 2i32..=50, [bow.clone(), bow.clone(), bow.clone(), bow]).prop_map(|(w, h, k)| {
        let (w, h) = (w * 10, h * 10);
        let d = [k[0] * w / 20, k[1] * h / 20, k[2] * w / 20, k[3] * h / 20].map(f64::from);
        let (w, h) = (f64::from(w), f64::from(h));
        vec![
            (0.0, 0.0, true),
            (-d[0], h / 2.0, false),
            (0.0, h, true),
            (w / 2.0, h + d[1], false),
            (w, h, true),
            (w + d[2], h / 2.0, false),
            (w, 0.0, true),
            (w / 2.0, -d[3], false),
        ]
    })
}

fn sides(mesh: &GlyphMesh) -> (usize, usize) {
    let curve_sides = mesh
        .vertices
        .iter()
        .step_by(3)
        .filter(|v| v.curve == GlyphVertex::CURVE)
        .map(|v| v.side);
    curve_sides.fold((0, 0), |(pos, neg), side| if side > 0 { (pos + 1, neg) } else { (pos, neg + 1) })
}

// Property: reversing a curved contour moves every control point across the
// fill boundary, so the solid area grows by exactly the curve wedges
proptest! {
    #[test]
    fn prop_reversed_contour_trades_wedges_for_solid(contour in bowed_box()) {
        let mut reversed = contour.clone();
        reversed.reverse();

        let forward = tessellate(&outline(&[contour]), 100);
        let backward = tessellate(&outline(&[reversed]), 100);
        prop_assert!(forward.stalled.is_empty());
        prop_assert!(backward.stalled.is_empty());

        let wedges = area_of(&forward, GlyphVertex::CURVE);
        prop_assert!((area_of(&backward, GlyphVertex::CURVE) - wedges).abs() < 1e-6);
        let grown = area_of(&backward, GlyphVertex::SOLID) - area_of(&forward, GlyphVertex::SOLID);
        prop_assert!((grown - wedges).abs() < 1e-6, "grew {} for wedges {}", grown, wedges);

        let (pos, neg) = sides(&forward);
        prop_assert_eq!(sides(&backward), (neg, pos));
    }
}
