// this_file: crates/glyphmesh/src/mesh/hierarchy.rs

//! Outer contour / hole classification by ray parity.

use kurbo::Point;

use super::{cast_ray, Contour, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Root,
    Hole(usize),
}

/// Root contours with their direct holes, as indices into the contour arena.
///
/// Roots keep the order in which they were classified; each hole list is
/// sorted by descending rightmost polygon x.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    entries: Vec<(usize, Vec<usize>)>,
}

impl Hierarchy {
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.entries
            .iter()
            .map(|(root, holes)| (*root, holes.as_slice()))
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(root, _)| *root)
    }

    pub fn holes_of(&self, root: usize) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|(r, _)| *r == root)
            .map(|(_, holes)| holes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every distinct ray crossing from `contours[index]` into another contour.
fn crossings(contours: &[Contour], index: usize) -> Vec<(usize, Point)> {
    let Some(origin) = contours[index].rightmost_outline_point() else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for (other, contour) in contours.iter().enumerate() {
        if other == index {
            continue;
        }
        let mut points: Vec<Point> = Vec::new();
        for hit in cast_ray(origin, &contour.outline_positions()) {
            if !points.contains(&hit.point) {
                points.push(hit.point);
            }
        }
        found.extend(points.into_iter().map(|p| (other, p)));
    }
    found
}

/// Classify contours into roots and holes.
pub fn classify(contours: &[Contour]) -> Hierarchy {
    let all_crossings: Vec<Vec<(usize, Point)>> =
        (0..contours.len()).map(|i| crossings(contours, i)).collect();

    let mut roles: Vec<Option<Role>> = vec![None; contours.len()];
    let mut order = Vec::with_capacity(contours.len());

    for (i, found) in all_crossings.iter().enumerate() {
        if found.is_empty() {
            roles[i] = Some(Role::Root);
            order.push(i);
        }
    }

    for (i, found) in all_crossings.iter().enumerate() {
        if roles[i].is_some() {
            continue;
        }

        let parent = match found.len() {
            1 => Some(found[0].0),
            n if n % 2 == 0 => None,
            _ => nearest_root(contours, i, found, &roles),
        };

        let role = match parent {
            Some(p) if roles[p] == Some(Role::Root) && contours[p].winding() != contours[i].winding() => {
                Role::Hole(p)
            },
            _ => Role::Root,
        };
        log::trace!("contour {i}: {} crossings -> {role:?}", found.len());
        roles[i] = Some(role);
        if role == Role::Root {
            order.push(i);
        }
    }

    let mut entries: Vec<(usize, Vec<usize>)> = order.into_iter().map(|r| (r, Vec::new())).collect();
    for (i, role) in roles.iter().enumerate() {
        if let Some(Role::Hole(parent)) = role {
            if let Some((_, holes)) = entries.iter_mut().find(|(r, _)| r == parent) {
                holes.push(i);
            }
        }
    }

    for (_, holes) in &mut entries {
        holes.sort_by(|&a, &b| {
            let ax = contours[a].rightmost_fixed_point().map_or(f64::MIN, |(_, p)| p.x);
            let bx = contours[b].rightmost_fixed_point().map_or(f64::MIN, |(_, p)| p.x);
            bx.total_cmp(&ax)
        });
    }

    Hierarchy { entries }
}

/// The closest crossed contour that is already a root.
fn nearest_root(
    contours: &[Contour],
    index: usize,
    found: &[(usize, Point)],
    roles: &[Option<Role>],
) -> Option<usize> {
    let origin = contours[index].rightmost_outline_point()?;
    found
        .iter()
        .filter(|(other, point)| {
            roles[*other] == Some(Role::Root) && (point.x - origin.x).abs() > EPSILON
        })
        .min_by(|a, b| a.1.x.total_cmp(&b.1.x))
        .map(|(other, _)| *other)
}
