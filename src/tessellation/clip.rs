//! Half-plane clipping of convex cells
//!
//! A Voronoi cell is the map rectangle intersected with one half-plane per
//! other site. Each vertex carries the label of the edge leaving it, so the
//! finished polygon already knows which neighbor sits across every edge.

use glam::DVec2;

use crate::geometry::{Bounds, EPSILON};

/// A cell vertex plus the site across the edge that starts at it
///
/// `neighbor` is `None` for edges lying on the map border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LabeledVertex {
    pub point: DVec2,
    pub neighbor: Option<usize>,
}

/// The map rectangle as an unlabeled starting cell
pub(crate) fn bounds_cell(bounds: &Bounds) -> Vec<LabeledVertex> {
    bounds
        .corners()
        .iter()
        .map(|&point| LabeledVertex {
            point,
            neighbor: None,
        })
        .collect()
}

/// Keep the part of `cell` closer to `site` than to `other`
///
/// Edges created along the bisector are labeled with `other_index`.
pub(crate) fn clip_to_bisector(
    cell: &[LabeledVertex],
    site: DVec2,
    other: DVec2,
    other_index: usize,
) -> Vec<LabeledVertex> {
    let normal = (other - site).normalize_or_zero();
    if normal == DVec2::ZERO || cell.is_empty() {
        return cell.to_vec();
    }
    let midpoint = (site + other) * 0.5;
    let distance = |p: DVec2| (p - midpoint).dot(normal);

    let mut clipped = Vec::with_capacity(cell.len() + 1);
    for (k, current) in cell.iter().enumerate() {
        let next = cell[(k + 1) % cell.len()];
        let d_current = distance(current.point);
        let d_next = distance(next.point);
        let current_inside = d_current <= EPSILON;
        let next_inside = d_next <= EPSILON;

        match (current_inside, next_inside) {
            (true, true) => clipped.push(*current),
            (true, false) => {
                clipped.push(*current);
                clipped.push(LabeledVertex {
                    point: intersect(current.point, next.point, d_current, d_next),
                    neighbor: Some(other_index),
                });
            }
            (false, true) => clipped.push(LabeledVertex {
                point: intersect(current.point, next.point, d_current, d_next),
                neighbor: current.neighbor,
            }),
            (false, false) => {}
        }
    }
    clipped
}

/// Remove vertices that start a zero-length edge
///
/// Cells left with fewer than three vertices collapse to empty.
pub(crate) fn drop_short_edges(cell: Vec<LabeledVertex>) -> Vec<LabeledVertex> {
    let n = cell.len();
    let kept: Vec<LabeledVertex> = cell
        .iter()
        .enumerate()
        .filter(|(k, v)| v.point.distance(cell[(k + 1) % n].point) > EPSILON)
        .map(|(_, v)| *v)
        .collect();

    if kept.len() < 3 {
        Vec::new()
    } else {
        kept
    }
}

fn intersect(a: DVec2, b: DVec2, d_a: f64, d_b: f64) -> DVec2 {
    let denominator = d_a - d_b;
    if denominator.abs() < f64::MIN_POSITIVE {
        return a;
    }
    let t = (d_a / denominator).clamp(0.0, 1.0);
    a + (b - a) * t
}
