//! Continent anchors
//!
//! A handful of random anchors are tessellated once; each anchor is then
//! moved to the centroid of its cell and sized by the square root of the
//! cell area. Land sites later cluster inside these cells.

use glam::DVec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::geometry::{polygon_area, polygon_centroid, Bounds};
use crate::tessellation::tessellate;

/// A transient seed biasing where land sites cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentAnchor {
    /// Centroid of the anchor's cell
    pub position: DVec2,
    /// Square root of the cell area, used as spatial extent and sampling weight
    pub size: f64,
    /// The anchor's Voronoi cell
    pub polygon: Vec<DVec2>,
}

/// Place `count` anchors and derive their cells
///
/// Anchors are drawn uniformly with x in `[2 * border, width - 2 * border)`
/// and y over the full height. An anchor whose cell degenerates keeps its
/// drawn position with size 0, so it is never picked for land placement.
pub fn seed_continents<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bounds: Bounds,
    border: f64,
) -> Vec<ContinentAnchor> {
    let margin_width = (bounds.width - border * 4.0).max(0.0);
    let seeds: Vec<DVec2> = (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen::<f64>() * margin_width + border * 2.0,
                rng.gen::<f64>() * bounds.height,
            )
        })
        .collect();

    let tessellation = tessellate(&seeds, bounds);

    let anchors: Vec<ContinentAnchor> = tessellation
        .polygons()
        .map(|(index, polygon)| match polygon_centroid(polygon) {
            Some(centroid) => ContinentAnchor {
                position: centroid,
                size: polygon_area(polygon).sqrt(),
                polygon: polygon.to_vec(),
            },
            None => {
                warn!(anchor = index, "continent anchor has a degenerate cell");
                ContinentAnchor {
                    position: seeds[index],
                    size: 0.0,
                    polygon: polygon.to_vec(),
                }
            }
        })
        .collect();

    debug!(count = anchors.len(), "seeded continent anchors");
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_contains;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_anchor_cells_cover_map() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bounds = Bounds::new(1600.0, 800.0);
        let anchors = seed_continents(&mut rng, 5, bounds, 20.0);

        assert_eq!(anchors.len(), 5);

        let covered: f64 = anchors.iter().map(|a| a.size * a.size).sum();
        assert!((covered - bounds.area()).abs() < 1e-6 * bounds.area());

        for anchor in &anchors {
            assert!(anchor.size > 0.0);
            assert!(bounds.contains(anchor.position));
            assert!(polygon_contains(&anchor.polygon, anchor.position));
        }
    }

    #[test]
    fn test_many_continents() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let anchors = seed_continents(&mut rng, 40, Bounds::new(400.0, 200.0), 10.0);
        assert_eq!(anchors.len(), 40);
        assert!(anchors.iter().all(|a| a.size > 0.0));
    }

    #[test]
    fn test_collinear_anchors() {
        // A zero-width margin puts every anchor on x = 2 * border
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let bounds = Bounds::new(80.0, 60.0);
        let anchors = seed_continents(&mut rng, 3, bounds, 20.0);

        assert_eq!(anchors.len(), 3);
        let covered: f64 = anchors.iter().map(|a| a.size * a.size).sum();
        assert!((covered - bounds.area()).abs() < 1e-6);
        for anchor in &anchors {
            assert!(anchor.size > 0.0);
            assert!((anchor.position.x - 40.0).abs() < 1e-9);
        }
    }
}
