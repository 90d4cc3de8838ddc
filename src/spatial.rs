//! Spatial indexing for fast point-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// Wrapper around KD-tree for nearest-site queries
///
/// The nearest site to a point is the site whose Voronoi cell contains it,
/// so this doubles as a cell lookup.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from site positions
    ///
    /// Returns `None` when there are no positions to index.
    ///
    /// # Example
    ///
    /// ```
    /// use continent_map::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![
    ///     DVec2::new(10.0, 10.0),
    ///     DVec2::new(90.0, 10.0),
    ///     DVec2::new(50.0, 90.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(80.0, 20.0)), 1);
    /// # }
    /// ```
    pub fn new(positions: &[DVec2]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }

        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Find the index of the site nearest to a position
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(0.0, 100.0),
            DVec2::new(100.0, 100.0),
        ];

        let index = SpatialIndex::new(&sites).unwrap();

        assert_eq!(index.find_nearest(DVec2::new(10.0, 5.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(95.0, 30.0)), 1);
        assert_eq!(index.find_nearest(DVec2::new(20.0, 70.0)), 2);
        assert_eq!(index.find_nearest(DVec2::new(60.0, 60.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![DVec2::new(12.5, 40.0), DVec2::new(80.0, 3.0)];
        let index = SpatialIndex::new(&sites).unwrap();

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }

    #[test]
    fn test_spatial_index_empty() {
        assert!(SpatialIndex::new(&[]).is_none());
    }
}
