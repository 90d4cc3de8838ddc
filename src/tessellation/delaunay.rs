//! Delaunay adjacency via spade
//!
//! Two Voronoi cells can only share an edge when their sites are joined in
//! the Delaunay triangulation, so each cell only needs clipping against its
//! Delaunay neighbors.

use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::warn;

/// Clipping candidates for every site
pub(crate) struct Candidates {
    /// Lowest site index at the same position, `owner[i] == i` for unique sites
    pub owner: Vec<usize>,
    /// Sites to clip against, empty for duplicates
    pub neighbors: Vec<Vec<usize>>,
}

impl Candidates {
    /// Delaunay neighbors, or every other site if spade rejects a coordinate
    pub(crate) fn new(points: &[DVec2]) -> Self {
        delaunay_neighbors(points).unwrap_or_else(|| Self::all_pairs(points.len()))
    }

    pub(crate) fn all_pairs(count: usize) -> Self {
        Self {
            owner: (0..count).collect(),
            neighbors: (0..count)
                .map(|site| (0..count).filter(|&other| other != site).collect())
                .collect(),
        }
    }
}

/// Triangulate `points` and read each site's neighbors off the undirected edges
fn delaunay_neighbors(points: &[DVec2]) -> Option<Candidates> {
    let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
    // spade merges coincident points into one vertex; the first site inserted owns it
    let mut vertex_owner: Vec<Option<usize>> = Vec::with_capacity(points.len());
    let mut owner = Vec::with_capacity(points.len());

    for (site, point) in points.iter().enumerate() {
        let handle = match triangulation.insert(Point2::new(point.x, point.y)) {
            Ok(handle) => handle,
            Err(error) => {
                warn!(site, ?error, "triangulation rejected site, clipping against all sites");
                return None;
            }
        };

        let vertex = handle.index();
        if vertex >= vertex_owner.len() {
            vertex_owner.resize(vertex + 1, None);
        }
        owner.push(*vertex_owner[vertex].get_or_insert(site));
    }

    let mut neighbors = vec![Vec::new(); points.len()];
    for edge in triangulation.undirected_edges() {
        let [a, b] = edge.vertices().map(|v| vertex_owner.get(v.fix().index()).copied().flatten());
        if let (Some(a), Some(b)) = (a, b) {
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
    }

    Some(Candidates { owner, neighbors })
}
