//! Planar Voronoi tessellation clipped to the map rectangle
//!
//! Neighbor candidates come from a spade Delaunay triangulation. Each cell
//! is then built by clipping the map rectangle against the bisector of the
//! site and each of its Delaunay neighbors, nearest first.
//!
//! A tessellation is a snapshot: it must be rebuilt after any site moves or
//! is added.

mod clip;
mod delaunay;

use std::collections::HashMap;

use glam::DVec2;

use crate::geometry::{polygon_area, Bounds, EPSILON};
#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

use clip::{bounds_cell, clip_to_bisector, drop_short_edges, LabeledVertex};
use delaunay::Candidates;

/// One boundary segment of the tessellation
///
/// Shared edges separate two cells; border edges lie on the map rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Site whose cell first produced this edge
    pub left: usize,
    /// Site on the other side, `None` for the map border
    pub right: Option<usize>,
    /// Segment endpoints, in the winding order of the `left` cell
    pub endpoints: [DVec2; 2],
}

impl Edge {
    /// Euclidean length of the segment
    #[inline]
    pub fn length(&self) -> f64 {
        self.endpoints[0].distance(self.endpoints[1])
    }

    #[inline]
    pub fn is_border(&self) -> bool {
        self.right.is_none()
    }

    /// The site across this edge from `site`
    pub fn other(&self, site: usize) -> Option<usize> {
        match self.right {
            Some(right) if site == self.left => Some(right),
            Some(_) if Some(site) == self.right => Some(self.left),
            _ => None,
        }
    }
}

/// The Voronoi cell of a single site
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Index of the owning site
    pub site: usize,
    /// Boundary loop, empty for degenerate (duplicate) sites
    pub polygon: Vec<DVec2>,
    /// Indices into the tessellation's edge list, one per polygon edge
    pub halfedges: Vec<usize>,
}

/// Two sites whose cells share a boundary edge
///
/// `source` is always the lower site index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyLink {
    pub source: usize,
    pub target: usize,
    /// Index of the shared edge
    pub edge: usize,
}

/// Voronoi tessellation of a set of sites over the map rectangle
#[derive(Clone)]
pub struct Tessellation {
    bounds: Bounds,
    sites: Vec<DVec2>,
    cells: Vec<Cell>,
    edges: Vec<Edge>,
    links: Vec<AdjacencyLink>,

    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

/// Tessellate `points` over `bounds`
///
/// Never fails: collinear points produce strips, and when two sites
/// coincide the lower index keeps the cell while the other gets an empty
/// polygon.
///
/// # Example
///
/// ```
/// use continent_map::*;
/// use glam::DVec2;
///
/// let sites = [DVec2::new(25.0, 50.0), DVec2::new(75.0, 50.0)];
/// let tessellation = tessellate(&sites, Bounds::new(100.0, 100.0));
///
/// assert_eq!(tessellation.links().len(), 1);
/// assert!((tessellation.area(0) - 5000.0).abs() < 1e-9);
/// ```
pub fn tessellate(points: &[DVec2], bounds: Bounds) -> Tessellation {
    let candidates = Candidates::new(points);
    let labeled: Vec<Vec<LabeledVertex>> = (0..points.len())
        .map(|site| build_cell(site, points, &candidates, &bounds))
        .collect();

    let mut edges: Vec<Edge> = Vec::new();
    let mut shared: HashMap<(usize, usize), usize> = HashMap::new();
    let mut cells = Vec::with_capacity(points.len());

    for (site, cell) in labeled.iter().enumerate() {
        let mut halfedges = Vec::with_capacity(cell.len());

        for (k, vertex) in cell.iter().enumerate() {
            let endpoints = [vertex.point, cell[(k + 1) % cell.len()].point];
            let id = match vertex.neighbor {
                Some(other) => {
                    let key = (site.min(other), site.max(other));
                    *shared.entry(key).or_insert_with(|| {
                        edges.push(Edge {
                            left: site,
                            right: Some(other),
                            endpoints,
                        });
                        edges.len() - 1
                    })
                }
                None => {
                    edges.push(Edge {
                        left: site,
                        right: None,
                        endpoints,
                    });
                    edges.len() - 1
                }
            };
            halfedges.push(id);
        }

        cells.push(Cell {
            site,
            polygon: cell.iter().map(|v| v.point).collect(),
            halfedges,
        });
    }

    let links = edges
        .iter()
        .enumerate()
        .filter_map(|(id, edge)| {
            edge.right.map(|right| AdjacencyLink {
                source: edge.left.min(right),
                target: edge.left.max(right),
                edge: id,
            })
        })
        .collect();

    Tessellation {
        bounds,
        sites: points.to_vec(),
        cells,
        edges,
        links,
        #[cfg(feature = "spatial-index")]
        spatial_index: SpatialIndex::new(points),
    }
}

/// Clip the map rectangle down to the cell of `site`
fn build_cell(
    site: usize,
    points: &[DVec2],
    candidates: &Candidates,
    bounds: &Bounds,
) -> Vec<LabeledVertex> {
    if candidates.owner[site] != site {
        return Vec::new();
    }
    let origin = points[site];

    let mut others: Vec<(f64, usize)> = candidates.neighbors[site]
        .iter()
        .map(|&other| (origin.distance_squared(points[other]), other))
        .collect();
    others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut cell = bounds_cell(bounds);
    for (distance_squared, other) in others {
        // Near-coincident sites spade kept apart
        if distance_squared < EPSILON * EPSILON {
            if other < site {
                return Vec::new();
            }
            continue;
        }

        cell = clip_to_bisector(&cell, origin, points[other], other);
        if cell.is_empty() {
            break;
        }
    }

    drop_short_edges(cell)
}

impl Tessellation {
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of sites (and cells)
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Site positions this tessellation was built from
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, site: usize) -> Option<&Cell> {
        self.cells.get(site)
    }

    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Polygon of a site's cell, empty if the index is invalid
    pub fn polygon(&self, site: usize) -> &[DVec2] {
        self.cells
            .get(site)
            .map(|c| c.polygon.as_slice())
            .unwrap_or(&[])
    }

    /// Every cell polygon paired with its site index
    pub fn polygons(&self) -> impl Iterator<Item = (usize, &[DVec2])> + '_ {
        self.cells.iter().map(|c| (c.site, c.polygon.as_slice()))
    }

    /// Unsigned area of a site's cell
    pub fn area(&self, site: usize) -> f64 {
        polygon_area(self.polygon(site))
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: usize) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Adjacency links in edge creation order
    #[inline]
    pub fn links(&self) -> &[AdjacencyLink] {
        &self.links
    }

    /// The boundary edge shared by the cells of `a` and `b`
    ///
    /// Found by intersecting the two cells' half-edge sets.
    pub fn shared_edge(&self, a: usize, b: usize) -> Option<&Edge> {
        let (cell_a, cell_b) = (self.cells.get(a)?, self.cells.get(b)?);
        cell_a
            .halfedges
            .iter()
            .find(|id| cell_b.halfedges.contains(id))
            .and_then(|&id| self.edges.get(id))
    }

    /// Sites whose cells share an edge with `site`
    pub fn neighbors(&self, site: usize) -> Vec<usize> {
        let Some(cell) = self.cells.get(site) else {
            return Vec::new();
        };
        let mut neighbors: Vec<usize> = cell
            .halfedges
            .iter()
            .filter_map(|&id| self.edges[id].other(site))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Site whose cell contains `point`
    ///
    /// Uses the KD-tree with the `spatial-index` feature, a linear scan
    /// otherwise. Returns `None` for an empty tessellation.
    pub fn nearest_site(&self, point: DVec2) -> Option<usize> {
        #[cfg(feature = "spatial-index")]
        {
            self.spatial_index.as_ref().map(|index| index.find_nearest(point))
        }

        #[cfg(not(feature = "spatial-index"))]
        {
            self.sites
                .iter()
                .enumerate()
                .min_by(|a, b| {
                    a.1.distance_squared(point)
                        .total_cmp(&b.1.distance_squared(point))
                })
                .map(|(site, _)| site)
        }
    }
}
