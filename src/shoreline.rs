//! Coastline extraction
//!
//! A coastline edge is a tessellation edge separating a land cell
//! (elevation >= 0) from a sea cell (elevation < 0).

use glam::DVec2;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::site::CrustField;
use crate::tessellation::Tessellation;

/// A boundary edge between a land cell and a sea cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoastlineEdge {
    /// Segment endpoints
    pub endpoints: [DVec2; 2],
    /// Index of the land site
    pub land: usize,
    /// Index of the sea site
    pub sea: usize,
}

impl CoastlineEdge {
    /// Euclidean length of the edge
    #[inline]
    pub fn length(&self) -> f64 {
        self.endpoints[0].distance(self.endpoints[1])
    }
}

/// Lazy sequence of coastline edges over one tessellation snapshot
///
/// Holds its own tessellation, so it reflects the field as it was when
/// created. Call [`enumerate_shoreline`] again after mutating the field.
pub struct Shoreline<'a> {
    field: &'a CrustField,
    tessellation: Tessellation,
    next_link: usize,
}

/// Start enumerating the coastline of `field` from a fresh tessellation
pub fn enumerate_shoreline(field: &CrustField) -> Shoreline<'_> {
    Shoreline::new(field, field.tessellate())
}

impl<'a> Shoreline<'a> {
    /// Enumerate `field` over a tessellation of its current positions
    pub(crate) fn new(field: &'a CrustField, tessellation: Tessellation) -> Self {
        Self {
            field,
            tessellation,
            next_link: 0,
        }
    }

    /// The tessellation the edges come from
    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    /// Consume the iterator, keeping the tessellation it was built on
    pub fn into_tessellation(self) -> Tessellation {
        self.tessellation
    }
}

impl Iterator for Shoreline<'_> {
    type Item = CoastlineEdge;

    fn next(&mut self) -> Option<CoastlineEdge> {
        let sites = self.field.sites();
        let links = self.tessellation.links();

        while let Some(link) = links.get(self.next_link) {
            self.next_link += 1;

            let (land, sea) = match (
                sites[link.source].is_land(),
                sites[link.target].is_land(),
            ) {
                (true, false) => (link.source, link.target),
                (false, true) => (link.target, link.source),
                _ => continue,
            };

            match self.tessellation.shared_edge(land, sea) {
                Some(edge) => {
                    return Some(CoastlineEdge {
                        endpoints: edge.endpoints,
                        land,
                        sea,
                    })
                }
                None => trace!(land, sea, "no shared edge for coastline link"),
            }
        }
        None
    }
}

/// Collect every coastline edge of `field`
pub fn coastline_edges(field: &CrustField) -> Vec<CoastlineEdge> {
    enumerate_shoreline(field).collect()
}
