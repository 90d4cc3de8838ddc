//! Voronoi-based continent map generation
//!
//! Generates a flat world map as a Voronoi tessellation of sites carrying
//! elevations: continents are seeded, elevation is diffused between
//! neighboring cells, sea level is chosen to hit a target land ratio, and
//! the mesh is refined along steep slopes and long coastlines.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use continent_map::*;
//!
//! // Generate a map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .crusts(400).unwrap()
//!     .land_ratio(0.35).unwrap()
//!     .build().unwrap();
//!
//! let map = ContinentMap::generate(config).unwrap();
//! println!("{:.1}% land", map.land_fraction() * 100.0);
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&map, &BandedColorMapper);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-site lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, sites and coastline edges

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod tessellation;
pub mod site;
pub mod generation;
pub mod shoreline;
pub mod map;
pub mod mesh;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{MapError, Result};
pub use config::{MapConfig, MapConfigBuilder};
pub use geometry::Bounds;
pub use tessellation::{tessellate, AdjacencyLink, Edge, Tessellation};
pub use site::{CrustField, Site, SiteOrigin};
pub use shoreline::{coastline_edges, enumerate_shoreline, CoastlineEdge, Shoreline};
pub use map::ContinentMap;
pub use mesh::{generate_mesh, BandedColorMapper, ColorMapper, GradientColorMapper, MeshData, TerrainColor};
pub use generation::{ContinentAnchor, RefinementSummary};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
