//! ContinentMap main structure

use glam::DVec2;

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::generation::{generate_field, land_fraction};
use crate::shoreline::CoastlineEdge;
use crate::site::Site;
use crate::tessellation::Tessellation;

/// A generated continent map
///
/// Holds the final sites, their tessellation and the coastline, plus the
/// coastline as it looked at each refinement stage. All queries are
/// read-only; the map is plain data and can be shared across threads.
///
/// # Examples
///
/// ```
/// use continent_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .crusts(120)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let map = ContinentMap::generate(config).unwrap();
/// println!("Generated {} sites", map.site_count());
///
/// if let Some(site) = map.site(0) {
///     println!("Site 0 elevation: {}", site.elevation);
/// }
/// ```
#[derive(Clone)]
pub struct ContinentMap {
    /// Configuration used to generate this map
    config: MapConfig,

    /// Final sites, indexed like the tessellation cells
    sites: Vec<Site>,

    /// Tessellation of the final sites
    tessellation: Tessellation,

    /// Coastline snapshots, the last one being the final coastline
    coastline_history: Vec<Vec<CoastlineEdge>>,

    /// Fraction of the map area at or above sea level
    land_fraction: f64,
}

impl ContinentMap {
    /// Generate a map from `config`
    ///
    /// The same configuration always produces the identical map.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the configuration yields no sites.
    ///
    /// # Example
    ///
    /// ```
    /// use continent_map::*;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(12345)
    ///     .crusts(100)
    ///     .unwrap()
    ///     .continent_count(4)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let map = ContinentMap::generate(config).unwrap();
    /// assert!(map.site_count() > 100);
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        let generated = generate_field(&config)?;

        let tessellation = generated.field.tessellate();
        let land_fraction = land_fraction(&generated.field, &tessellation);

        Ok(Self {
            config,
            sites: generated.field.sites().to_vec(),
            tessellation,
            coastline_history: generated.coastline_history,
            land_fraction,
        })
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Number of sites, including those added by refinement
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get a site by index, `None` if out of range
    #[inline]
    pub fn site(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Get a site by index
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` if the index is out of range.
    pub fn try_site(&self, index: usize) -> Result<&Site> {
        self.sites.get(index).ok_or(MapError::SiteNotFound(index))
    }

    /// The tessellation of the final sites
    #[inline]
    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    /// Cell polygon of a site, empty if the index is invalid
    #[inline]
    pub fn polygon(&self, index: usize) -> &[DVec2] {
        self.tessellation.polygon(index)
    }

    /// Every cell polygon with its site's elevation
    ///
    /// This is what a renderer needs to draw the map.
    pub fn polygons(&self) -> impl Iterator<Item = (&[DVec2], f64)> + '_ {
        self.tessellation
            .polygons()
            .map(|(index, polygon)| (polygon, self.sites[index].elevation))
    }

    /// Sites whose cells share an edge with `index`
    ///
    /// Returns an empty vec if the index is invalid.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        self.tessellation.neighbors(index)
    }

    /// Find the site whose cell contains `point`
    ///
    /// Uses the KD-tree with the `spatial-index` feature.
    ///
    /// # Example
    ///
    /// ```
    /// # use continent_map::*;
    /// # let map = ContinentMap::generate(MapConfigBuilder::new().seed(1).crusts(60).unwrap().build().unwrap()).unwrap();
    /// let site = map.site_at(DVec2::new(800.0, 400.0)).unwrap();
    /// println!("Map center is in site {}", site);
    /// ```
    pub fn site_at(&self, point: DVec2) -> Option<usize> {
        self.tessellation.nearest_site(point)
    }

    /// Fraction of the map area covered by land cells
    #[inline]
    pub fn land_fraction(&self) -> f64 {
        self.land_fraction
    }

    /// Number of sites at or above sea level
    pub fn land_site_count(&self) -> usize {
        self.sites.iter().filter(|s| s.is_land()).count()
    }

    /// Final coastline
    pub fn coastline(&self) -> &[CoastlineEdge] {
        self.coastline_history
            .last()
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Coastline after the initial ratio adjustment, after the elevation-gap
    /// loop and after each coastline pass, in that order
    #[inline]
    pub fn coastline_history(&self) -> &[Vec<CoastlineEdge>] {
        &self.coastline_history
    }

    /// Total length of the final coastline
    pub fn coastline_length(&self) -> f64 {
        self.coastline().iter().map(CoastlineEdge::length).sum()
    }

    /// Lowest and highest elevation, `None` for an empty map
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        self.sites.iter().map(|s| s.elevation).fold(None, |range, e| {
            Some(match range {
                None => (e, e),
                Some((low, high)) => (low.min(e), high.max(e)),
            })
        })
    }
}
