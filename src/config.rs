//! Continent Map Configuration and Builder
//!
//! This module provides configuration types for deterministic continent map generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::geometry::Bounds;

/// Upper limit for either refinement loop's pass count
const MAX_REFINEMENT_PASSES: usize = 32;

/// Configuration for deterministic continent map generation
///
/// Every field is a generation-time constant. The same configuration will
/// always produce the identical map.
///
/// # Example
///
/// ```rust
/// use continent_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .crusts(200).unwrap()
///     .land_ratio(0.3).unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MapConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Random seed for deterministic generation
    pub seed: u32,

    /// Map width in map units
    pub width: f64,

    /// Map height in map units
    pub height: f64,

    /// Margin kept clear along the left and right edges
    ///
    /// Continent anchors stay `2 * border` away from the east/west edges,
    /// sea sites `border` away, and boundary padding sits exactly on it.
    pub border: f64,

    /// Number of sites seeded before refinement (land + sea)
    pub crusts: usize,

    /// Target fraction of the map area covered by land (0.0 - 1.0)
    pub land_ratio: f64,

    /// Number of continent anchors (3 or more)
    ///
    /// Surprisingly large counts still give coherent maps.
    pub continent_count: usize,

    /// Multiplier on the number of elevation relaxation rounds
    ///
    /// - 0.25: rugged, noisy terrain
    /// - 0.6: default
    /// - 1.5: very smooth, rounded continents
    pub smoothness: f64,

    /// Elevation difference above which a link is split in two
    pub elevation_gap_threshold: f64,

    /// Coastline edges longer than this get subdivided
    pub coastline_min_length: f64,

    /// Maximum number of elevation-gap refinement passes
    pub max_gap_passes: usize,

    /// Maximum number of coastline refinement passes
    pub max_coastline_passes: usize,

    /// Half-open range of initial land elevations
    pub land_elevation: (f64, f64),

    /// Half-open range of initial sea elevations
    pub sea_elevation: (f64, f64),

    /// Elevation given to the east/west boundary padding sites
    pub boundary_elevation: f64,

    /// Jitter scale of land sites, as a fraction of their anchor's size
    pub land_spread: f64,

    /// Anisotropic stretch applied to land jitter along x and y
    pub land_stretch: (f64, f64),
}

impl MapConfig {
    /// Map rectangle `[0, width] x [0, height]`
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Total map area
    #[inline]
    pub fn map_area(&self) -> f64 {
        self.width * self.height
    }

    /// Number of land sites clustered around the continent anchors
    pub fn land_site_count(&self) -> usize {
        (self.crusts as f64 * self.land_ratio).round() as usize
    }

    /// Number of uniformly scattered sea sites
    pub fn sea_site_count(&self) -> usize {
        (self.crusts as f64 * (1.0 - self.land_ratio)).round() as usize
    }

    /// Number of padding rows along each of the east/west edges
    pub fn boundary_rows(&self) -> usize {
        (self.crusts as f64).sqrt().ceil() as usize
    }

    /// Vertical spacing between boundary padding sites
    pub fn boundary_spacing(&self) -> f64 {
        self.height / (self.crusts as f64).sqrt()
    }

    /// Number of elevation relaxation rounds
    ///
    /// `sqrt(crusts) * land_ratio * smoothness`, rounded.
    pub fn relaxation_rounds(&self) -> usize {
        ((self.crusts as f64).sqrt() * self.land_ratio * self.smoothness).round() as usize
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        // Builder defaults always validate, so skip straight to the config
        let builder = MapConfigBuilder::new().seed(rand::random());
        let coastline_min_length = builder.border;
        builder.into_config(coastline_min_length)
    }
}

/// Builder for creating MapConfig with validation
///
/// # Example
///
/// ```rust
/// use continent_map::*;
///
/// // Use defaults
/// let config = MapConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .dimensions(800.0, 400.0)
///     .unwrap()
///     .continent_count(7)
///     .unwrap()
///     .smoothness(1.2)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.continent_count, 7);
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u32>,
    width: f64,
    height: f64,
    border: f64,
    crusts: usize,
    land_ratio: f64,
    continent_count: usize,
    smoothness: f64,
    elevation_gap_threshold: f64,
    coastline_min_length: Option<f64>,
    max_gap_passes: usize,
    max_coastline_passes: usize,
    land_elevation: (f64, f64),
    sea_elevation: (f64, f64),
    boundary_elevation: f64,
    land_spread: f64,
    land_stretch: (f64, f64),
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - dimensions: 1600 x 800, border 20
    /// - crusts: 400, land_ratio: 0.35, continent_count: 5, smoothness: 0.6
    /// - elevation_gap_threshold: 0.12, coastline_min_length: same as border
    /// - max_gap_passes: 4, max_coastline_passes: 10
    pub fn new() -> Self {
        Self {
            seed: None,
            width: 1600.0,
            height: 800.0,
            border: 20.0,
            crusts: 400,
            land_ratio: 0.35,
            continent_count: 5,
            smoothness: 0.6,
            elevation_gap_threshold: 0.12,
            coastline_min_length: None,
            max_gap_passes: 4,
            max_coastline_passes: 10,
            land_elevation: (0.5, 1.0),
            sea_elevation: (-1.0, -0.8),
            boundary_elevation: -1.0,
            land_spread: 0.4,
            land_stretch: (1.6, 0.8),
        }
    }

    /// Set the random seed for map generation
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is not a positive finite number
    pub fn dimensions(mut self, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "map dimensions must be positive (got {}x{})",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the east/west border margin
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the border is negative
    pub fn border(mut self, border: f64) -> Result<Self> {
        if !(border.is_finite() && border >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "border must be >= 0 (got {})",
                border
            )));
        }
        self.border = border;
        Ok(self)
    }

    /// Set the number of seeded sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if crusts is 0
    pub fn crusts(mut self, crusts: usize) -> Result<Self> {
        if crusts == 0 {
            return Err(MapError::InvalidConfig("crusts must be >= 1".to_string()));
        }
        self.crusts = crusts;
        Ok(self)
    }

    /// Set the target land fraction
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the ratio is outside `0.0..=1.0`
    pub fn land_ratio(mut self, ratio: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(MapError::InvalidConfig(format!(
                "land ratio must be within 0.0..=1.0 (got {})",
                ratio
            )));
        }
        self.land_ratio = ratio;
        Ok(self)
    }

    /// Set the number of continent anchors
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count < 3
    pub fn continent_count(mut self, count: usize) -> Result<Self> {
        if count < 3 {
            return Err(MapError::InvalidConfig(format!(
                "continent count must be >= 3 (got {})",
                count
            )));
        }
        self.continent_count = count;
        Ok(self)
    }

    /// Set the smoothness multiplier
    ///
    /// Practical values lie between 0.25 and 1.5.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if smoothness is negative
    pub fn smoothness(mut self, smoothness: f64) -> Result<Self> {
        if !(smoothness.is_finite() && smoothness >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "smoothness must be >= 0 (got {})",
                smoothness
            )));
        }
        self.smoothness = smoothness;
        Ok(self)
    }

    /// Set the elevation gap above which links are split
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold <= 0.0
    pub fn elevation_gap_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "elevation gap threshold must be positive (got {})",
                threshold
            )));
        }
        self.elevation_gap_threshold = threshold;
        Ok(self)
    }

    /// Set the coastline edge length above which edges are subdivided
    ///
    /// If not set, the border margin is used.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if length <= 0.0
    pub fn coastline_min_length(mut self, length: f64) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "coastline minimum length must be positive (got {})",
                length
            )));
        }
        self.coastline_min_length = Some(length);
        Ok(self)
    }

    /// Set the maximum number of elevation-gap refinement passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if passes > 32
    pub fn max_gap_passes(mut self, passes: usize) -> Result<Self> {
        if passes > MAX_REFINEMENT_PASSES {
            return Err(MapError::InvalidConfig(format!(
                "gap passes must be <= {} (got {})",
                MAX_REFINEMENT_PASSES, passes
            )));
        }
        self.max_gap_passes = passes;
        Ok(self)
    }

    /// Set the maximum number of coastline refinement passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if passes > 32
    pub fn max_coastline_passes(mut self, passes: usize) -> Result<Self> {
        if passes > MAX_REFINEMENT_PASSES {
            return Err(MapError::InvalidConfig(format!(
                "coastline passes must be <= {} (got {})",
                MAX_REFINEMENT_PASSES, passes
            )));
        }
        self.max_coastline_passes = passes;
        Ok(self)
    }

    /// Set the range initial land elevations are drawn from
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the range is empty
    pub fn land_elevation(mut self, low: f64, high: f64) -> Result<Self> {
        self.land_elevation = validate_range("land elevation", low, high)?;
        Ok(self)
    }

    /// Set the range initial sea elevations are drawn from
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the range is empty
    pub fn sea_elevation(mut self, low: f64, high: f64) -> Result<Self> {
        self.sea_elevation = validate_range("sea elevation", low, high)?;
        Ok(self)
    }

    /// Set the elevation of the east/west padding sites
    pub fn boundary_elevation(mut self, elevation: f64) -> Self {
        self.boundary_elevation = elevation;
        self
    }

    /// Set how far land sites spread around their anchor
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if spread <= 0.0
    pub fn land_spread(mut self, spread: f64) -> Result<Self> {
        if !(spread.is_finite() && spread > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "land spread must be positive (got {})",
                spread
            )));
        }
        self.land_spread = spread;
        Ok(self)
    }

    /// Set the anisotropic stretch of land jitter
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either factor <= 0.0
    pub fn land_stretch(mut self, x: f64, y: f64) -> Result<Self> {
        if !(x.is_finite() && x > 0.0 && y.is_finite() && y > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "land stretch must be positive (got {}, {})",
                x, y
            )));
        }
        self.land_stretch = (x, y);
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the border leaves no room for continents,
    /// or if the coastline length falls back to a zero border.
    pub fn build(self) -> Result<MapConfig> {
        if self.border * 4.0 >= self.width {
            return Err(MapError::InvalidConfig(format!(
                "border {} leaves no room for continents on a map {} wide",
                self.border, self.width
            )));
        }
        let coastline_min_length = self.coastline_min_length.unwrap_or(self.border);
        if coastline_min_length <= 0.0 {
            return Err(MapError::InvalidConfig(
                "coastline minimum length must be set explicitly when border is 0".to_string(),
            ));
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        Ok(MapConfigBuilder { seed: Some(seed), ..self }.into_config(coastline_min_length))
    }

    fn into_config(self, coastline_min_length: f64) -> MapConfig {
        MapConfig {
            seed: self.seed.unwrap_or_default(),
            width: self.width,
            height: self.height,
            border: self.border,
            crusts: self.crusts,
            land_ratio: self.land_ratio,
            continent_count: self.continent_count,
            smoothness: self.smoothness,
            elevation_gap_threshold: self.elevation_gap_threshold,
            coastline_min_length,
            max_gap_passes: self.max_gap_passes,
            max_coastline_passes: self.max_coastline_passes,
            land_elevation: self.land_elevation,
            sea_elevation: self.sea_elevation,
            boundary_elevation: self.boundary_elevation,
            land_spread: self.land_spread,
            land_stretch: self.land_stretch,
        }
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_range(name: &str, low: f64, high: f64) -> Result<(f64, f64)> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(MapError::InvalidConfig(format!(
            "{} range must satisfy low < high (got {}..{})",
            name, low, high
        )));
    }
    Ok((low, high))
}
