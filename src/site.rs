//! Sites and the growing field that owns them
//!
//! A site (also called a crust) is the atomic unit of the terrain mesh: a
//! point in the plane with an elevation. Negative elevations are below sea
//! level, zero is sea level, positive is land.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::tessellation::{tessellate, Tessellation};

/// Which pipeline stage created a site
///
/// Purely informational; the pipeline treats every site the same.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteOrigin {
    /// Clustered around a continent anchor
    Land,
    /// Scattered uniformly over the map
    Sea,
    /// Padding along the east/west edges
    Boundary,
    /// Inserted by adaptive refinement
    Refined,
}

/// A point of the terrain mesh with its elevation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    /// Position within the map bounds
    pub position: DVec2,
    /// Elevation relative to sea level
    pub elevation: f64,
    /// Stage that created this site
    pub origin: SiteOrigin,
}

impl Site {
    pub fn new(position: DVec2, elevation: f64, origin: SiteOrigin) -> Self {
        Self {
            position,
            elevation,
            origin,
        }
    }

    /// Land is anything at or above sea level
    #[inline]
    pub fn is_land(&self) -> bool {
        self.elevation >= 0.0
    }

    #[inline]
    pub fn is_sea(&self) -> bool {
        !self.is_land()
    }
}

/// The ordered, growing collection of sites for one generation run
///
/// Every pipeline stage takes the field by `&mut` and mutates it in place.
/// Sites are appended but never removed, so indices stay stable for the
/// lifetime of the field. Positions are clamped to the bounds on insertion
/// and on every move.
#[derive(Debug, Clone, PartialEq)]
pub struct CrustField {
    bounds: Bounds,
    sites: Vec<Site>,
}

impl CrustField {
    /// Create an empty field over `bounds`
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            sites: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Mutable access for elevation updates
    ///
    /// Positions should be changed through [`CrustField::move_site`] so they
    /// stay clamped.
    #[inline]
    pub fn sites_mut(&mut self) -> &mut [Site] {
        &mut self.sites
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Append a site, clamping its position into the bounds
    ///
    /// Returns the index of the new site.
    pub fn push(&mut self, position: DVec2, elevation: f64, origin: SiteOrigin) -> usize {
        let position = self.bounds.clamp(position);
        self.sites.push(Site::new(position, elevation, origin));
        self.sites.len() - 1
    }

    /// Move an existing site, clamping the new position
    pub fn move_site(&mut self, index: usize, position: DVec2) {
        let position = self.bounds.clamp(position);
        if let Some(site) = self.sites.get_mut(index) {
            site.position = position;
        }
    }

    /// Shift every elevation by `-base`
    pub fn lower_elevations(&mut self, base: f64) {
        for site in &mut self.sites {
            site.elevation -= base;
        }
    }

    pub fn positions(&self) -> Vec<DVec2> {
        self.sites.iter().map(|s| s.position).collect()
    }

    /// Fresh tessellation of the current sites
    pub fn tessellate(&self) -> Tessellation {
        tessellate(&self.positions(), self.bounds)
    }

    /// Number of sites at or above sea level
    pub fn land_count(&self) -> usize {
        self.sites.iter().filter(|s| s.is_land()).count()
    }

    /// Number of sites created by a given stage
    pub fn count_origin(&self, origin: SiteOrigin) -> usize {
        self.sites.iter().filter(|s| s.origin == origin).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_and_sea() {
        assert!(Site::new(DVec2::ZERO, 0.0, SiteOrigin::Land).is_land());
        assert!(Site::new(DVec2::ZERO, 0.3, SiteOrigin::Refined).is_land());
        assert!(Site::new(DVec2::ZERO, -0.01, SiteOrigin::Sea).is_sea());
    }

    #[test]
    fn test_push_clamps() {
        let mut field = CrustField::new(Bounds::new(100.0, 50.0));
        let index = field.push(DVec2::new(-10.0, 80.0), 0.5, SiteOrigin::Land);

        assert_eq!(index, 0);
        assert_eq!(field.sites()[0].position, DVec2::new(0.0, 50.0));

        field.move_site(0, DVec2::new(140.0, 20.0));
        assert_eq!(field.sites()[0].position, DVec2::new(100.0, 20.0));

        // Out of range moves are ignored
        field.move_site(5, DVec2::ZERO);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_counts_and_shift() {
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        field.push(DVec2::new(10.0, 10.0), 0.8, SiteOrigin::Land);
        field.push(DVec2::new(50.0, 50.0), 0.2, SiteOrigin::Land);
        field.push(DVec2::new(90.0, 90.0), -0.9, SiteOrigin::Sea);

        assert_eq!(field.land_count(), 2);
        assert_eq!(field.count_origin(SiteOrigin::Land), 2);
        assert_eq!(field.count_origin(SiteOrigin::Boundary), 0);

        field.lower_elevations(0.5);
        assert_eq!(field.land_count(), 1);
        assert!((field.sites()[2].elevation + 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_tessellate_matches_sites() {
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        field.push(DVec2::new(25.0, 50.0), 1.0, SiteOrigin::Land);
        field.push(DVec2::new(75.0, 50.0), -1.0, SiteOrigin::Sea);

        let tessellation = field.tessellate();
        assert_eq!(tessellation.len(), field.len());
        assert_eq!(tessellation.links().len(), 1);
    }
}
