//! Initial site placement
//!
//! Three populations make up the starting field:
//! - land sites clustered around continent anchors, weighted by anchor size
//! - sea sites scattered uniformly
//! - boundary padding along the east/west edges, forcing those edges to ocean

use glam::DVec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::{debug, warn};

use super::continents::ContinentAnchor;
use super::jitter::sample_jitter;
use crate::config::MapConfig;
use crate::geometry::polygon_contains;
use crate::site::{CrustField, SiteOrigin};

/// Build the starting field from the continent anchors
pub fn build_crust_field<R: Rng + ?Sized>(
    rng: &mut R,
    anchors: &[ContinentAnchor],
    config: &MapConfig,
) -> CrustField {
    let mut field = CrustField::new(config.bounds());

    place_land_sites(rng, &mut field, anchors, config);
    place_sea_sites(rng, &mut field, config);
    place_boundary_sites(&mut field, config);

    debug!(
        land = field.count_origin(SiteOrigin::Land),
        sea = field.count_origin(SiteOrigin::Sea),
        boundary = field.count_origin(SiteOrigin::Boundary),
        "built crust field"
    );
    field
}

/// Cluster land sites inside the anchor cells
///
/// Anchors are picked with probability proportional to their size through a
/// cumulative weight table. The jittered offset is redrawn until it lands
/// inside the picked anchor's cell.
pub fn place_land_sites<R: Rng + ?Sized>(
    rng: &mut R,
    field: &mut CrustField,
    anchors: &[ContinentAnchor],
    config: &MapConfig,
) {
    let count = config.land_site_count();
    let weights = match WeightedIndex::new(anchors.iter().map(|a| a.size)) {
        Ok(weights) => weights,
        Err(err) => {
            warn!(%err, "no continent anchor can host land, scattering land sites uniformly");
            for _ in 0..count {
                let position = uniform_position(rng, config);
                let elevation = sample_range(rng, config.land_elevation);
                field.push(position, elevation, SiteOrigin::Land);
            }
            return;
        }
    };

    for _ in 0..count {
        let anchor = &anchors[weights.sample(rng)];
        let position = sample_inside(rng, anchor, config);
        let elevation = sample_range(rng, config.land_elevation);
        field.push(position, elevation, SiteOrigin::Land);
    }
}

/// Scatter sea sites over the map, keeping `border` clear on the east/west edges
pub fn place_sea_sites<R: Rng + ?Sized>(rng: &mut R, field: &mut CrustField, config: &MapConfig) {
    for _ in 0..config.sea_site_count() {
        let position = uniform_position(rng, config);
        let elevation = sample_range(rng, config.sea_elevation);
        field.push(position, elevation, SiteOrigin::Sea);
    }
}

/// Pad the east and west edges with deep-water sites
pub fn place_boundary_sites(field: &mut CrustField, config: &MapConfig) {
    let spacing = config.boundary_spacing();
    for row in 0..config.boundary_rows() {
        let y = row as f64 * spacing;
        field.push(
            DVec2::new(config.border, y),
            config.boundary_elevation,
            SiteOrigin::Boundary,
        );
        field.push(
            DVec2::new(config.width - config.border, y),
            config.boundary_elevation,
            SiteOrigin::Boundary,
        );
    }
}

fn sample_inside<R: Rng + ?Sized>(
    rng: &mut R,
    anchor: &ContinentAnchor,
    config: &MapConfig,
) -> DVec2 {
    let scale = anchor.size * config.land_spread;
    let (stretch_x, stretch_y) = config.land_stretch;

    // Terminates: the anchor sits at its cell centroid and the jitter is
    // centered on it, so each draw lands inside with non-vanishing probability
    loop {
        let offset = DVec2::new(
            sample_jitter(rng, scale * stretch_x),
            sample_jitter(rng, scale * stretch_y),
        );
        let candidate = anchor.position + offset;
        if polygon_contains(&anchor.polygon, candidate) {
            return candidate;
        }
    }
}

fn uniform_position<R: Rng + ?Sized>(rng: &mut R, config: &MapConfig) -> DVec2 {
    DVec2::new(
        rng.gen::<f64>() * (config.width - 2.0 * config.border) + config.border,
        rng.gen::<f64>() * config.height,
    )
}

fn sample_range<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    low + rng.gen::<f64>() * (high - low)
}
