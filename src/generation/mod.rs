//! Core map generation pipeline
//!
//! Seeds continents, places crust sites around them, diffuses elevation,
//! fixes the land/sea ratio and finally refines steep slopes and long
//! coastlines. Every stage mutates one [`CrustField`] in place.

pub mod continents;
pub mod crust;
pub mod jitter;
pub mod ratio;
pub mod refine;
pub mod relax;

pub use continents::{seed_continents, ContinentAnchor};
pub use crust::build_crust_field;
pub use jitter::sample_jitter;
pub use ratio::{adjust_ratio, crossover_elevation, land_fraction};
pub use refine::{
    indent_coastline, refine_coastline, refine_elevation_gaps, split_elevation_gaps,
    RefinementSummary,
};
pub use relax::{exchange, relax};

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span};

use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::shoreline::{coastline_edges, CoastlineEdge};
use crate::site::CrustField;

/// Output of one pipeline run, before the final tessellation
#[derive(Debug, Clone)]
pub struct GeneratedField {
    /// Final sites
    pub field: CrustField,
    /// Coastline after the first ratio adjustment, after the elevation-gap
    /// loop and after every coastline pass
    pub coastline_history: Vec<Vec<CoastlineEdge>>,
}

/// Run the full pipeline for `config`
///
/// The random stream is a `ChaCha8Rng` seeded from `config.seed`, so the
/// same configuration always yields the same field.
///
/// # Errors
///
/// Returns `GenerationFailed` if the configuration produces no sites at all,
/// which the builder's validation rules out.
pub fn generate_field(config: &MapConfig) -> Result<GeneratedField> {
    let _span = info_span!("generate_field", seed = config.seed).entered();
    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);

    let anchors = seed_continents(
        &mut rng,
        config.continent_count,
        config.bounds(),
        config.border,
    );
    let mut field = build_crust_field(&mut rng, &anchors, config);
    if field.is_empty() {
        return Err(MapError::GenerationFailed(
            "configuration produced no sites".to_string(),
        ));
    }

    relax(&mut field, config.relaxation_rounds());
    adjust_ratio(&mut field, config.land_ratio);

    let mut coastline_history = vec![coastline_edges(&field)];

    let gaps = refine_elevation_gaps(
        &mut field,
        config.elevation_gap_threshold,
        config.max_gap_passes,
        config.land_ratio,
    );
    debug!(passes = gaps.passes, inserted = gaps.inserted, "elevation gaps refined");
    coastline_history.push(coastline_edges(&field));

    let coast = refine_coastline(
        &mut field,
        config.coastline_min_length,
        config.max_coastline_passes,
        config.land_ratio,
        &mut coastline_history,
    );
    debug!(passes = coast.passes, inserted = coast.inserted, "coastline refined");

    info!(
        sites = field.len(),
        land_sites = field.land_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "generated crust field"
    );

    Ok(GeneratedField {
        field,
        coastline_history,
    })
}
