//! Adaptive mesh refinement
//!
//! Two independent loops add detail where the terrain needs it:
//! - elevation-gap splitting inserts a midpoint site on links whose
//!   elevation jump is too steep
//! - coastline indentation subdivides long coastline edges and nudges the
//!   land site so the shore wiggles instead of staying straight
//!
//! Both loops re-run the ratio adjustment after every pass and stop early
//! once a pass inserts nothing.

use tracing::debug;

use super::ratio::adjust_ratio;
use crate::shoreline::{coastline_edges, CoastlineEdge};
use crate::site::{CrustField, SiteOrigin};

/// Fraction of a coastline edge the new site is offset by
const COASTLINE_SPAN_FRACTION: f64 = 0.2;

/// Fraction of the sea-to-land vector both sites are nudged inland by
const COASTLINE_NUDGE_FRACTION: f64 = 0.15;

/// What a refinement loop did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefinementSummary {
    /// Passes run, including the final pass that inserted nothing
    pub passes: usize,
    /// Sites inserted across all passes
    pub inserted: usize,
}

/// Split every steep link once
///
/// Links with both ends below sea level are left alone. For a link with
/// elevation difference `d = source - target` and `|d| > threshold`, a site
/// is appended at the midpoint with elevation `source - d / 2`.
///
/// Returns the number of sites inserted.
pub fn split_elevation_gaps(field: &mut CrustField, threshold: f64) -> usize {
    let links = field.tessellate().links().to_vec();

    let mut inserted = 0;
    for link in links {
        let source = field.sites()[link.source];
        let target = field.sites()[link.target];
        if source.is_sea() && target.is_sea() {
            continue;
        }

        let gap = source.elevation - target.elevation;
        if gap.abs() > threshold {
            field.push(
                (source.position + target.position) * 0.5,
                source.elevation - gap / 2.0,
                SiteOrigin::Refined,
            );
            inserted += 1;
        }
    }
    inserted
}

/// Subdivide every coastline edge longer than `min_length` once
///
/// Edges come from a single tessellation snapshot but are applied in order
/// against the live site positions, so a land site on several long edges is
/// moved once per edge.
///
/// Returns the number of sites inserted.
pub fn indent_coastline(field: &mut CrustField, min_length: f64) -> usize {
    let edges = coastline_edges(field);

    let mut inserted = 0;
    for edge in edges {
        if edge.length() <= min_length {
            continue;
        }

        let land = field.sites()[edge.land];
        let sea = field.sites()[edge.sea];
        let span = (edge.endpoints[0] - edge.endpoints[1]) * COASTLINE_SPAN_FRACTION;
        let nudge = (land.position - sea.position) * COASTLINE_NUDGE_FRACTION;

        field.push(land.position + span + nudge, land.elevation, SiteOrigin::Refined);
        field.move_site(edge.land, land.position - (span - nudge));
        inserted += 1;
    }
    inserted
}

/// Run elevation-gap passes until nothing splits or `max_passes` is reached
pub fn refine_elevation_gaps(
    field: &mut CrustField,
    threshold: f64,
    max_passes: usize,
    land_ratio: f64,
) -> RefinementSummary {
    let mut summary = RefinementSummary::default();

    for pass in 0..max_passes {
        let inserted = split_elevation_gaps(field, threshold);
        adjust_ratio(field, land_ratio);

        summary.passes += 1;
        summary.inserted += inserted;
        debug!(pass, inserted, sites = field.len(), "elevation gap pass");

        if inserted == 0 {
            break;
        }
    }
    summary
}

/// Run coastline passes until nothing splits or `max_passes` is reached
///
/// The coastline after every pass is appended to `history`.
pub fn refine_coastline(
    field: &mut CrustField,
    min_length: f64,
    max_passes: usize,
    land_ratio: f64,
    history: &mut Vec<Vec<CoastlineEdge>>,
) -> RefinementSummary {
    let mut summary = RefinementSummary::default();

    for pass in 0..max_passes {
        let inserted = indent_coastline(field, min_length);
        adjust_ratio(field, land_ratio);
        history.push(coastline_edges(field));

        summary.passes += 1;
        summary.inserted += inserted;
        debug!(pass, inserted, sites = field.len(), "coastline pass");

        if inserted == 0 {
            break;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use glam::DVec2;

    fn pair(a: f64, b: f64) -> CrustField {
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        field.push(DVec2::new(25.0, 50.0), a, SiteOrigin::Land);
        field.push(DVec2::new(75.0, 50.0), b, SiteOrigin::Sea);
        field
    }

    #[test]
    fn test_split_inserts_midpoint() {
        let mut field = pair(1.0, 0.0);

        assert_eq!(split_elevation_gaps(&mut field, 0.15), 1);
        assert_eq!(field.len(), 3);

        let new_site = field.sites()[2];
        assert_eq!(new_site.position, DVec2::new(50.0, 50.0));
        assert_eq!(new_site.elevation, 0.5);
        assert_eq!(new_site.origin, SiteOrigin::Refined);
    }

    #[test]
    fn test_split_skips_sea_and_gentle_links() {
        let mut field = pair(-0.1, -0.9);
        assert_eq!(split_elevation_gaps(&mut field, 0.15), 0);

        let mut field = pair(0.3, 0.2);
        assert_eq!(split_elevation_gaps(&mut field, 0.15), 0);

        // A land/sea link counts even when the land side is barely above 0
        let mut field = pair(0.0, -0.5);
        assert_eq!(split_elevation_gaps(&mut field, 0.15), 1);
    }

    #[test]
    fn test_gap_loop_stops_early() {
        let mut field = pair(0.3, 0.2);
        let summary = refine_elevation_gaps(&mut field, 0.15, 4, 0.5);
        assert_eq!(summary, RefinementSummary { passes: 1, inserted: 0 });
    }

    #[test]
    fn test_gap_loop_respects_pass_limit() {
        let mut field = pair(1.0, -1.0);
        let summary = refine_elevation_gaps(&mut field, 0.15, 4, 0.5);

        assert!(summary.passes >= 1 && summary.passes <= 4);
        assert_eq!(summary.inserted, field.len() - 2);
        assert!(summary.inserted > 0);
    }

    #[test]
    fn test_indent_coastline() {
        let mut field = pair(0.5, -0.5);

        assert_eq!(indent_coastline(&mut field, 20.0), 1);
        assert_eq!(field.len(), 3);

        let moved = field.sites()[0].position;
        let added = field.sites()[2];
        assert_eq!(added.elevation, 0.5);
        assert_eq!(added.origin, SiteOrigin::Refined);

        // Both sites shift 7.5 inland and split 20 apart along the edge
        let mut ys = [moved.y, added.position.y];
        ys.sort_by(f64::total_cmp);
        assert!((moved.x - 17.5).abs() < 1e-9);
        assert!((added.position.x - 17.5).abs() < 1e-9);
        assert!((ys[0] - 30.0).abs() < 1e-9);
        assert!((ys[1] - 70.0).abs() < 1e-9);

        // The sea site never moves
        assert_eq!(field.sites()[1].position, DVec2::new(75.0, 50.0));
    }

    #[test]
    fn test_short_coastline_untouched() {
        let mut field = pair(0.5, -0.5);
        assert_eq!(indent_coastline(&mut field, 200.0), 0);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_coastline_loop_records_history() {
        let mut field = pair(0.5, -0.5);
        let mut history = Vec::new();
        let summary = refine_coastline(&mut field, 20.0, 10, 0.5, &mut history);

        assert_eq!(history.len(), summary.passes);
        assert!(summary.passes <= 10);
        assert_eq!(summary.inserted, field.len() - 2);
        for snapshot in &history {
            for edge in snapshot {
                assert!(field.bounds().contains(edge.endpoints[0]));
            }
        }
        for site in field.sites() {
            assert!(field.bounds().contains(site.position));
        }
    }
}
