//! Land/sea ratio adjustment
//!
//! Sites are ranked by elevation, highest first, and their cell areas are
//! accumulated until they cover the target fraction of the map. The
//! elevation of the site where the running total crosses the target becomes
//! the new sea level: every elevation is shifted down by it.
//!
//! Sites tied with the crossover site but ranked after it are pushed just
//! below sea level, so a large group of equal elevations cannot overshoot
//! the target by more than one cell.

use std::cmp::Ordering;

use tracing::debug;

use crate::site::CrustField;
use crate::tessellation::Tessellation;

/// Elevation just below sea level given to tied sites ranked past the crossover
const BELOW_SEA_LEVEL: f64 = -f64::MIN_POSITIVE;

/// Where the ranked cell areas first reach the target
struct Crossover {
    base: f64,
    /// Sites tied with `base` that rank after the crossover site
    demoted: Vec<usize>,
}

/// Shift elevations so `target_fraction` of the map area lies at or above 0
///
/// Returns the elevation that was subtracted, or `None` for an empty field.
/// Must be called again after any site is added or moved.
///
/// Calling it twice in a row is a no-op the second time: the crossover site
/// already sits at exactly 0, so the returned base is 0.
pub fn adjust_ratio(field: &mut CrustField, target_fraction: f64) -> Option<f64> {
    let tessellation = field.tessellate();
    let crossover = find_crossover(field, &tessellation, target_fraction)?;

    field.lower_elevations(crossover.base);
    for &index in &crossover.demoted {
        field.sites_mut()[index].elevation = BELOW_SEA_LEVEL;
    }
    debug!(
        base = crossover.base,
        demoted = crossover.demoted.len(),
        target_fraction,
        "adjusted land ratio"
    );
    Some(crossover.base)
}

/// Elevation at which the cumulative cell area first reaches the target
///
/// Ties keep their index order. If rounding leaves the cumulative area just
/// short of the target, the lowest site is used.
pub fn crossover_elevation(
    field: &CrustField,
    tessellation: &Tessellation,
    target_fraction: f64,
) -> Option<f64> {
    find_crossover(field, tessellation, target_fraction).map(|c| c.base)
}

fn find_crossover(
    field: &CrustField,
    tessellation: &Tessellation,
    target_fraction: f64,
) -> Option<Crossover> {
    let sites = field.sites();
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by(|&a, &b| {
        sites[b]
            .elevation
            .partial_cmp(&sites[a].elevation)
            .unwrap_or(Ordering::Equal)
    });

    let target_area = target_fraction * field.bounds().area();
    let mut covered = 0.0;
    for (rank, &index) in order.iter().enumerate() {
        covered += tessellation.area(index);
        if covered >= target_area {
            let base = sites[index].elevation;
            let demoted = order[rank + 1..]
                .iter()
                .copied()
                .take_while(|&other| sites[other].elevation == base)
                .collect();
            return Some(Crossover { base, demoted });
        }
    }

    order.last().map(|&index| Crossover {
        base: sites[index].elevation,
        demoted: Vec::new(),
    })
}

/// Fraction of the map area covered by cells at or above sea level
pub fn land_fraction(field: &CrustField, tessellation: &Tessellation) -> f64 {
    let area = field.bounds().area();
    if area <= 0.0 {
        return 0.0;
    }
    let land: f64 = field
        .sites()
        .iter()
        .enumerate()
        .filter(|(_, site)| site.is_land())
        .map(|(index, _)| tessellation.area(index))
        .sum();
    land / area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::site::SiteOrigin;
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn quadrant_field(elevations: [f64; 4]) -> CrustField {
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        let positions = [
            DVec2::new(25.0, 25.0),
            DVec2::new(75.0, 25.0),
            DVec2::new(25.0, 75.0),
            DVec2::new(75.0, 75.0),
        ];
        for (position, elevation) in positions.into_iter().zip(elevations) {
            field.push(position, elevation, SiteOrigin::Land);
        }
        field
    }

    fn random_field(seed: u64, count: usize) -> CrustField {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = CrustField::new(Bounds::new(800.0, 400.0));
        for _ in 0..count {
            let position = DVec2::new(rng.gen::<f64>() * 800.0, rng.gen::<f64>() * 400.0);
            field.push(position, rng.gen::<f64>() * 2.0 - 1.0, SiteOrigin::Sea);
        }
        field
    }

    #[test]
    fn test_adjust_quadrants() {
        let mut field = quadrant_field([0.2, 0.9, -0.3, 0.5]);

        let base = adjust_ratio(&mut field, 0.45).unwrap();
        assert_eq!(base, 0.5);

        let elevations: Vec<f64> = field.sites().iter().map(|s| s.elevation).collect();
        assert!((elevations[0] + 0.3).abs() < 1e-12);
        assert!((elevations[1] - 0.4).abs() < 1e-12);
        assert!((elevations[2] + 0.8).abs() < 1e-12);
        assert_eq!(elevations[3], 0.0);

        let fraction = land_fraction(&field, &field.tessellate());
        assert!((fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fraction_within_one_cell() {
        let mut field = random_field(21, 150);
        adjust_ratio(&mut field, 0.35).unwrap();

        let tessellation = field.tessellate();
        let fraction = land_fraction(&field, &tessellation);
        let largest_cell = (0..field.len())
            .map(|i| tessellation.area(i))
            .fold(0.0, f64::max)
            / field.bounds().area();

        assert!(fraction >= 0.35 - 1e-9);
        assert!(fraction < 0.35 + largest_cell);
    }

    #[test]
    fn test_adjust_is_idempotent() {
        let mut field = random_field(5, 100);
        adjust_ratio(&mut field, 0.3).unwrap();
        let once = field.clone();

        let base = adjust_ratio(&mut field, 0.3).unwrap();
        assert_eq!(base, 0.0);
        assert_eq!(field, once);
    }

    #[test]
    fn test_extreme_targets() {
        let mut field = quadrant_field([0.2, 0.9, -0.3, 0.5]);
        assert_eq!(adjust_ratio(&mut field, 0.0), Some(0.9));

        let mut field = quadrant_field([0.2, 0.9, -0.3, 0.5]);
        assert_eq!(adjust_ratio(&mut field, 1.0), Some(-0.3));
        assert_eq!(field.land_count(), 4);
    }

    #[test]
    fn test_tied_sites_past_crossover_become_sea() {
        // Five strips of equal width, the last four tied at sea level
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        field.push(DVec2::new(10.0, 50.0), 1.0, SiteOrigin::Land);
        for x in [30.0, 50.0, 70.0, 90.0] {
            field.push(DVec2::new(x, 50.0), 0.0, SiteOrigin::Refined);
        }

        // One tied strip is enough to pass 0.3
        let base = adjust_ratio(&mut field, 0.3).unwrap();
        assert_eq!(base, 0.0);
        assert_eq!(field.land_count(), 2);
        assert!(field.sites()[1].is_land());
        assert!(field.sites()[2..].iter().all(|s| s.is_sea()));

        let fraction = land_fraction(&field, &field.tessellate());
        assert!((fraction - 0.4).abs() < 1e-9);

        let once = field.clone();
        assert_eq!(adjust_ratio(&mut field, 0.3), Some(0.0));
        assert_eq!(field, once);
    }

    #[test]
    fn test_empty_field() {
        let mut field = CrustField::new(Bounds::new(10.0, 10.0));
        assert_eq!(adjust_ratio(&mut field, 0.5), None);
    }
}
