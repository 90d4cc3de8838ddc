//! Elevation diffusion along Voronoi adjacency
//!
//! Each round walks every adjacency link and moves a twelfth of the
//! elevation difference across it. Updates apply immediately, so a site
//! touched by several links sees the earlier exchanges when the later ones
//! run. That order dependence is what keeps the terrain from looking like a
//! plain blur.

use tracing::debug;

use crate::site::CrustField;

/// Fraction of each endpoint's elevation moved per exchange
const EXCHANGE_DIVISOR: f64 = 12.0;

/// Elevation changes for one link exchange, as `(source_delta, target_delta)`
///
/// The two deltas always cancel, so a single exchange conserves the pair's
/// total elevation.
#[inline]
pub fn exchange(source: f64, target: f64) -> (f64, f64) {
    let ds = source / EXCHANGE_DIVISOR;
    let dt = target / EXCHANGE_DIVISOR;
    (dt - ds, ds - dt)
}

/// Diffuse elevation for `rounds` rounds
///
/// Adjacency is computed once up front; positions do not change here.
pub fn relax(field: &mut CrustField, rounds: usize) {
    if rounds == 0 || field.is_empty() {
        return;
    }

    let links = field.tessellate().links().to_vec();
    let sites = field.sites_mut();

    for _ in 0..rounds {
        for link in &links {
            let (source_delta, target_delta) =
                exchange(sites[link.source].elevation, sites[link.target].elevation);
            sites[link.source].elevation += source_delta;
            sites[link.target].elevation += target_delta;
        }
    }

    debug!(rounds, links = links.len(), "relaxed elevations");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::site::SiteOrigin;
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_exchange_cancels() {
        for (s, t) in [(1.0, 0.0), (0.7, -0.9), (-1.0, -0.8), (0.25, 0.25)] {
            let (ds, dt) = exchange(s, t);
            assert!((ds + dt).abs() < 1e-15);
        }
        assert_eq!(exchange(0.4, 0.4), (0.0, 0.0));
    }

    #[test]
    fn test_relax_two_sites() {
        let mut field = CrustField::new(Bounds::new(100.0, 100.0));
        field.push(DVec2::new(25.0, 50.0), 1.0, SiteOrigin::Land);
        field.push(DVec2::new(75.0, 50.0), 0.0, SiteOrigin::Sea);

        relax(&mut field, 1);

        let sites = field.sites();
        assert!((sites[0].elevation - 11.0 / 12.0).abs() < 1e-12);
        assert!((sites[1].elevation - 1.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_relax_smooths_noise() {
        let bounds = Bounds::new(400.0, 400.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut field = CrustField::new(bounds);
        for _ in 0..120 {
            let position = DVec2::new(rng.gen::<f64>() * 400.0, rng.gen::<f64>() * 400.0);
            let elevation = if rng.gen::<bool>() { 1.0 } else { -1.0 };
            field.push(position, elevation, SiteOrigin::Land);
        }

        let roughness = |field: &CrustField| -> f64 {
            field
                .tessellate()
                .links()
                .iter()
                .map(|l| {
                    (field.sites()[l.source].elevation - field.sites()[l.target].elevation).abs()
                })
                .sum()
        };

        let before = roughness(&field);
        relax(&mut field, 5);
        let after = roughness(&field);

        assert!(after < before, "relaxation should reduce roughness ({} -> {})", before, after);
    }

    #[test]
    fn test_zero_rounds_is_noop() {
        let mut field = CrustField::new(Bounds::new(10.0, 10.0));
        field.push(DVec2::new(2.0, 2.0), 1.0, SiteOrigin::Land);
        field.push(DVec2::new(8.0, 8.0), -1.0, SiteOrigin::Sea);
        let before = field.clone();

        relax(&mut field, 0);
        assert_eq!(field, before);
    }
}
