//! Color mapping for site elevations

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Trait for mapping an elevation to a color
///
/// Implemented for any `Fn(f64) -> TerrainColor`, so a closure works as a
/// mapper.
pub trait ColorMapper {
    /// Map an elevation (negative below sea level) to an RGBA color
    fn map_color(&self, elevation: f64) -> TerrainColor;
}

impl<F> ColorMapper for F
where
    F: Fn(f64) -> TerrainColor,
{
    fn map_color(&self, elevation: f64) -> TerrainColor {
        self(elevation)
    }
}

fn rgb([r, g, b]: [u8; 3]) -> TerrainColor {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Upper elevation bound of each band and its color
const BANDS: [(f64, [u8; 3]); 12] = [
    (-0.67, [0x00, 0x22, 0x88]),
    (-0.33, [0x08, 0x34, 0x80]),
    (0.0, [0x11, 0x44, 0x88]),
    (0.1, [0x00, 0x88, 0x33]),
    (0.2, [0x33, 0x99, 0x33]),
    (0.3, [0x55, 0xaa, 0x44]),
    (0.4, [0x88, 0xcc, 0x55]),
    (0.5, [0xbb, 0xee, 0x77]),
    (0.6, [0xaa, 0xbb, 0x55]),
    (0.7, [0x99, 0x99, 0x33]),
    (0.8, [0x88, 0x77, 0x22]),
    (0.9, [0x88, 0x66, 0x22]),
];

/// Color of everything at or above the last band
const SUMMIT: [u8; 3] = [0x77, 0x55, 0x22];

/// Default stepped palette: three sea bands, ten land bands
#[derive(Debug, Clone, Copy, Default)]
pub struct BandedColorMapper;

impl ColorMapper for BandedColorMapper {
    fn map_color(&self, elevation: f64) -> TerrainColor {
        let color = BANDS
            .iter()
            .find(|(upper, _)| elevation < *upper)
            .map(|(_, color)| *color)
            .unwrap_or(SUMMIT);
        rgb(color)
    }
}

/// Smooth palette interpolating between configurable anchor colors
///
/// Sea blends from `deep_sea` at -1 to `shallow_sea` at 0, lowland from
/// `coast` at 0 to `upland` at 0.5, and highland from `upland` to `summit`
/// at 1.
#[derive(Debug, Clone)]
pub struct GradientColorMapper {
    pub deep_sea: TerrainColor,
    pub shallow_sea: TerrainColor,
    pub coast: TerrainColor,
    pub upland: TerrainColor,
    pub summit: TerrainColor,
}

impl Default for GradientColorMapper {
    fn default() -> Self {
        Self {
            deep_sea: rgb([0x00, 0x22, 0x88]),
            shallow_sea: rgb([0x11, 0x44, 0x88]),
            coast: rgb([0x00, 0x88, 0x33]),
            upland: rgb([0xbb, 0xee, 0x77]),
            summit: rgb(SUMMIT),
        }
    }
}

impl GradientColorMapper {
    /// Pale print-friendly palette: light blue sea, white to gray land
    pub fn light() -> Self {
        Self {
            deep_sea: rgb([173, 216, 230]),
            shallow_sea: rgb([240, 255, 255]),
            coast: rgb([255, 255, 255]),
            upland: rgb([211, 211, 211]),
            summit: rgb([128, 128, 128]),
        }
    }
}

impl ColorMapper for GradientColorMapper {
    fn map_color(&self, elevation: f64) -> TerrainColor {
        if elevation < 0.0 {
            lerp(self.deep_sea, self.shallow_sea, elevation + 1.0)
        } else if elevation < 0.5 {
            lerp(self.coast, self.upland, elevation * 2.0)
        } else {
            lerp(self.upland, self.summit, (elevation - 0.5) * 2.0)
        }
    }
}

fn lerp(from: TerrainColor, to: TerrainColor, t: f64) -> TerrainColor {
    let t = t.clamp(0.0, 1.0) as f32;
    let mut color = from;
    for (channel, target) in color.iter_mut().zip(to) {
        *channel += (target - *channel) * t;
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banded_color_mapper() {
        let mapper = BandedColorMapper;

        let ocean_color = mapper.map_color(-0.9);
        assert_eq!(ocean_color[3], 1.0);
        assert!(ocean_color[2] > 0.5); // Blue channel should be high

        let land_color = mapper.map_color(0.25);
        assert_eq!(land_color[3], 1.0);
        assert!(land_color[1] > 0.5); // Green channel should be high
    }

    #[test]
    fn test_band_edges() {
        let mapper = BandedColorMapper;

        // Sea level belongs to the first land band
        assert_eq!(mapper.map_color(0.0), rgb([0x00, 0x88, 0x33]));
        assert_eq!(mapper.map_color(-0.01), rgb([0x11, 0x44, 0x88]));
        assert_eq!(mapper.map_color(0.95), rgb(SUMMIT));
        assert_eq!(mapper.map_color(f64::MAX), rgb(SUMMIT));
        assert_eq!(mapper.map_color(-5.0), rgb([0x00, 0x22, 0x88]));
    }

    #[test]
    fn test_gradient_color_mapper() {
        let mapper = GradientColorMapper::default();

        assert_eq!(mapper.map_color(-1.0), mapper.deep_sea);
        assert_eq!(mapper.map_color(0.0), mapper.coast);
        assert_eq!(mapper.map_color(0.5), mapper.upland);
        let top = mapper.map_color(1.0);
        assert!(top.iter().zip(mapper.summit).all(|(a, b)| (a - b).abs() < 1e-6));
        // Out of range elevations clamp to the end colors
        assert_eq!(mapper.map_color(-3.0), mapper.deep_sea);

        let custom = GradientColorMapper {
            coast: [1.0, 1.0, 1.0, 1.0],
            upland: [0.0, 0.0, 0.0, 1.0],
            ..Default::default()
        };
        let mid = custom.map_color(0.25);
        assert!((mid[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_light_gradient() {
        let mapper = GradientColorMapper::light();

        assert_eq!(mapper.map_color(-1.0), rgb([173, 216, 230]));
        assert_eq!(mapper.map_color(0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(mapper.map_color(0.5), rgb([211, 211, 211]));
        let shallow = mapper.map_color(-1e-9);
        assert!(shallow.iter().zip(rgb([240, 255, 255])).all(|(a, b)| (a - b).abs() < 1e-6));

        // Land only darkens with altitude
        let shades: Vec<f32> = [0.0, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&e| mapper.map_color(e)[0])
            .collect();
        assert!(shades.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_closure_mapper() {
        let mapper = |elevation: f64| -> TerrainColor {
            if elevation < 0.0 {
                [0.0, 0.0, 1.0, 1.0]
            } else {
                [0.0, 1.0, 0.0, 1.0]
            }
        };
        assert_eq!(mapper.map_color(-0.2), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(mapper.map_color(0.4), [0.0, 1.0, 0.0, 1.0]);
    }
}
