use terrastream_common::{Rgb, rgb8};

use crate::config::TerrainError;

const GRASS: Rgb = rgb8(17, 124, 19);
const ROCK: Rgb = rgb8(87, 59, 12);
const SNOW: Rgb = rgb8(240, 240, 240);

/// Maps an elevation to a vertex color.
///
/// Five ascending thresholds `t[0..5]` and three colors `c[0..3]`:
///
/// ```text
///          h < t1  -> c0
///   t1 <= h < t2   -> c0 .. c1 (linear)
///   t2 <= h < t3   -> c1
///   t3 <= h        -> c1 .. c2 (linear, extrapolates past t4)
/// ```
///
/// The top band is deliberately unclamped: peaks above `t4` brighten past `c2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBands {
    thresholds: [f32; 5],
    colors: [Rgb; 3],
}

impl Default for ColorBands {
    fn default() -> Self {
        Self {
            thresholds: [0.2, 0.3, 0.4, 0.7, 1.0],
            colors: [GRASS, ROCK, SNOW],
        }
    }
}

impl ColorBands {
    pub fn new(thresholds: [f32; 5], colors: [Rgb; 3]) -> Result<Self, TerrainError> {
        let ascending = thresholds.windows(2).all(|w| w[0] < w[1]);
        if !ascending {
            return Err(TerrainError::ThresholdsNotAscending(thresholds));
        }
        Ok(Self { thresholds, colors })
    }

    pub fn thresholds(&self) -> [f32; 5] {
        self.thresholds
    }

    pub fn colors(&self) -> [Rgb; 3] {
        self.colors
    }

    pub fn color_at(&self, h: f32) -> Rgb {
        let [_, t1, t2, t3, t4] = self.thresholds;
        let [c0, c1, c2] = self.colors;
        if h < t1 {
            c0
        } else if h < t2 {
            c0.lerp(c1, (h - t1) / (t2 - t1))
        } else if h < t3 {
            c1
        } else {
            c1.lerp(c2, (h - t3) / (t4 - t3))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn low_bands_are_grass() {
        let bands = ColorBands::default();
        assert_eq!(bands.color_at(-0.9), GRASS);
        assert_eq!(bands.color_at(0.2), GRASS);
        assert_eq!(bands.color_at(0.25), GRASS);
    }

    #[test]
    fn threshold_edges_are_exact() {
        let bands = ColorBands::default();
        assert_eq!(bands.color_at(0.3), GRASS);
        assert_eq!(bands.color_at(0.4), ROCK);
        assert_eq!(bands.color_at(0.55), ROCK);
        assert_eq!(bands.color_at(0.7), ROCK);
    }

    #[test]
    fn midpoint_is_even_blend() {
        let bands = ColorBands::default();
        let mid = (0.3 + 0.4) / 2.0;
        assert!(close(bands.color_at(mid), (GRASS + ROCK) * 0.5));
    }

    #[test]
    fn top_band_reaches_snow_at_t4() {
        let bands = ColorBands::default();
        assert!(close(bands.color_at(1.0), SNOW));
    }

    #[test]
    fn top_band_extrapolates_above_t4() {
        let bands = ColorBands::default();
        let c = bands.color_at(1.6);
        // Factor is 3.0: rock + 3 * (snow - rock).
        assert!(close(c, ROCK + (SNOW - ROCK) * 3.0));
        assert!(c.x > 1.0);
    }

    #[test]
    fn rejects_unsorted_thresholds() {
        let err = ColorBands::new([0.1, 0.5, 0.4, 0.7, 1.0], [GRASS, ROCK, SNOW]);
        assert!(matches!(err, Err(TerrainError::ThresholdsNotAscending(_))));
    }
}
