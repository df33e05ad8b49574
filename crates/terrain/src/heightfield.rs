use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::config::TerrainError;

/// Domain scale and output mapping applied around the raw Perlin sample.
///
/// The band thresholds in [`crate::ColorBands`] assume the default shape,
/// which yields elevations of roughly `[-0.9, 1.7]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseShape {
    /// Multiplier on world coordinates before sampling.
    pub frequency: f64,
    pub amplitude: f64,
    pub offset: f64,
}

impl Default for NoiseShape {
    fn default() -> Self {
        Self {
            frequency: 0.5,
            amplitude: 1.3,
            offset: 0.4,
        }
    }
}

impl NoiseShape {
    fn validate(&self) -> Result<(), TerrainError> {
        for (field, value) in [
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("offset", self.offset),
        ] {
            if !value.is_finite() {
                return Err(TerrainError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

/// Deterministic elevation over the whole world, seeded once.
///
/// One seed covers the entire terrain (not one per chunk), which is what
/// makes neighboring chunks meet without cracks.
#[derive(Clone)]
pub struct HeightField {
    seed: u32,
    shape: NoiseShape,
    perlin: Perlin,
}

impl HeightField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            shape: NoiseShape::default(),
            perlin: Perlin::new(seed),
        }
    }

    /// Build with a custom shape. Non-finite parameters are rejected.
    pub fn with_shape(seed: u32, shape: NoiseShape) -> Result<Self, TerrainError> {
        shape.validate()?;
        Ok(Self {
            seed,
            shape,
            perlin: Perlin::new(seed),
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Terrain elevation at world `(x, z)`.
    ///
    /// # Panics
    /// If the result is not finite. The shape is validated up front, so
    /// this only fires on a broken noise source.
    pub fn elevation(&self, x: f32, z: f32) -> f32 {
        let s = self.shape;
        let sample = self
            .perlin
            .get([x as f64 * s.frequency, z as f64 * s.frequency]);
        let h = (s.amplitude * sample + s.offset) as f32;
        assert!(
            h.is_finite(),
            "non-finite elevation {h} at ({x}, {z}) for seed {}",
            self.seed
        );
        h
    }
}

impl std::fmt::Debug for HeightField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeightField")
            .field("seed", &self.seed)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_elevation() {
        let a = HeightField::new(7);
        let b = HeightField::new(7);
        for i in 0..50 {
            let x = i as f32 * 0.37 - 9.0;
            let z = i as f32 * -1.13 + 4.0;
            assert_eq!(a.elevation(x, z), b.elevation(x, z));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = HeightField::new(1);
        let b = HeightField::new(2);
        let differs = (0..100).any(|i| {
            let x = i as f32 * 0.61 + 0.3;
            a.elevation(x, x * 0.5) != b.elevation(x, x * 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn elevation_stays_in_expected_band() {
        let field = HeightField::new(42);
        for i in 0..40 {
            for j in 0..40 {
                let h = field.elevation(i as f32 * 0.9 - 18.0, j as f32 * 0.7 - 14.0);
                assert!(h.is_finite());
                assert!((-1.0..=1.8).contains(&h), "elevation {h} out of band");
            }
        }
    }

    #[test]
    fn lattice_points_sit_at_offset() {
        // Perlin is zero on integer lattice points; (2, 2) maps to lattice (1, 1).
        let field = HeightField::new(3);
        assert!((field.elevation(2.0, 2.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn non_finite_shape_rejected() {
        let shape = NoiseShape {
            amplitude: f64::INFINITY,
            ..NoiseShape::default()
        };
        assert!(matches!(
            HeightField::with_shape(1, shape),
            Err(TerrainError::NonFinite {
                field: "amplitude",
                ..
            })
        ));
    }
}
