use serde::{Deserialize, Serialize};

use crate::chunk::ChunkCoord;

/// Errors from terrain configuration.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("chunk_size must be positive and finite, got {0}")]
    InvalidChunkSize(f32),
    #[error("sample_step must be positive and finite, got {0}")]
    InvalidSampleStep(f32),
    #[error("chunk_size {chunk_size} is not a whole multiple of sample_step {sample_step}")]
    StepNotDivisor { chunk_size: f32, sample_step: f32 },
    #[error("{samples_per_side} samples per side do not fit 32-bit vertex indices")]
    TooManySamples { samples_per_side: u64 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("band thresholds must be ascending: {0:?}")]
    ThresholdsNotAscending([f32; 5]),
}

/// Geometry parameters shared by every chunk in a store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of a chunk in world units.
    pub chunk_size: f32,
    /// Spacing between height samples.
    pub sample_step: f32,
    /// Height of the flat water quad under each chunk.
    pub water_level: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 24.0,
            sample_step: 0.25,
            water_level: 0.2,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.chunk_size.is_finite() && self.chunk_size > 0.0) {
            return Err(TerrainError::InvalidChunkSize(self.chunk_size));
        }
        if !(self.sample_step.is_finite() && self.sample_step > 0.0) {
            return Err(TerrainError::InvalidSampleStep(self.sample_step));
        }
        let steps = self.chunk_size / self.sample_step;
        if steps.fract() != 0.0 {
            return Err(TerrainError::StepNotDivisor {
                chunk_size: self.chunk_size,
                sample_step: self.sample_step,
            });
        }
        // Grid samples plus the four water corners must be addressable by u32.
        let side = steps as f64 + 1.0;
        if side * side + 4.0 > u32::MAX as f64 {
            return Err(TerrainError::TooManySamples {
                samples_per_side: side as u64,
            });
        }
        if !self.water_level.is_finite() {
            return Err(TerrainError::NonFinite {
                field: "water_level",
                value: self.water_level as f64,
            });
        }
        Ok(())
    }

    /// Sample intervals along one chunk edge.
    pub fn steps_per_chunk(&self) -> u32 {
        (self.chunk_size / self.sample_step) as u32
    }

    /// Samples along one chunk edge, both boundaries included.
    pub fn samples_per_side(&self) -> u32 {
        self.steps_per_chunk() + 1
    }

    /// Chunk containing a world-space `(x, z)`.
    pub fn chunk_at(&self, x: f32, z: f32) -> ChunkCoord {
        ChunkCoord {
            x: (x / self.chunk_size).floor() as i32,
            z: (z / self.chunk_size).floor() as i32,
        }
    }
}
