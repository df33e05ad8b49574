//! Terrain: procedural elevation, color banding and chunk generation.
//!
//! # Invariants
//! - Elevation and color are pure functions of world position, so adjacent
//!   chunks agree exactly along their shared edge.
//! - A chunk is generated at most once per store and never mutated.

mod bands;
mod chunk;
mod config;
mod heightfield;
mod store;

pub use bands::ColorBands;
pub use chunk::{Chunk, ChunkCoord, WATER_COLOR};
pub use config::{TerrainConfig, TerrainError};
pub use heightfield::{HeightField, NoiseShape};
pub use store::ChunkStore;

pub fn crate_info() -> &'static str {
    "terrastream-terrain v0.1.0"
}
