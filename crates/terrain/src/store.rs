use std::collections::HashMap;

use crate::bands::ColorBands;
use crate::chunk::{Chunk, ChunkCoord};
use crate::config::{TerrainConfig, TerrainError};
use crate::heightfield::HeightField;

/// Generate-once cache of chunk geometry.
///
/// Chunks are never evicted or rebuilt; memory grows with the area flown
/// over for the lifetime of the store.
#[derive(Debug)]
pub struct ChunkStore {
    config: TerrainConfig,
    field: HeightField,
    bands: ColorBands,
    chunks: HashMap<ChunkCoord, Chunk>,
    generated: u64,
}

impl ChunkStore {
    /// Store with default geometry and banding for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            config: TerrainConfig::default(),
            field: HeightField::new(seed),
            bands: ColorBands::default(),
            chunks: HashMap::new(),
            generated: 0,
        }
    }

    pub fn with_parts(
        config: TerrainConfig,
        field: HeightField,
        bands: ColorBands,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        Ok(Self {
            config,
            field,
            bands,
            chunks: HashMap::new(),
            generated: 0,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn bands(&self) -> &ColorBands {
        &self.bands
    }

    /// Return the chunk at `coord`, generating it on first request.
    pub fn ensure(&mut self, coord: ChunkCoord) -> &Chunk {
        if !self.chunks.contains_key(&coord) {
            let chunk = Chunk::generate(coord, &self.config, &self.field, &self.bands);
            self.generated += 1;
            tracing::debug!(
                %coord,
                vertices = chunk.vertices().len(),
                triangles = chunk.indices().len() / 3,
                "generated chunk"
            );
            self.chunks.insert(coord, chunk);
        }
        &self.chunks[&coord]
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of cached chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total chunk generations performed over the store's lifetime.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }
}
