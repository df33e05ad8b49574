use glam::Vec3;
use serde::{Deserialize, Serialize};
use terrastream_common::{Mesh, Rgb, rgb8};

use crate::bands::ColorBands;
use crate::config::TerrainConfig;
use crate::heightfield::HeightField;

pub const WATER_COLOR: Rgb = rgb8(0, 119, 190);

/// Integer grid address of a chunk.
///
/// Hashes and compares as a pair of integers, so `(1, -2)` and `(-1, 2)`
/// (or any other pair) can never alias each other as cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Neighbor at `(dx, dz)`, saturating at the edge of the grid.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Baked, immutable terrain geometry for one chunk.
///
/// Vertices are the `R x R` height samples in x-major order followed by the
/// four corners of the water quad. All indices are local to this chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    coord: ChunkCoord,
    mesh: Mesh,
}

impl Chunk {
    /// Sample, color and triangulate the chunk at `coord`.
    pub fn generate(
        coord: ChunkCoord,
        config: &TerrainConfig,
        field: &HeightField,
        bands: &ColorBands,
    ) -> Self {
        let steps = config.steps_per_chunk() as i64;
        let r = config.samples_per_side();
        let side = r as usize;
        let grid_vertices = side * side;
        let grid_indices = (side - 1) * (side - 1) * 6;
        let mut mesh = Mesh::with_capacity(grid_vertices + 4, grid_indices + 6);

        // Positions come from the global sample lattice rather than
        // accumulated offsets, so the shared edge of two neighbors lands on
        // bit-identical coordinates.
        let base_x = coord.x as i64 * steps;
        let base_z = coord.z as i64 * steps;
        for i in 0..r as i64 {
            let x = (base_x + i) as f32 * config.sample_step;
            for j in 0..r as i64 {
                let z = (base_z + j) as f32 * config.sample_step;
                let h = field.elevation(x, z);
                mesh.push_vertex(Vec3::new(x, h, z), bands.color_at(h));
            }
        }

        for i in 0..r - 1 {
            for j in 0..r - 1 {
                let row = i * r;
                let next = (i + 1) * r;
                mesh.push_triangle(j + row, j + 1 + row, j + next);
                mesh.push_triangle(j + 1 + row, j + 1 + next, j + next);
            }
        }

        let x0 = base_x as f32 * config.sample_step;
        let z0 = base_z as f32 * config.sample_step;
        let x1 = (base_x + steps) as f32 * config.sample_step;
        let z1 = (base_z + steps) as f32 * config.sample_step;
        let w = config.water_level;
        let a = mesh.push_vertex(Vec3::new(x0, w, z0), WATER_COLOR);
        let b = mesh.push_vertex(Vec3::new(x0, w, z1), WATER_COLOR);
        let c = mesh.push_vertex(Vec3::new(x1, w, z0), WATER_COLOR);
        let d = mesh.push_vertex(Vec3::new(x1, w, z1), WATER_COLOR);
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(c, b, d);

        mesh.assert_consistent();
        Self { coord, mesh }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.mesh.positions
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.mesh.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    /// Number of height samples (excludes the water quad).
    pub fn terrain_vertex_count(&self) -> usize {
        self.mesh.vertex_count() - 4
    }
}
