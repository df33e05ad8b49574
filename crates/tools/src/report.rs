use terrastream_terrain::{Chunk, ChunkCoord, ColorBands};

/// Summary of one baked chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkReport {
    pub coord: ChunkCoord,
    pub vertices: usize,
    pub triangles: usize,
    pub min_height: f32,
    pub max_height: f32,
    /// Height samples below the water plane.
    pub submerged: usize,
    /// Height samples in each band: low flat, low blend, mid flat, top blend.
    pub band_counts: [usize; 4],
}

impl ChunkReport {
    pub fn of(chunk: &Chunk, bands: &ColorBands, water_level: f32) -> Self {
        let [_, t1, t2, t3, _] = bands.thresholds();
        let terrain = &chunk.vertices()[..chunk.terrain_vertex_count()];

        let mut min_height = f32::INFINITY;
        let mut max_height = f32::NEG_INFINITY;
        let mut submerged = 0;
        let mut band_counts = [0; 4];
        for v in terrain {
            min_height = min_height.min(v.y);
            max_height = max_height.max(v.y);
            if v.y < water_level {
                submerged += 1;
            }
            let band = if v.y < t1 {
                0
            } else if v.y < t2 {
                1
            } else if v.y < t3 {
                2
            } else {
                3
            };
            band_counts[band] += 1;
        }

        Self {
            coord: chunk.coord(),
            vertices: chunk.vertices().len(),
            triangles: chunk.indices().len() / 3,
            min_height,
            max_height,
            submerged,
            band_counts,
        }
    }
}

impl std::fmt::Display for ChunkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Chunk {}", self.coord)?;
        writeln!(
            f,
            "  vertices={} triangles={}",
            self.vertices, self.triangles
        )?;
        writeln!(
            f,
            "  height=[{:.3}, {:.3}] submerged={}",
            self.min_height, self.max_height, self.submerged
        )?;
        write!(
            f,
            "  bands: grass={} grass/rock={} rock={} rock/snow={}",
            self.band_counts[0], self.band_counts[1], self.band_counts[2], self.band_counts[3]
        )
    }
}
