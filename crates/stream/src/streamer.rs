use std::time::{Duration, Instant};

use glam::Vec3;
use terrastream_common::Mesh;
use terrastream_terrain::{ChunkCoord, ChunkStore};

use crate::footprint::footprint;

/// The drawable terrain: the camera's neighborhood stitched into one mesh.
#[derive(Debug, Clone, Default)]
pub struct ActiveMesh {
    center: Option<ChunkCoord>,
    members: Vec<ChunkCoord>,
    mesh: Mesh,
}

impl ActiveMesh {
    /// Chunk the neighborhood is centered on, once built.
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    /// Chunks in concatenation order.
    pub fn members(&self) -> &[ChunkCoord] {
        &self.members
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Result of one [`TerrainStreamer::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Camera is still in the same chunk; nothing was touched.
    Unchanged,
    /// The active mesh was rebuilt around `center`. `generated` lists the
    /// chunks baked during this call, in footprint order.
    Rebuilt {
        center: ChunkCoord,
        generated: Vec<ChunkCoord>,
    },
}

/// Streaming statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub refreshes: u64,
    pub chunks_generated_last_refresh: usize,
    pub cached_chunks: usize,
    pub active_vertices: usize,
    pub active_triangles: usize,
    pub last_refresh_time: Duration,
}

/// Couples the camera position to the chunk store.
#[derive(Debug)]
pub struct TerrainStreamer {
    store: ChunkStore,
    active: ActiveMesh,
    stats: StreamStats,
}

impl TerrainStreamer {
    pub fn new(store: ChunkStore) -> Self {
        Self {
            store,
            active: ActiveMesh::default(),
            stats: StreamStats::default(),
        }
    }

    /// Make sure the neighborhood around `position` is baked and active.
    ///
    /// A no-op while the camera stays inside the chunk of the previous
    /// refresh. Otherwise every missing footprint chunk is generated before
    /// this returns and the active mesh is rebuilt from scratch.
    pub fn refresh(&mut self, position: Vec3) -> RefreshOutcome {
        let center = self.store.config().chunk_at(position.x, position.z);
        if self.active.center == Some(center) {
            return RefreshOutcome::Unchanged;
        }

        let _span = tracing::info_span!("terrain_refresh", %center).entered();
        let start = Instant::now();

        let cells = footprint(center);
        let mut generated = Vec::new();
        self.active.mesh.clear();
        self.active.members.clear();
        for coord in cells {
            if !self.store.contains(coord) {
                generated.push(coord);
            }
            let chunk = self.store.ensure(coord);
            self.active.mesh.append(chunk.mesh());
            self.active.members.push(coord);
        }
        self.active.mesh.assert_consistent();
        self.active.center = Some(center);

        self.stats = StreamStats {
            refreshes: self.stats.refreshes + 1,
            chunks_generated_last_refresh: generated.len(),
            cached_chunks: self.store.len(),
            active_vertices: self.active.mesh.vertex_count(),
            active_triangles: self.active.mesh.triangle_count(),
            last_refresh_time: start.elapsed(),
        };

        tracing::info!(
            generated = generated.len(),
            cached = self.store.len(),
            vertices = self.stats.active_vertices,
            elapsed = ?self.stats.last_refresh_time,
            "active mesh rebuilt"
        );

        RefreshOutcome::Rebuilt { center, generated }
    }

    pub fn active(&self) -> &ActiveMesh {
        &self.active
    }

    /// Chunk of the last refresh, if any.
    pub fn current_chunk(&self) -> Option<ChunkCoord> {
        self.active.center
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrastream_terrain::{ColorBands, HeightField, TerrainConfig};

    fn coords(list: &[(i32, i32)]) -> Vec<ChunkCoord> {
        list.iter().map(|&(x, z)| ChunkCoord::new(x, z)).collect()
    }

    fn small_streamer() -> TerrainStreamer {
        let cfg = TerrainConfig {
            chunk_size: 24.0,
            sample_step: 2.0,
            water_level: 0.2,
        };
        let store =
            ChunkStore::with_parts(cfg, HeightField::new(9), ColorBands::default()).unwrap();
        TerrainStreamer::new(store)
    }

    #[test]
    fn far_position_clamps_to_grid_edge() {
        let mut streamer = small_streamer();
        let outcome = streamer.refresh(Vec3::new(1.0e11, 2.0, 0.0));
        let edge = ChunkCoord::new(i32::MAX, 0);
        assert!(matches!(outcome, RefreshOutcome::Rebuilt { center, .. } if center == edge));
        assert_eq!(streamer.current_chunk(), Some(edge));
        assert!(streamer.active().mesh().indices_in_bounds());
        assert!(streamer.store().contains(ChunkCoord::new(i32::MAX - 1, -1)));
    }

    #[test]
    fn first_refresh_generates_footprint() {
        let mut streamer = TerrainStreamer::new(ChunkStore::new(1));
        let outcome = streamer.refresh(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(
            outcome,
            RefreshOutcome::Rebuilt {
                center: ChunkCoord::new(0, 0),
                generated: coords(&[(0, 0), (-1, 0), (0, -1), (-1, -1), (1, 0), (0, 1), (1, 1)]),
            }
        );
        assert_eq!(streamer.store().generated_count(), 7);
        assert_eq!(streamer.stats().chunks_generated_last_refresh, 7);
    }

    #[test]
    fn same_chunk_refresh_is_noop() {
        let mut streamer = small_streamer();
        streamer.refresh(Vec3::new(1.0, 2.0, 1.0));
        let before = streamer.active().mesh().clone();
        let outcome = streamer.refresh(Vec3::new(23.0, 9.0, 20.0));
        assert_eq!(outcome, RefreshOutcome::Unchanged);
        assert_eq!(streamer.store().generated_count(), 7);
        assert_eq!(streamer.stats().refreshes, 1);
        assert_eq!(streamer.active().mesh(), &before);
    }

    #[test]
    fn crossing_a_boundary_reuses_cached_chunks() {
        let mut streamer = TerrainStreamer::new(ChunkStore::new(1));
        streamer.refresh(Vec3::new(0.0, 2.0, 0.0));
        let outcome = streamer.refresh(Vec3::new(25.0, 2.0, 0.0));
        // Footprint of (1, 0): (1,0) (0,0) (1,-1) (0,-1) (2,0) (1,1) (2,1).
        assert_eq!(
            outcome,
            RefreshOutcome::Rebuilt {
                center: ChunkCoord::new(1, 0),
                generated: coords(&[(1, -1), (2, 0), (2, 1)]),
            }
        );
        assert_eq!(streamer.store().generated_count(), 10);
        assert_eq!(streamer.current_chunk(), Some(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn active_mesh_offsets_each_chunk() {
        let mut streamer = small_streamer();
        streamer.refresh(Vec3::new(-30.0, 2.0, 50.0));
        let active = streamer.active();
        assert_eq!(active.center(), Some(ChunkCoord::new(-2, 2)));
        assert_eq!(active.members().len(), 7);

        let mesh = active.mesh();
        assert!(mesh.indices_in_bounds());
        assert_eq!(mesh.positions.len(), mesh.colors.len());

        let mut vertex_base = 0u32;
        let mut index_base = 0usize;
        for coord in active.members() {
            let chunk = streamer.store().get(*coord).unwrap();
            let n = chunk.indices().len();
            let merged = &mesh.indices[index_base..index_base + n];
            for (m, local) in merged.iter().zip(chunk.indices()) {
                assert_eq!(*m, local + vertex_base);
            }
            let start = vertex_base as usize;
            assert_eq!(
                &mesh.positions[start..start + chunk.vertices().len()],
                chunk.vertices()
            );
            vertex_base += chunk.vertices().len() as u32;
            index_base += n;
        }
        assert_eq!(vertex_base as usize, mesh.vertex_count());
        assert_eq!(index_base, mesh.indices.len());
    }

    #[test]
    fn returning_to_a_chunk_generates_nothing() {
        let mut streamer = small_streamer();
        streamer.refresh(Vec3::new(0.0, 2.0, 0.0));
        streamer.refresh(Vec3::new(30.0, 2.0, 0.0));
        let generated = streamer.store().generated_count();
        let outcome = streamer.refresh(Vec3::new(5.0, 2.0, 5.0));
        assert_eq!(
            outcome,
            RefreshOutcome::Rebuilt {
                center: ChunkCoord::new(0, 0),
                generated: Vec::new(),
            }
        );
        assert_eq!(streamer.store().generated_count(), generated);
    }

    #[test]
    fn stats_track_active_geometry() {
        let mut streamer = small_streamer();
        streamer.refresh(Vec3::ZERO);
        let per_chunk = 13 * 13 + 4;
        assert_eq!(streamer.stats().active_vertices, per_chunk * 7);
        assert_eq!(streamer.stats().active_triangles, (12 * 12 * 2 + 2) * 7);
        assert_eq!(streamer.stats().cached_chunks, 7);
    }
}
