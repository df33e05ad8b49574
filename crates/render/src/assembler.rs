use glam::{Vec3, Vec4};
use terrastream_common::Mesh;

pub const FOG_COLOR: Vec4 = Vec4::new(0.8, 0.9, 1.0, 1.0);

/// Per-draw shader inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Pitch, yaw, roll in degrees.
    pub orientation: Vec3,
    /// Camera position the scene is shifted by.
    pub shift: Vec3,
    pub fog_color: Vec4,
    pub fog_density: f32,
    pub fudge_factor: f32,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            orientation: Vec3::ZERO,
            shift: Vec3::ZERO,
            fog_color: FOG_COLOR,
            fog_density: 0.07,
            fudge_factor: 1.0,
        }
    }
}

/// Merges terrain and sky into the single buffer set the backend draws.
///
/// Layout: vertices and colors are terrain then sky; the index list is the
/// sky's triangles first (rebased past the terrain vertices) followed by the
/// terrain's. The merged buffers are kept between frames to reuse their
/// allocations.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffers: Mesh,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assemble(&mut self, terrain: &Mesh, sky: &Mesh) -> &Mesh {
        let out = &mut self.buffers;
        out.clear();

        let sky_base = terrain.vertex_count() as u32;
        out.positions.extend_from_slice(&terrain.positions);
        out.positions.extend_from_slice(&sky.positions);
        out.colors.extend_from_slice(&terrain.colors);
        out.colors.extend_from_slice(&sky.colors);
        out.indices.extend(sky.indices.iter().map(|i| i + sky_base));
        out.indices.extend_from_slice(&terrain.indices);

        out.assert_consistent();
        tracing::trace!(
            vertices = out.vertex_count(),
            indices = out.indices.len(),
            "frame buffers assembled"
        );
        &self.buffers
    }

    /// Buffers from the last [`assemble`](Self::assemble).
    pub fn buffers(&self) -> &Mesh {
        &self.buffers
    }
}
