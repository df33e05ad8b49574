use glam::Vec3;

use crate::types::Rgb;

/// Indexed triangle geometry with one color per vertex.
///
/// Used for single chunks, the merged neighborhood, the sky envelope and the
/// final frame buffers. Indices are local to this mesh's own vertex array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mesh with room for `vertices` vertices and `indices` indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Push one colored vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3, color: Rgb) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.colors.push(color);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append `other` after this mesh's vertices, rebasing its indices by the
    /// current vertex count so they keep pointing at the same vertices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Drop all geometry but keep the allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
    }

    /// True when every index addresses an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let len = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < len)
    }

    /// Abort on corrupt geometry. Broken buffers would render as garbage with
    /// no way to detect it downstream.
    pub fn assert_consistent(&self) {
        assert_eq!(
            self.positions.len(),
            self.colors.len(),
            "mesh has {} positions but {} colors",
            self.positions.len(),
            self.colors.len()
        );
        assert!(
            self.indices.len() % 3 == 0,
            "mesh index count {} is not a whole number of triangles",
            self.indices.len()
        );
        assert!(self.indices_in_bounds(), "mesh index out of bounds");
    }

    /// Positions as a flat `f32` slice, ready for a vertex buffer.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck_floats(&self.positions)
    }

    /// Colors as a flat `f32` slice, ready for a vertex buffer.
    pub fn color_floats(&self) -> &[f32] {
        bytemuck_floats(&self.colors)
    }
}

fn bytemuck_floats(v: &[Vec3]) -> &[f32] {
    // Vec3 is three packed f32s with no padding.
    bytemuck::cast_slice(v)
}
