use terrastream_common::{DrawMode, Mesh};

use crate::assembler::FrameUniforms;

/// Boundary to whatever actually puts pixels on screen.
///
/// The frame loop calls [`draw`](RenderBackend::draw) with the buffers of the
/// previous frame, then [`upload`](RenderBackend::upload) with the freshly
/// assembled ones. Implementations must not assume buffers are unchanged
/// between frames.
pub trait RenderBackend {
    /// Replace the position, color and index buffers.
    fn upload(&mut self, buffers: &Mesh);

    /// Draw the whole uploaded index list in `mode`.
    fn draw(&mut self, mode: DrawMode, uniforms: &FrameUniforms);
}

/// Backend that keeps counters instead of touching a GPU.
///
/// Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    uploads: u64,
    draws: u64,
    vertex_count: usize,
    index_count: usize,
    /// Flat `f32` lengths of the last position and color uploads.
    position_floats: usize,
    color_floats: usize,
    last_mode: Option<DrawMode>,
    last_uniforms: Option<FrameUniforms>,
    /// Indices actually covered by draws; zero until something is uploaded.
    indices_drawn: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Vertex count of the currently uploaded buffers.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Flat float counts of the uploaded position and color buffers.
    pub fn float_counts(&self) -> (usize, usize) {
        (self.position_floats, self.color_floats)
    }

    pub fn indices_drawn(&self) -> u64 {
        self.indices_drawn
    }

    pub fn last_mode(&self) -> Option<DrawMode> {
        self.last_mode
    }

    pub fn last_uniforms(&self) -> Option<&FrameUniforms> {
        self.last_uniforms.as_ref()
    }

    /// One-line human-readable summary.
    pub fn describe(&self) -> String {
        format!(
            "uploads={} draws={} buffers=({} vertices, {} indices) mode={}",
            self.uploads,
            self.draws,
            self.vertex_count,
            self.index_count,
            self.last_mode.map_or("none", DrawMode::label)
        )
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload(&mut self, buffers: &Mesh) {
        self.uploads += 1;
        let positions = buffers.position_floats();
        let colors = buffers.color_floats();
        assert_eq!(
            positions.len(),
            colors.len(),
            "position and color buffers differ in length"
        );
        self.vertex_count = buffers.vertex_count();
        self.index_count = buffers.indices.len();
        self.position_floats = positions.len();
        self.color_floats = colors.len();
    }

    fn draw(&mut self, mode: DrawMode, uniforms: &FrameUniforms) {
        self.draws += 1;
        self.indices_drawn += self.index_count as u64;
        self.last_mode = Some(mode);
        self.last_uniforms = Some(*uniforms);
        tracing::trace!(mode = mode.label(), indices = self.index_count, "draw");
    }
}
