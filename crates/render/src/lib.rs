//! Rendering adapter: everything between generated geometry and the GPU.
//!
//! # Invariants
//! - The backend only ever sees merged, index-valid buffers.
//! - Buffers are re-uploaded every frame; the sky moves even when terrain
//!   does not.
//!
//! The backend itself lives behind [`RenderBackend`]. [`HeadlessBackend`]
//! records what it was given, for the CLI and tests.

mod assembler;
mod backend;
mod sky;

pub use assembler::{FOG_COLOR, FrameAssembler, FrameUniforms};
pub use backend::{HeadlessBackend, RenderBackend};
pub use sky::{SKY_COLOR, SkyVolume};

pub fn crate_info() -> &'static str {
    "terrastream-render v0.1.0"
}
