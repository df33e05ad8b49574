//! Streaming: pick the chunk neighborhood around the camera and stitch it
//! into one drawable mesh.
//!
//! # Invariants
//! - The active mesh is rebuilt only when the camera changes chunk.
//! - Every index in the active mesh addresses a vertex of the active mesh.
//! - Generation is synchronous; a refresh returns with all chunks baked.

mod footprint;
mod streamer;
mod timer;

pub use footprint::{FOOTPRINT, footprint};
pub use streamer::{ActiveMesh, RefreshOutcome, StreamStats, TerrainStreamer};
pub use timer::FrameTimer;

pub fn crate_info() -> &'static str {
    "terrastream-stream v0.1.0"
}
