//! Shared types for the terrain streamer.
//!
//! # Invariants
//! - Every [`Mesh`] keeps positions and colors in lockstep.
//! - Index lists are always whole triangles.

mod mesh;
mod settings;
mod types;

pub use mesh::Mesh;
pub use settings::{DrawMode, SettingsError, ViewSettings};
pub use types::{Rgb, WorldPoint, rgb8};

pub fn crate_info() -> &'static str {
    "terrastream-common v0.1.0"
}
