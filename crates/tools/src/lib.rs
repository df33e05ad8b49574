//! Developer tooling: read-only views over a running session.
//!
//! # Invariants
//! - Tools never mutate the session or the chunk store.

mod report;
mod telemetry;

pub use report::ChunkReport;
pub use telemetry::Telemetry;

pub fn crate_info() -> &'static str {
    "terrastream-tools v0.1.0"
}
