//! Flight input: the eight held-key controls, polled once per frame.
//!
//! # Invariants
//! - Input is sampled state, never a replayed event stream.
//! - Every source yields the same [`InputState`] shape, live or scripted.

pub mod controls;
pub mod script;

pub use controls::{Control, InputSource, InputState, ParseControlError};
pub use script::{FlightScript, ScriptError};
