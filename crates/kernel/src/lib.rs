//! Kernel: flight state and the frame loop.
//!
//! # Invariants
//! - One frame runs draw, input, flight, terrain, sky, assembly, in that order.
//! - Camera height never leaves `[MIN_HEIGHT, MAX_HEIGHT]`.
//! - All mutable state is owned by a [`Session`]; nothing is global.

pub mod flight;
pub mod session;

pub use flight::{FlightController, FlightState, MAX_HEIGHT, MIN_HEIGHT, SPEED_STEP};
pub use session::{FrameReport, Session, SessionConfig, SessionError};
