//! The match state machine and its read-only views.
//!
//! - `engine`: `GameEngine`, phases, outcomes and end-of-game handling
//! - `movegen`: enumeration of the actions the engine would accept
//! - `snapshot`: detached state copies for broadcasting

pub mod engine;
pub mod movegen;
pub mod snapshot;

pub use engine::{EndReason, GameEngine, GameResult, Outcome, Phase, Status};
pub use snapshot::Snapshot;
