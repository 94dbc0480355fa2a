//! # morris-engine
//!
//! Rules engine for Nine Men's Morris ("Mühle") as played in a real-time
//! multiplayer service.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: no randomness, no I/O, no clocks. The same actions
//!    always produce the same state.
//!
//! 2. **Check-then-act**: every guard runs before the first mutation, so a
//!    rejected action never leaves a half-applied state behind.
//!
//! 3. **Single writer per match**: engines take `&mut self` and carry no
//!    locks. Independent matches share nothing and can run in parallel.
//!
//! ## Modules
//!
//! - `board`: point topology, mill lines and occupancy
//! - `core`: players and seats, actions, configuration, errors
//! - `rules`: the `GameEngine` state machine, legal moves and snapshots
//! - `session`: player → match routing for the surrounding server
//!
//! ## Example
//!
//! ```
//! use morris_engine::{Action, GameEngine, Outcome, PlayerId, PlayerInfo};
//!
//! let anna = PlayerId::new(1);
//! let ben = PlayerId::new(2);
//! let mut engine = GameEngine::new(PlayerInfo::new(anna, "Anna"), PlayerInfo::new(ben, "Ben")).unwrap();
//!
//! assert_eq!(engine.handle_action(anna, Action::Place { index: 0 }), Ok(Outcome::TurnPassed));
//! assert!(engine.handle_action(anna, Action::Place { index: 1 }).is_err());
//! assert_eq!(engine.snapshot().turn, ben);
//! ```

pub mod board;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::board::{BoardState, Cell, Point, MILLS, POINT_COUNT};

pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, CodecError, Color, ConfigError, ErrorKind, GameConfig,
    PlayerId, PlayerInfo, PlayerRecord, Seat, Seats,
};

pub use crate::rules::{EndReason, GameEngine, GameResult, Outcome, Phase, Snapshot, Status};

pub use crate::session::{Departure, MatchId, MatchRegistry, SessionError};
