//! Core types: players and seats, actions, configuration, errors.
//!
//! Everything here is plain data; the state machine lives in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;

pub use action::{Action, ActionKind, ActionRecord};
pub use config::GameConfig;
pub use error::{ActionError, CodecError, ConfigError, ErrorKind};
pub use player::{Color, PlayerId, PlayerInfo, PlayerRecord, Seat, Seats};
