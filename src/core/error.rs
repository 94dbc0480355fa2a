//! Error types.
//!
//! Every rejection is local to one action and leaves the engine untouched.
//! [`ErrorKind`] groups the concrete variants into the categories the
//! session layer reports to players.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionKind;
use super::player::PlayerId;
use crate::board::Point;

/// Coarse error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Not the actor's turn, or the game is over.
    Turn,
    /// Action kind not allowed in the current phase.
    Phase,
    /// Target point holds the wrong thing.
    Occupancy,
    /// Non-adjacent move without flying.
    Adjacency,
    /// Capture of a piece protected by a mill.
    Protection,
    /// Restart while the game is still running.
    Restart,
    /// Point index off the board.
    Range,
}

/// Why an action (or restart) was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("point index {0} is outside 0..24")]
    OutOfRange(u8),

    #[error("a mill was closed: capture an opponent piece instead of {attempted}")]
    CapturePending { attempted: ActionKind },

    #[error("cannot {attempted} while pieces are being placed")]
    PlacementPhase { attempted: ActionKind },

    #[error("cannot {attempted} while pieces are being moved")]
    MovementPhase { attempted: ActionKind },

    #[error("no pieces left to place")]
    NoPiecesInHand,

    #[error("point {0} is already occupied")]
    Occupied(Point),

    #[error("point {0} does not hold one of your pieces")]
    NotOwnPiece(Point),

    #[error("point {0} does not hold an opponent piece")]
    NotOpponentPiece(Point),

    #[error("point {to} is not adjacent to {from}")]
    NotAdjacent { from: Point, to: Point },

    #[error("piece at {0} is protected by a closed mill")]
    Protected(Point),

    #[error("the game is still in progress")]
    StillActive,
}

impl ActionError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ActionError::GameOver | ActionError::NotYourTurn(_) => ErrorKind::Turn,
            ActionError::OutOfRange(_) => ErrorKind::Range,
            ActionError::CapturePending { .. }
            | ActionError::PlacementPhase { .. }
            | ActionError::MovementPhase { .. }
            | ActionError::NoPiecesInHand => ErrorKind::Phase,
            ActionError::Occupied(_)
            | ActionError::NotOwnPiece(_)
            | ActionError::NotOpponentPiece(_) => ErrorKind::Occupancy,
            ActionError::NotAdjacent { .. } => ErrorKind::Adjacency,
            ActionError::Protected(_) => ErrorKind::Protection,
            ActionError::StillActive => ErrorKind::Restart,
        }
    }
}

/// Invalid [`GameConfig`](super::GameConfig) or match setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("players need at least one piece")]
    NoPieces,

    #[error("{pieces} pieces per player do not fit on a 24-point board")]
    TooManyPieces { pieces: u8 },

    #[error("min_pieces {min} must be between 1 and {pieces}")]
    MinPiecesOutOfRange { min: u8, pieces: u8 },

    #[error("flying_threshold {threshold} exceeds {pieces} pieces per player")]
    FlyingThresholdOutOfRange { threshold: u8, pieces: u8 },

    #[error("{0} cannot play against themselves")]
    DuplicatePlayer(PlayerId),
}

/// Snapshot encoding failure.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("snapshot codec error: {0}")]
    Bincode(#[from] bincode::Error),
}
