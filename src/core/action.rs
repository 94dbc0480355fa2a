//! Player actions as submitted by the session layer.
//!
//! Indices arrive as raw `u8` values straight off the wire; the engine checks
//! them against the board before using them. Constructors taking [`Point`]
//! are provided for callers that already hold validated points.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::Point;

/// A single game action.
///
/// ## Example
///
/// ```
/// use morris_engine::core::{Action, ActionKind};
///
/// let action = Action::Move { from: 1, to: 9 };
/// assert_eq!(action.kind(), ActionKind::Move);
/// assert_eq!(action.indices().as_slice(), &[1, 9]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Put a piece from hand on an empty point.
    Place { index: u8 },
    /// Slide (or fly) one of your pieces to an empty point.
    Move { from: u8, to: u8 },
    /// Remove an opponent piece after closing a mill.
    Capture { index: u8 },
}

/// Action discriminant, used in phase errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Place,
    Move,
    Capture,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Place => f.write_str("place"),
            ActionKind::Move => f.write_str("move"),
            ActionKind::Capture => f.write_str("capture"),
        }
    }
}

impl Action {
    #[must_use]
    pub fn place(point: Point) -> Self {
        Action::Place { index: point.raw() }
    }

    #[must_use]
    pub fn move_piece(from: Point, to: Point) -> Self {
        Action::Move {
            from: from.raw(),
            to: to.raw(),
        }
    }

    #[must_use]
    pub fn capture(point: Point) -> Self {
        Action::Capture { index: point.raw() }
    }

    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Place { .. } => ActionKind::Place,
            Action::Move { .. } => ActionKind::Move,
            Action::Capture { .. } => ActionKind::Capture,
        }
    }

    /// Raw point indices referenced by this action, in field order.
    #[must_use]
    pub fn indices(&self) -> SmallVec<[u8; 2]> {
        match *self {
            Action::Place { index } | Action::Capture { index } => SmallVec::from_slice(&[index]),
            Action::Move { from, to } => SmallVec::from_slice(&[from, to]),
        }
    }
}

/// A successfully applied action, kept in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted.
    pub player: PlayerId,
    /// What they did.
    pub action: Action,
    /// Position in the history of the current game (starts at 0).
    pub sequence: u32,
}
