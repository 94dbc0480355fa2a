//! Read-only view of a match for broadcasting.
//!
//! A `Snapshot` is a detached value: nothing done to it reaches the engine.
//! Cloning is cheap because the action history is an `im::Vector`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::engine::{EndReason, Phase, Status};
use crate::board::{Cell, POINT_COUNT};
use crate::core::{ActionRecord, CodecError, PlayerId, PlayerRecord, Seats};

/// Full match state at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: [Cell; POINT_COUNT],
    pub players: Seats<PlayerRecord>,
    /// Player to act next.
    pub turn: PlayerId,
    pub phase: Phase,
    pub status: Status,
    pub winner: Option<PlayerId>,
    pub end_reason: Option<EndReason>,
    pub waiting_for_capture: bool,
    /// Games won per player across restarts.
    pub match_score: Seats<(PlayerId, u32)>,
    /// Actions of the current game, oldest first.
    pub history: Vector<ActionRecord>,
}

impl Snapshot {
    /// Binary encoding for the wire.
    ///
    /// # Errors
    ///
    /// Propagates any `bincode` serialization failure.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    /// Inverse of [`Snapshot::encode`].
    ///
    /// # Errors
    ///
    /// Fails on truncated or malformed input.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Wins recorded for `player`, if they are in the match.
    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.match_score
            .iter()
            .find(|(_, (id, _))| *id == player)
            .map(|(_, (_, score))| *score)
    }
}
