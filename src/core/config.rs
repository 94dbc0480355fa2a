//! Rules configuration.
//!
//! The defaults are the standard Nine Men's Morris rules. Other values are
//! accepted as long as the 24-point board can host them.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::board::POINT_COUNT;

/// Rules parameters for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pieces each player starts with in hand (default: 9).
    pub pieces_per_player: u8,

    /// A player with this many pieces or fewer on the board, and none in
    /// hand, may fly to any empty point (default: 3).
    pub flying_threshold: u8,

    /// Dropping below this many pieces on the board loses the game once
    /// placement is over (default: 3).
    pub min_pieces: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pieces_per_player: 9,
            flying_threshold: 3,
            min_pieces: 3,
        }
    }
}

impl GameConfig {
    /// Set pieces per player.
    pub fn with_pieces_per_player(mut self, pieces: u8) -> Self {
        self.pieces_per_player = pieces;
        self
    }

    /// Set the flying threshold. Zero disables flying.
    pub fn with_flying_threshold(mut self, threshold: u8) -> Self {
        self.flying_threshold = threshold;
        self
    }

    /// Set the minimum piece count below which a player loses.
    pub fn with_min_pieces(mut self, min: u8) -> Self {
        self.min_pieces = min;
        self
    }

    /// Check the configuration fits the board.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pieces_per_player == 0 {
            return Err(ConfigError::NoPieces);
        }
        if usize::from(self.pieces_per_player) * 2 > POINT_COUNT {
            return Err(ConfigError::TooManyPieces {
                pieces: self.pieces_per_player,
            });
        }
        if self.min_pieces == 0 || self.min_pieces > self.pieces_per_player {
            return Err(ConfigError::MinPiecesOutOfRange {
                min: self.min_pieces,
                pieces: self.pieces_per_player,
            });
        }
        if self.flying_threshold > self.pieces_per_player {
            return Err(ConfigError::FlyingThresholdOutOfRange {
                threshold: self.flying_threshold,
                pieces: self.pieces_per_player,
            });
        }
        Ok(())
    }
}
