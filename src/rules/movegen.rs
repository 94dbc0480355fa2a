//! Legal action enumeration.
//!
//! Lists exactly the actions `handle_action` would accept from a player in
//! the current state. Used by clients to highlight targets and by the
//! playout tests to drive random games.

use smallvec::SmallVec;

use super::engine::{GameEngine, Phase, Status};
use crate::board::{adjacency, Point};
use crate::core::{Action, PlayerId, Seat};

impl GameEngine {
    /// Every action `actor` may take right now. Empty when it is not their
    /// turn or the game is over.
    #[must_use]
    pub fn legal_actions(&self, actor: PlayerId) -> Vec<Action> {
        if self.status() != Status::Active || self.turn_player() != actor {
            return Vec::new();
        }
        let seat = self.turn();

        if self.is_waiting_for_capture() {
            return self.capture_targets(seat).into_iter().map(Action::capture).collect();
        }

        match self.phase() {
            Phase::Setting if self.player(seat).unplaced_pieces > 0 => {
                self.board().empty_points().map(Action::place).collect()
            }
            Phase::Moving => self
                .board()
                .pieces(seat.color())
                .flat_map(|from| {
                    self.destinations(seat, from)
                        .into_iter()
                        .map(move |to| Action::move_piece(from, to))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Opponent pieces the player in `seat` may remove after closing a mill.
    #[must_use]
    pub fn capture_targets(&self, seat: Seat) -> Vec<Point> {
        let color = seat.opponent().color();
        let board = self.board();
        let unprotected: Vec<Point> = board.pieces(color).filter(|&p| !board.is_mill(p, color)).collect();
        if unprotected.is_empty() {
            // Everything is milled (or nothing is left): any piece goes.
            board.pieces(color).collect()
        } else {
            unprotected
        }
    }

    /// Empty points the piece at `from` could reach this turn.
    #[must_use]
    pub fn destinations(&self, seat: Seat, from: Point) -> SmallVec<[Point; 4]> {
        let board = self.board();
        if self.is_flying(seat) {
            board.empty_points().collect()
        } else {
            adjacency(from)
                .as_slice()
                .iter()
                .copied()
                .filter(|&to| board.occupant(to).is_empty())
                .collect()
        }
    }
}
