//! The match state machine.
//!
//! A `GameEngine` owns one board and two player records and changes only
//! through [`GameEngine::handle_action`], [`GameEngine::restart`] and the two
//! early-termination calls. Every guard runs before any mutation, so a
//! rejected call leaves the engine exactly as it was.
//!
//! ## Flow
//!
//! - While a capture is pending, only `Capture` is accepted.
//! - Otherwise `Setting` accepts only `Place` and `Moving` only `Move`.
//! - Closing a mill keeps the turn with the actor until the capture is made.
//! - Once both hands are empty the phase becomes `Moving` for good.
//! - After every move (and every capture outside `Setting`) the engine checks
//!   for a loss: too few pieces, or the next player blockaded.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::snapshot::Snapshot;
use crate::board::{is_adjacent, BoardState, Cell, Point};
use crate::core::{
    Action, ActionError, ActionRecord, Color, ConfigError, GameConfig, PlayerId, PlayerInfo,
    PlayerRecord, Seat, Seats,
};

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// At least one player still has pieces in hand.
    Setting,
    /// All pieces placed; pieces slide (or fly).
    Moving,
    GameOver,
}

/// Whether the current game accepts actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    GameOver,
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    #[serde(rename = "insufficient pieces")]
    InsufficientPieces,
    #[serde(rename = "blockade")]
    Blockade,
    #[serde(rename = "resignation")]
    Resignation,
    #[serde(rename = "abandoned")]
    Abandoned,
}

impl EndReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EndReason::InsufficientPieces => "insufficient pieces",
            EndReason::Blockade => "blockade",
            EndReason::Resignation => "resignation",
            EndReason::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` when the game was abandoned.
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == Some(player)
    }
}

/// What a successful action led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The turn passed to the opponent.
    TurnPassed,
    /// A mill closed; the actor must now capture.
    CaptureRequired,
    /// The action ended the game.
    GameOver(GameResult),
}

/// Rules engine for one match between two players.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    board: BoardState,
    players: Seats<PlayerRecord>,
    turn: Seat,
    phase: Phase,
    status: Status,
    waiting_for_capture: bool,
    winner: Option<Seat>,
    end_reason: Option<EndReason>,
    match_score: Seats<u32>,
    history: Vector<ActionRecord>,
}

impl GameEngine {
    /// Start a match under the standard rules. `a` plays White and moves first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicatePlayer`] if both players share an id.
    pub fn new(a: PlayerInfo, b: PlayerInfo) -> Result<Self, ConfigError> {
        Self::with_config(GameConfig::default(), a, b)
    }

    /// Start a match under custom rules.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config does not validate or both
    /// players share an id.
    pub fn with_config(config: GameConfig, a: PlayerInfo, b: PlayerInfo) -> Result<Self, ConfigError> {
        config.validate()?;
        if a.id == b.id {
            return Err(ConfigError::DuplicatePlayer(a.id));
        }

        let players = Seats::new(
            PlayerRecord::new(a, Seat::A, &config),
            PlayerRecord::new(b, Seat::B, &config),
        );

        Ok(Self {
            config,
            board: BoardState::new(),
            players,
            turn: Seat::A,
            phase: Phase::Setting,
            status: Status::Active,
            waiting_for_capture: false,
            winner: None,
            end_reason: None,
            match_score: Seats::with_value(0),
            history: Vector::new(),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &PlayerRecord {
        &self.players[seat]
    }

    #[must_use]
    pub fn players(&self) -> &Seats<PlayerRecord> {
        &self.players
    }

    /// Seat occupied by `player`, if they are part of this match.
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        self.players.position(|rec| rec.id == player)
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn turn_player(&self) -> PlayerId {
        self.players[self.turn].id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_waiting_for_capture(&self) -> bool {
        self.waiting_for_capture
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner.map(|seat| self.players[seat].id)
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Games won by `player` in this match, or `None` for a stranger.
    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.seat_of(player).map(|seat| self.match_score[seat])
    }

    #[must_use]
    pub fn match_score(&self) -> &Seats<u32> {
        &self.match_score
    }

    /// Actions applied since the current game started.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Whether the player in `seat` may currently fly.
    #[must_use]
    pub fn is_flying(&self, seat: Seat) -> bool {
        self.players[seat].is_flying(&self.config)
    }

    /// Read-only copy of the full state for transmission.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: *self.board.cells(),
            players: self.players.clone(),
            turn: self.turn_player(),
            phase: self.phase,
            status: self.status,
            winner: self.winner(),
            end_reason: self.end_reason,
            waiting_for_capture: self.waiting_for_capture,
            match_score: Seats::from_fn(|seat| (self.players[seat].id, self.match_score[seat])),
            history: self.history.clone(),
        }
    }

    // === Actions ===

    /// Apply one action from `actor`.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] and leaves the state untouched if the
    /// action is not legal right now.
    #[instrument(skip(self), fields(turn = %self.turn_player(), phase = ?self.phase))]
    pub fn handle_action(&mut self, actor: PlayerId, action: Action) -> Result<Outcome, ActionError> {
        let result = self.dispatch(actor, action);
        match &result {
            Ok(outcome) => {
                let sequence = self.history.len() as u32;
                self.history.push_back(ActionRecord {
                    player: actor,
                    action,
                    sequence,
                });
                debug!(?outcome, "action applied");
            }
            Err(error) => debug!(%error, kind = ?error.kind(), "action rejected"),
        }
        result
    }

    fn dispatch(&mut self, actor: PlayerId, action: Action) -> Result<Outcome, ActionError> {
        let seat = self.acting_seat(actor)?;
        for index in action.indices() {
            point(index)?;
        }

        if self.waiting_for_capture {
            return match action {
                Action::Capture { index } => self.capture(seat, point(index)?),
                other => Err(ActionError::CapturePending {
                    attempted: other.kind(),
                }),
            };
        }

        match (self.phase, action) {
            (Phase::Setting, Action::Place { index }) => self.place(seat, point(index)?),
            (Phase::Setting, other) => Err(ActionError::PlacementPhase {
                attempted: other.kind(),
            }),
            (Phase::Moving, Action::Move { from, to }) => self.move_piece(seat, point(from)?, point(to)?),
            (Phase::Moving, other) => Err(ActionError::MovementPhase {
                attempted: other.kind(),
            }),
            (Phase::GameOver, _) => Err(ActionError::GameOver),
        }
    }

    /// Entry guard shared by every action.
    fn acting_seat(&self, actor: PlayerId) -> Result<Seat, ActionError> {
        if self.status != Status::Active {
            return Err(ActionError::GameOver);
        }
        match self.seat_of(actor) {
            Some(seat) if seat == self.turn => Ok(seat),
            _ => Err(ActionError::NotYourTurn(actor)),
        }
    }

    fn place(&mut self, seat: Seat, target: Point) -> Result<Outcome, ActionError> {
        if !self.board.occupant(target).is_empty() {
            return Err(ActionError::Occupied(target));
        }
        if self.players[seat].unplaced_pieces == 0 {
            return Err(ActionError::NoPiecesInHand);
        }

        let color = seat.color();
        self.board.set_occupant(target, Cell::Occupied(color));
        let record = &mut self.players[seat];
        record.unplaced_pieces -= 1;
        record.pieces_on_board += 1;

        if let Some(outcome) = self.mill_closed(seat, target) {
            return Ok(outcome);
        }

        self.check_phase_transition();
        self.switch_turn();
        Ok(Outcome::TurnPassed)
    }

    fn move_piece(&mut self, seat: Seat, from: Point, to: Point) -> Result<Outcome, ActionError> {
        let color = seat.color();
        if !self.board.occupant(from).holds(color) {
            return Err(ActionError::NotOwnPiece(from));
        }
        if !self.board.occupant(to).is_empty() {
            return Err(ActionError::Occupied(to));
        }
        if !self.is_flying(seat) && !is_adjacent(from, to) {
            return Err(ActionError::NotAdjacent { from, to });
        }

        self.board.set_occupant(from, Cell::Empty);
        self.board.set_occupant(to, Cell::Occupied(color));

        if let Some(outcome) = self.mill_closed(seat, to) {
            return Ok(outcome);
        }

        if let Some(result) = self.check_loss() {
            return Ok(Outcome::GameOver(result));
        }
        self.switch_turn();
        Ok(Outcome::TurnPassed)
    }

    fn capture(&mut self, seat: Seat, target: Point) -> Result<Outcome, ActionError> {
        let opponent = seat.opponent();
        let opponent_color = opponent.color();
        if !self.board.occupant(target).holds(opponent_color) {
            return Err(ActionError::NotOpponentPiece(target));
        }
        if self.board.is_mill(target, opponent_color) && !self.board.all_pieces_in_mills(opponent_color) {
            return Err(ActionError::Protected(target));
        }

        self.board.set_occupant(target, Cell::Empty);
        self.players[opponent].pieces_on_board -= 1;
        self.waiting_for_capture = false;

        if self.phase != Phase::Setting {
            if let Some(result) = self.check_loss() {
                return Ok(Outcome::GameOver(result));
            }
        }

        self.check_phase_transition();
        self.switch_turn();
        Ok(Outcome::TurnPassed)
    }

    /// Flag a pending capture if the piece just landed on `point` closed a
    /// mill. An opponent with nothing on the board cannot be captured from,
    /// so no capture is pending then and the caller carries on as usual.
    fn mill_closed(&mut self, seat: Seat, point: Point) -> Option<Outcome> {
        if !self.board.is_mill(point, seat.color()) {
            return None;
        }
        if self.players[seat.opponent()].pieces_on_board == 0 {
            debug!(%point, "mill closed with nothing to capture");
            return None;
        }
        debug!(%point, player = %self.players[seat].id, "mill closed");
        self.waiting_for_capture = true;
        Some(Outcome::CaptureRequired)
    }

    fn check_phase_transition(&mut self) {
        if self.phase == Phase::Setting && self.players.iter().all(|(_, rec)| rec.unplaced_pieces == 0) {
            debug!("all pieces placed, moving phase begins");
            self.phase = Phase::Moving;
        }
    }

    /// Loss conditions, evaluated before the turn switches.
    fn check_loss(&mut self) -> Option<GameResult> {
        if let Some(loser) = self
            .players
            .position(|rec| rec.pieces_on_board < self.config.min_pieces)
        {
            return Some(self.end_game(Some(loser.opponent()), EndReason::InsufficientPieces));
        }

        let next = self.turn.opponent();
        if !self.board.has_legal_moves(next.color(), self.config.flying_threshold) {
            return Some(self.end_game(Some(self.turn), EndReason::Blockade));
        }
        None
    }

    fn end_game(&mut self, winner: Option<Seat>, reason: EndReason) -> GameResult {
        self.status = Status::GameOver;
        self.phase = Phase::GameOver;
        self.waiting_for_capture = false;
        self.winner = winner;
        self.end_reason = Some(reason);
        if let Some(seat) = winner {
            self.match_score[seat] += 1;
        }

        let result = GameResult {
            winner: self.winner(),
            reason,
        };
        info!(winner = ?result.winner, %reason, score = ?self.match_score, "game over");
        result
    }

    fn switch_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    // === Match control ===

    /// Concede the running game; the opponent wins.
    ///
    /// # Errors
    ///
    /// [`ActionError::GameOver`] if no game is running,
    /// [`ActionError::NotYourTurn`] if `actor` is not in this match.
    #[instrument(skip(self))]
    pub fn resign(&mut self, actor: PlayerId) -> Result<GameResult, ActionError> {
        if self.status != Status::Active {
            return Err(ActionError::GameOver);
        }
        let seat = self.seat_of(actor).ok_or(ActionError::NotYourTurn(actor))?;
        Ok(self.end_game(Some(seat.opponent()), EndReason::Resignation))
    }

    /// End the running game without a winner, e.g. when a participant leaves.
    /// Does nothing if the game is already over.
    pub fn abandon(&mut self) -> Option<GameResult> {
        if self.status != Status::Active {
            return None;
        }
        Some(self.end_game(None, EndReason::Abandoned))
    }

    /// Start the next game of the match.
    ///
    /// Clears the board and both hands, keeps the match score, and hands the
    /// first move to whoever did not hold the turn when the game ended.
    ///
    /// # Errors
    ///
    /// [`ActionError::StillActive`] if the current game has not ended.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), ActionError> {
        if self.status != Status::GameOver {
            return Err(ActionError::StillActive);
        }

        self.board = BoardState::new();
        for seat in Seat::BOTH {
            self.players[seat].reset(&self.config);
        }
        self.turn = self.turn.opponent();
        self.phase = Phase::Setting;
        self.status = Status::Active;
        self.waiting_for_capture = false;
        self.winner = None;
        self.end_reason = None;
        self.history = Vector::new();

        info!(first = %self.turn_player(), score = ?self.match_score, "game restarted");
        Ok(())
    }

    /// Color of the piece `player` plays, if they are in this match.
    #[must_use]
    pub fn color_of(&self, player: PlayerId) -> Option<Color> {
        self.seat_of(player).map(Seat::color)
    }
}

fn point(index: u8) -> Result<Point, ActionError> {
    Point::new(index).ok_or(ActionError::OutOfRange(index))
}
