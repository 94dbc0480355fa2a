//! Player identification, seats and per-seat data storage.
//!
//! ## PlayerId
//!
//! Opaque identity handed in by the session layer.
//!
//! ## Seat / Seats
//!
//! A match always has exactly two seats. Seat `A` is the first-listed player,
//! plays White and moves first in the opening game. `Seats<T>` stores one value
//! per seat as two named fields, so nothing depends on map insertion order.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::GameConfig;

/// Identity of a participant, assigned by the session layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identity value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Piece color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// One of the two seats at a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// First-listed player, White.
    A,
    /// Second-listed player, Black.
    B,
}

impl Seat {
    /// Both seats in a fixed order (A first).
    pub const BOTH: [Seat; 2] = [Seat::A, Seat::B];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Color assigned to this seat. Fixed for the lifetime of a match.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Seat::A => Color::White,
            Seat::B => Color::Black,
        }
    }
}

/// Per-seat storage with one named field per seat.
///
/// ## Example
///
/// ```
/// use morris_engine::core::{Seat, Seats};
///
/// let mut score: Seats<u32> = Seats::with_value(0);
/// score[Seat::B] += 1;
/// assert_eq!(score[Seat::A], 0);
/// assert_eq!(score[Seat::B], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seats<T> {
    pub a: T,
    pub b: T,
}

impl<T> Seats<T> {
    /// Create from explicit values.
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            a: factory(Seat::A),
            b: factory(Seat::B),
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            a: value.clone(),
            b: value,
        }
    }

    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::A => &self.a,
            Seat::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::A => &mut self.a,
            Seat::B => &mut self.b,
        }
    }

    /// Iterate over (Seat, &T) pairs, seat A first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        [(Seat::A, &self.a), (Seat::B, &self.b)].into_iter()
    }

    /// Find the seat whose value satisfies the predicate, checking A first.
    pub fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Seat> {
        Seat::BOTH.into_iter().find(|&seat| predicate(self.get(seat)))
    }
}

impl<T> Index<Seat> for Seats<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for Seats<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// What the session layer knows about a participant when a match is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A participant's record inside one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub color: Color,
    /// Pieces still in hand. Never increases until restart.
    pub unplaced_pieces: u8,
    /// Pieces currently on the board.
    pub pieces_on_board: u8,
}

impl PlayerRecord {
    /// Fresh record for a seat: every piece in hand, none on the board.
    #[must_use]
    pub fn new(info: PlayerInfo, seat: Seat, config: &GameConfig) -> Self {
        Self {
            id: info.id,
            name: info.name,
            color: seat.color(),
            unplaced_pieces: config.pieces_per_player,
            pieces_on_board: 0,
        }
    }

    /// Put every piece back in hand.
    pub fn reset(&mut self, config: &GameConfig) {
        self.unplaced_pieces = config.pieces_per_player;
        self.pieces_on_board = 0;
    }

    /// Flying is derived from the counts every time, never cached.
    #[must_use]
    pub fn is_flying(&self, config: &GameConfig) -> bool {
        self.unplaced_pieces == 0 && self.pieces_on_board <= config.flying_threshold
    }

    /// Pieces removed by the opponent so far.
    #[must_use]
    pub fn captured(&self, config: &GameConfig) -> u8 {
        config
            .pieces_per_player
            .saturating_sub(self.unplaced_pieces + self.pieces_on_board)
    }
}
