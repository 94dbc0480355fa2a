//! Mutable occupancy of the 24 points.

use serde::{Deserialize, Serialize};

use super::topology::{adjacency, mills_through, Point, POINT_COUNT};
use crate::core::Color;

/// Content of one board slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub fn holds(self, color: Color) -> bool {
        self == Cell::Occupied(color)
    }
}

/// Occupancy for all 24 points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Cell; POINT_COUNT],
}

impl BoardState {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn occupant(&self, point: Point) -> Cell {
        self.cells[point.index()]
    }

    pub fn set_occupant(&mut self, point: Point, cell: Cell) {
        self.cells[point.index()] = cell;
    }

    /// All slots in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell; POINT_COUNT] {
        &self.cells
    }

    /// Points currently holding `color`.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.occupant(p).holds(color))
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        Point::all().filter(move |&p| self.occupant(p).is_empty())
    }

    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| c.holds(color)).count()
    }

    /// True if some mill line through `point` is fully held by `color`.
    #[must_use]
    pub fn is_mill(&self, point: Point, color: Color) -> bool {
        mills_through(point).any(|line| line.iter().all(|&p| self.occupant(p).holds(color)))
    }

    /// True if `color` has at least one piece and every one of them sits in a
    /// closed mill. Only then may milled pieces of that color be captured.
    #[must_use]
    pub fn all_pieces_in_mills(&self, color: Color) -> bool {
        let mut found = false;
        for point in self.pieces(color) {
            if !self.is_mill(point, color) {
                return false;
            }
            found = true;
        }
        found
    }

    /// True if some neighbour of `point` is empty.
    #[must_use]
    pub fn can_move(&self, point: Point) -> bool {
        adjacency(point)
            .as_slice()
            .iter()
            .any(|&n| self.occupant(n).is_empty())
    }

    /// True if `color` can make some move: a piece with an empty neighbour,
    /// or few enough pieces (`<= flying_threshold`) to fly.
    #[must_use]
    pub fn has_legal_moves(&self, color: Color, flying_threshold: u8) -> bool {
        let mut count = 0usize;
        for point in self.pieces(color) {
            if self.can_move(point) {
                return true;
            }
            count += 1;
        }
        count <= usize::from(flying_threshold)
    }
}
