//! Board topology and occupancy.
//!
//! - `topology`: the 24 points, their adjacency and the 16 mill lines
//!   (compile-time constants shared by every match)
//! - `state`: per-match occupancy and the mill/mobility queries built on it

pub mod state;
pub mod topology;

pub use state::{BoardState, Cell};
pub use topology::{adjacency, is_adjacent, mills_through, Neighbors, Point, MILLS, POINT_COUNT};
