//! Fixed board layout: 24 points on three concentric squares.
//!
//! Point `index` sits on ring `index / 8` (0 = outer) at position
//! `index % 8`, counted clockwise from the top-left corner. Even positions
//! are corners, odd positions are side midpoints.
//!
//! ```text
//!  0-----------1-----------2
//!  |           |           |
//!  |   8-------9------10   |
//!  |   |       |       |   |
//!  |   |  16--17--18   |   |
//!  |   |   |       |   |   |
//!  7--15--23      19--11---3
//!  |   |   |       |   |   |
//!  |   |  22--21--20   |   |
//!  |   |       |       |   |
//!  |  14------13------12   |
//!  |           |           |
//!  6-----------5-----------4
//! ```
//!
//! Both the adjacency table and the per-point mill index are computed at
//! compile time.

use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Number of rings.
pub const RING_COUNT: usize = 3;

/// Points per ring.
pub const RING_SIZE: usize = 8;

/// A board point, always in `0..24`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Point(u8);

impl Point {
    /// Create a point, or `None` if `index` is off the board.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < POINT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Slot index into the board.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn ring(self) -> usize {
        self.index() / RING_SIZE
    }

    /// Corners have two neighbours; midpoints three or four.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        self.index() % 2 == 0
    }

    /// Every point, in index order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..POINT_COUNT as u8).map(Point)
    }
}

impl TryFrom<u8> for Point {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Point::new(index).ok_or(index)
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 16 mill lines.
pub const MILLS: [[Point; 3]; 16] = [
    // top sides
    [Point(0), Point(1), Point(2)],
    [Point(8), Point(9), Point(10)],
    [Point(16), Point(17), Point(18)],
    // bottom sides
    [Point(6), Point(5), Point(4)],
    [Point(14), Point(13), Point(12)],
    [Point(22), Point(21), Point(20)],
    // left sides
    [Point(0), Point(7), Point(6)],
    [Point(8), Point(15), Point(14)],
    [Point(16), Point(23), Point(22)],
    // right sides
    [Point(2), Point(3), Point(4)],
    [Point(10), Point(11), Point(12)],
    [Point(18), Point(19), Point(20)],
    // cross lines through the midpoints
    [Point(1), Point(9), Point(17)],
    [Point(5), Point(13), Point(21)],
    [Point(7), Point(15), Point(23)],
    [Point(3), Point(11), Point(19)],
];

/// Adjacent points of a single point. At most four.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    points: [Point; 4],
    len: u8,
}

impl Neighbors {
    const EMPTY: Self = Self {
        points: [Point(0); 4],
        len: 0,
    };

    const fn with(mut self, point: usize) -> Self {
        self.points[self.len as usize] = Point(point as u8);
        self.len += 1;
        self
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.len as usize]
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.as_slice().contains(&point)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

const fn build_adjacency() -> [Neighbors; POINT_COUNT] {
    let mut table = [Neighbors::EMPTY; POINT_COUNT];
    let mut index = 0;
    while index < POINT_COUNT {
        let ring = index / RING_SIZE;
        let pos = index % RING_SIZE;
        let base = ring * RING_SIZE;

        let mut n = Neighbors::EMPTY
            .with(base + (pos + 1) % RING_SIZE)
            .with(base + (pos + RING_SIZE - 1) % RING_SIZE);

        if pos % 2 == 1 {
            if ring > 0 {
                n = n.with((ring - 1) * RING_SIZE + pos);
            }
            if ring < RING_COUNT - 1 {
                n = n.with((ring + 1) * RING_SIZE + pos);
            }
        }

        table[index] = n;
        index += 1;
    }
    table
}

/// Every point lies on exactly two mill lines.
const fn build_mills_by_point() -> [[usize; 2]; POINT_COUNT] {
    let mut table = [[0usize; 2]; POINT_COUNT];
    let mut filled = [0usize; POINT_COUNT];
    let mut mill = 0;
    while mill < MILLS.len() {
        let mut slot = 0;
        while slot < 3 {
            let p = MILLS[mill][slot].index();
            table[p][filled[p]] = mill;
            filled[p] += 1;
            slot += 1;
        }
        mill += 1;
    }
    table
}

static ADJACENCY: [Neighbors; POINT_COUNT] = build_adjacency();
static MILLS_BY_POINT: [[usize; 2]; POINT_COUNT] = build_mills_by_point();

/// Points connected to `point` by a line segment.
#[must_use]
pub fn adjacency(point: Point) -> &'static Neighbors {
    &ADJACENCY[point.index()]
}

#[must_use]
pub fn is_adjacent(from: Point, to: Point) -> bool {
    adjacency(from).contains(to)
}

/// The two mill lines passing through `point`.
pub fn mills_through(point: Point) -> impl Iterator<Item = &'static [Point; 3]> {
    MILLS_BY_POINT[point.index()].iter().map(|&m| &MILLS[m])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> Point {
        Point::new(i).unwrap()
    }

    #[test]
    fn test_point_range() {
        assert!(Point::new(0).is_some());
        assert!(Point::new(23).is_some());
        assert!(Point::new(24).is_none());
        assert_eq!(Point::try_from(200u8), Err(200));
        assert_eq!(Point::all().count(), POINT_COUNT);
    }

    #[test]
    fn test_point_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<Point>("5").unwrap(), p(5));
        assert!(serde_json::from_str::<Point>("24").is_err());
    }

    #[test]
    fn test_corner_neighbors() {
        assert_eq!(adjacency(p(0)).as_slice(), &[p(1), p(7)]);
        assert_eq!(adjacency(p(10)).as_slice(), &[p(11), p(9)]);
        for point in Point::all().filter(|pt| pt.is_corner()) {
            assert_eq!(adjacency(point).len(), 2, "corner {point}");
        }
    }

    #[test]
    fn test_midpoint_neighbors() {
        // Outer and inner ring midpoints have three neighbours.
        assert_eq!(adjacency(p(1)).as_slice(), &[p(2), p(0), p(9)]);
        assert_eq!(adjacency(p(17)).as_slice(), &[p(18), p(16), p(9)]);
        // Middle ring midpoints connect both ways.
        assert_eq!(adjacency(p(9)).as_slice(), &[p(10), p(8), p(1), p(17)]);
        assert_eq!(adjacency(p(15)).len(), 4);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for a in Point::all() {
            for &b in adjacency(a).as_slice() {
                assert!(is_adjacent(b, a), "{a} -> {b} not mirrored");
            }
        }
    }

    #[test]
    fn test_edge_count() {
        let degree_sum: usize = Point::all().map(|pt| adjacency(pt).len()).sum();
        // 24 ring segments + 8 cross segments, counted from both ends.
        assert_eq!(degree_sum, 64);
    }

    #[test]
    fn test_every_point_on_two_mills() {
        for point in Point::all() {
            let lines: Vec<_> = mills_through(point).collect();
            assert_eq!(lines.len(), 2);
            assert!(lines.iter().all(|line| line.contains(&point)));
            assert_ne!(lines[0], lines[1]);
        }
    }

    #[test]
    fn test_mill_lines_are_connected() {
        for line in &MILLS {
            assert!(is_adjacent(line[0], line[1]));
            assert!(is_adjacent(line[1], line[2]));
        }
    }
}
