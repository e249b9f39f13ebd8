//! Geometry primitives: [`Position`], [`Direction`] and [`Bounds`].
//!
//! Positions are (row, column) pairs. Rows grow down, columns grow right.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate on the grid.
///
/// Two positions are equal iff both components match, so `Position` is used
/// directly as a map and set key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The neighbouring position one step in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (drow, dcol) = dir.offset();
        self.shift(drow, dcol)
    }

    /// The four cardinal neighbours, in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors(self) -> [Position; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Whether `other` is one of the four cardinal neighbours of `self`.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

// --- trait impls for Position ---

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Add<Direction> for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Direction) -> Self {
        self.step(rhs)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four unit moves on the grid. There is no diagonal movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction, in the fixed order searches expand neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The (row, column) offset of this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid: `rows` × `cols` cells with the origin at (0, 0).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create new bounds. Negative sizes are clamped to zero.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: if rows < 0 { 0 } else { rows },
            cols: if cols < 0 { 0 } else { cols },
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the bounds hold no cell at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `p` lies inside the bounds.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Row-major index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(self, p: Position) -> Option<usize> {
        if self.contains(p) {
            Some((p.row as usize) * (self.cols as usize) + (p.col as usize))
        } else {
            None
        }
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: Position::ZERO,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Position;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the positions in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Position,
}

impl Iterator for BoundsIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.cur.row >= self.bounds.rows || self.bounds.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.bounds.cols {
            self.cur.col = 0;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.row >= self.bounds.rows {
            return (0, Some(0));
        }
        let w = self.bounds.cols as usize;
        let remaining_in_row = (self.bounds.cols - self.cur.col) as usize;
        let remaining_rows = (self.bounds.rows - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1, 2);
        let b = Position::new(3, 4);
        assert_eq!(a + b, Position::new(4, 6));
        assert_eq!(b - a, Position::new(2, 2));
        assert_eq!(a + Direction::Up, Position::new(0, 2));
        assert_eq!(a.shift(-1, 1), Position::new(0, 3));
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let p = Position::new(2, 2);
        assert_eq!(
            p.neighbors(),
            [
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn adjacency_is_four_connected() {
        let p = Position::new(1, 1);
        for n in p.neighbors() {
            assert!(p.is_adjacent(n));
            assert!(n.is_adjacent(p));
        }
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(2, 2)));
        assert!(!p.is_adjacent(Position::new(1, 3)));
    }

    #[test]
    fn direction_reverse_round_trips() {
        for d in Direction::ALL {
            assert_eq!(d.reverse().reverse(), d);
            assert_eq!(Position::ZERO.step(d).step(d.reverse()), Position::ZERO);
        }
    }

    #[test]
    fn positions_are_structural_keys() {
        let mut set = HashSet::new();
        set.insert(Position::new(1, 12));
        assert!(!set.contains(&Position::new(11, 2)));
        assert!(set.contains(&Position::new(1, 12)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn bounds_basics() {
        let b = Bounds::new(2, 3);
        assert_eq!(b.len(), 6);
        assert!(!b.is_empty());
        assert!(b.contains(Position::new(0, 0)));
        assert!(b.contains(Position::new(1, 2)));
        assert!(!b.contains(Position::new(2, 0)));
        assert!(!b.contains(Position::new(0, -1)));
        assert_eq!(b.index(Position::new(1, 1)), Some(4));
        assert_eq!(b.index(Position::new(0, 3)), None);
    }

    #[test]
    fn bounds_negative_is_empty() {
        let b = Bounds::new(-1, 4);
        assert!(b.is_empty());
        assert_eq!(b.iter().count(), 0);
    }

    #[test]
    fn bounds_iter_row_major() {
        let b = Bounds::new(2, 3);
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Position::new(0, 0));
        assert_eq!(pts[2], Position::new(0, 2));
        assert_eq!(pts[3], Position::new(1, 0));
        assert_eq!(pts[5], Position::new(1, 2));
    }

    #[test]
    fn bounds_iter_size_hint() {
        let b = Bounds::new(3, 4);
        let mut it = b.iter();
        assert_eq!(it.len(), 12);
        it.next();
        it.next();
        assert_eq!(it.len(), 10);
    }
}
