//! An in-memory [`Board`]: a rectangular grid of [`Tile`]s.
//!
//! [`GridBoard`] can be built programmatically or parsed from text, one line
//! per row:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | floor with [`DEFAULT_WEIGHT`] |
//! | `#` | wall |
//! | `1`–`9` | floor with that weight |
//! | `S` | start cell |
//! | `E` | end cell |
//!
//! The board records every notification it receives as a [`BoardEvent`], so
//! a finished search can be replayed or inspected.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, DEFAULT_WEIGHT};
use crate::geom::{Bounds, Position};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    /// Walkable cell with a traversal weight.
    Floor(u32),
    Wall,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Floor(DEFAULT_WEIGHT)
    }
}

/// A notification received through the [`Board`] hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardEvent {
    Queued(Position),
    Found(Position),
    Tick,
}

/// Errors from building or editing a [`GridBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The text contains no cell.
    Empty,
    /// A row has a different width than the first one.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Unknown character in the text format.
    InvalidChar { ch: char, pos: Position },
    MissingStart,
    MissingEnd,
    DuplicateStart(Position),
    DuplicateEnd(Position),
    /// A position outside the grid.
    OutOfBounds(Position),
    /// Start and end cells cannot be walled.
    Reserved(Position),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid has no cells"),
            GridError::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(f, "line {line} has width {found}, expected {expected}"),
            GridError::InvalidChar { ch, pos } => {
                write!(f, "invalid character '{ch}' at {pos}")
            }
            GridError::MissingStart => write!(f, "grid has no start cell"),
            GridError::MissingEnd => write!(f, "grid has no end cell"),
            GridError::DuplicateStart(p) => write!(f, "second start cell at {p}"),
            GridError::DuplicateEnd(p) => write!(f, "second end cell at {p}"),
            GridError::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            GridError::Reserved(p) => write!(f, "position {p} is the start or end cell"),
        }
    }
}

impl std::error::Error for GridError {}

/// A grid board with fixed start and end cells.
#[derive(Debug, Clone)]
pub struct GridBoard {
    bounds: Bounds,
    tiles: Vec<Tile>,
    start: Position,
    end: Position,
    events: Vec<BoardEvent>,
}

impl GridBoard {
    /// Create an all-floor board.
    pub fn new(bounds: Bounds, start: Position, end: Position) -> Result<Self, GridError> {
        if bounds.is_empty() {
            return Err(GridError::Empty);
        }
        for p in [start, end] {
            if !bounds.contains(p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        Ok(Self {
            bounds,
            tiles: vec![Tile::default(); bounds.len()],
            start,
            end,
            events: Vec::new(),
        })
    }

    /// Parse a board from its text form. See the module docs for the format.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let mut tiles = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut width: Option<usize> = None;
        let mut rows = 0;

        for (row, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut cols = 0;
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row as i32, col as i32);
                let tile = match ch {
                    '.' => Tile::default(),
                    '#' => Tile::Wall,
                    '1'..='9' => Tile::Floor(ch as u32 - '0' as u32),
                    'S' => {
                        if start.replace(pos).is_some() {
                            return Err(GridError::DuplicateStart(pos));
                        }
                        Tile::default()
                    }
                    'E' => {
                        if end.replace(pos).is_some() {
                            return Err(GridError::DuplicateEnd(pos));
                        }
                        Tile::default()
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                };
                tiles.push(tile);
                cols += 1;
            }
            match width {
                None => width = Some(cols),
                Some(expected) if expected != cols => {
                    return Err(GridError::InconsistentWidth {
                        line: row,
                        expected,
                        found: cols,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = width.unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            bounds: Bounds::new(rows as i32, cols as i32),
            tiles,
            start: start.ok_or(GridError::MissingStart)?,
            end: end.ok_or(GridError::MissingEnd)?,
            events: Vec::new(),
        })
    }

    /// The grid extent.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn tile(&self, p: Position) -> Option<Tile> {
        self.bounds.index(p).map(|i| self.tiles[i])
    }

    /// Replace the tile at `p`.
    pub fn set_tile(&mut self, p: Position, tile: Tile) -> Result<(), GridError> {
        let i = self.bounds.index(p).ok_or(GridError::OutOfBounds(p))?;
        if tile == Tile::Wall && (p == self.start || p == self.end) {
            return Err(GridError::Reserved(p));
        }
        self.tiles[i] = tile;
        Ok(())
    }

    /// Turn `p` into a wall.
    pub fn set_wall(&mut self, p: Position) -> Result<(), GridError> {
        self.set_tile(p, Tile::Wall)
    }

    /// Turn `p` into floor with the given weight.
    pub fn set_weight(&mut self, p: Position, weight: u32) -> Result<(), GridError> {
        self.set_tile(p, Tile::Floor(weight))
    }

    /// Number of wall tiles.
    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|t| **t == Tile::Wall).count()
    }

    /// Notifications received so far, oldest first.
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Forget all recorded notifications.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Draw the board back to text, marking `path` cells with `*`.
    pub fn render(&self, path: &[Position]) -> String {
        let mut out = String::with_capacity(self.bounds.len() + self.bounds.rows as usize);
        for p in self.bounds.iter() {
            if p.col == 0 && p.row > 0 {
                out.push('\n');
            }
            out.push(self.glyph(p, path));
        }
        out
    }

    fn glyph(&self, p: Position, path: &[Position]) -> char {
        if p == self.start {
            return 'S';
        }
        if p == self.end {
            return 'E';
        }
        if path.contains(&p) {
            return '*';
        }
        match self.tile(p) {
            Some(Tile::Wall) | None => '#',
            Some(Tile::Floor(w)) if w == DEFAULT_WEIGHT => '.',
            Some(Tile::Floor(w)) => char::from_digit(w.min(9), 10).unwrap_or('.'),
        }
    }
}

impl FromStr for GridBoard {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

impl Board for GridBoard {
    fn start(&self) -> Position {
        self.start
    }

    fn end(&self) -> Position {
        self.end
    }

    fn empty(&self, p: Position) -> bool {
        matches!(self.tile(p), Some(Tile::Floor(_)))
    }

    fn weight(&self, p: Position) -> u32 {
        match self.tile(p) {
            Some(Tile::Floor(w)) => w,
            _ => DEFAULT_WEIGHT,
        }
    }

    fn cells(&self) -> Vec<Position> {
        self.bounds.iter().collect()
    }

    fn next(&mut self, p: Position) {
        self.events.push(BoardEvent::Queued(p));
    }

    fn found(&mut self, p: Position) {
        self.events.push(BoardEvent::Found(p));
    }

    fn sleep(&mut self) {
        self.events.push(BoardEvent::Tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
S..#
.#2.
...E";

    #[test]
    fn parse_room() {
        let b = GridBoard::parse(ROOM).unwrap();
        assert_eq!(b.bounds(), Bounds::new(3, 4));
        assert_eq!(b.start(), Position::new(0, 0));
        assert_eq!(b.end(), Position::new(2, 3));
        assert_eq!(b.tile(Position::new(0, 3)), Some(Tile::Wall));
        assert_eq!(b.tile(Position::new(1, 2)), Some(Tile::Floor(2)));
        assert_eq!(b.wall_count(), 2);
    }

    #[test]
    fn emptiness_and_weight() {
        let b: GridBoard = ROOM.parse().unwrap();
        assert!(b.empty(Position::new(0, 1)));
        assert!(!b.empty(Position::new(1, 1)));
        assert!(!b.empty(Position::new(-1, 0)));
        assert!(!b.empty(Position::new(3, 0)));
        assert_eq!(b.weight(Position::new(1, 2)), 2);
        assert_eq!(b.weight(Position::new(0, 1)), DEFAULT_WEIGHT);
        assert_eq!(b.weight(Position::new(9, 9)), DEFAULT_WEIGHT);
    }

    #[test]
    fn cells_cover_whole_grid() {
        let b = GridBoard::parse(ROOM).unwrap();
        let cells = b.cells();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[11], Position::new(2, 3));
    }

    #[test]
    fn render_round_trips_text() {
        let b = GridBoard::parse(ROOM).unwrap();
        assert_eq!(b.to_string(), ROOM);
    }

    #[test]
    fn render_marks_path() {
        let b = GridBoard::parse("S.E").unwrap();
        assert_eq!(b.render(&[Position::new(0, 1)]), "S*E");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(GridBoard::parse(""), Err(GridError::Empty)));
        assert!(matches!(GridBoard::parse("\n\n"), Err(GridError::Empty)));
        assert!(matches!(
            GridBoard::parse("S.\n.E."),
            Err(GridError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            })
        ));
        assert!(matches!(
            GridBoard::parse("S?E"),
            Err(GridError::InvalidChar { ch: '?', .. })
        ));
        assert!(matches!(
            GridBoard::parse("..E"),
            Err(GridError::MissingStart)
        ));
        assert!(matches!(GridBoard::parse("S.."), Err(GridError::MissingEnd)));
        assert!(matches!(
            GridBoard::parse("S.S\n..E"),
            Err(GridError::DuplicateStart(p)) if p == Position::new(0, 2)
        ));
        assert!(matches!(
            GridBoard::parse("SEE"),
            Err(GridError::DuplicateEnd(_))
        ));
    }

    #[test]
    fn editing() {
        let mut b =
            GridBoard::new(Bounds::new(2, 2), Position::new(0, 0), Position::new(1, 1)).unwrap();
        b.set_wall(Position::new(0, 1)).unwrap();
        b.set_weight(Position::new(1, 0), 5).unwrap();
        assert!(!b.empty(Position::new(0, 1)));
        assert_eq!(b.weight(Position::new(1, 0)), 5);
        assert_eq!(
            b.set_wall(Position::new(0, 0)),
            Err(GridError::Reserved(Position::new(0, 0)))
        );
        assert_eq!(
            b.set_wall(Position::new(2, 0)),
            Err(GridError::OutOfBounds(Position::new(2, 0)))
        );
        assert_eq!(b.to_string(), "S#\n5E");
    }

    #[test]
    fn new_rejects_outside_endpoints() {
        let err = GridBoard::new(Bounds::new(2, 2), Position::new(0, 0), Position::new(2, 2))
            .unwrap_err();
        assert_eq!(err, GridError::OutOfBounds(Position::new(2, 2)));
        assert_eq!(err.to_string(), "position (2, 2) is outside the grid");
    }

    #[test]
    fn hooks_are_journaled() {
        let mut b = GridBoard::parse("S.E").unwrap();
        b.next(Position::new(0, 1));
        b.found(Position::new(0, 1));
        b.sleep();
        assert_eq!(
            b.events(),
            &[
                BoardEvent::Queued(Position::new(0, 1)),
                BoardEvent::Found(Position::new(0, 1)),
                BoardEvent::Tick,
            ]
        );
        b.clear_events();
        assert!(b.events().is_empty());
    }
}
