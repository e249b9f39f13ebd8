//! The [`Board`] capability consumed by the searches.
//!
//! A board answers occupancy and weight queries and receives progress
//! notifications. Rendering, pacing and editing live behind this trait; the
//! notification hooks default to no-ops so a board can be a plain data
//! structure.

use crate::geom::Position;

/// Weight of a floor cell that was never given one.
pub const DEFAULT_WEIGHT: u32 = 1;

/// Grid capability required by the searches.
pub trait Board {
    /// The start cell.
    fn start(&self) -> Position;

    /// The end cell.
    fn end(&self) -> Position;

    /// Whether `p` is inside the grid and not a wall.
    fn empty(&self, p: Position) -> bool;

    /// Traversal cost of `p`. Out-of-grid and wall cells report
    /// [`DEFAULT_WEIGHT`].
    fn weight(&self, p: Position) -> u32 {
        let _ = p;
        DEFAULT_WEIGHT
    }

    /// Every grid cell, walls included, in row-major order.
    fn cells(&self) -> Vec<Position>;

    /// Whether `p` is the start cell.
    fn is_start(&self, p: Position) -> bool {
        p == self.start()
    }

    /// Whether `p` is the end cell.
    fn is_end(&self, p: Position) -> bool {
        p == self.end()
    }

    /// `p` was added to the search frontier. May block.
    fn next(&mut self, p: Position) {
        let _ = p;
    }

    /// `p` was settled.
    fn found(&mut self, p: Position) {
        let _ = p;
    }

    /// One animation tick between expansions. May block.
    fn sleep(&mut self) {}
}

impl<B: Board + ?Sized> Board for &mut B {
    fn start(&self) -> Position {
        (**self).start()
    }

    fn end(&self) -> Position {
        (**self).end()
    }

    fn empty(&self, p: Position) -> bool {
        (**self).empty(p)
    }

    fn weight(&self, p: Position) -> u32 {
        (**self).weight(p)
    }

    fn cells(&self) -> Vec<Position> {
        (**self).cells()
    }

    fn is_start(&self, p: Position) -> bool {
        (**self).is_start(p)
    }

    fn is_end(&self, p: Position) -> bool {
        (**self).is_end(p)
    }

    fn next(&mut self, p: Position) {
        (**self).next(p)
    }

    fn found(&mut self, p: Position) {
        (**self).found(p)
    }

    fn sleep(&mut self) {
        (**self).sleep()
    }
}
