//! **wayfind-core**: grid geometry and the board capability.
//!
//! This crate provides the types shared by the `wayfind` searches: the
//! [`Position`] and [`Direction`] primitives, the [`Board`] trait a grid
//! collaborator implements, and [`GridBoard`], an in-memory board with a
//! small text format.

pub mod board;
pub mod geom;
pub mod grid;

pub use board::{Board, DEFAULT_WEIGHT};
pub use geom::{Bounds, BoundsIter, Direction, Position};
pub use grid::{BoardEvent, GridBoard, GridError, Tile};
