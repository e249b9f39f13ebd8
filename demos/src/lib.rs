//! Shared pieces of the `wayfind` demos: random boards and a terminal
//! board that animates a running search.

pub mod mapgen;
pub mod terminal;

pub use mapgen::{BoardSpec, random_board, scatter_walls, scatter_weights};
pub use terminal::TerminalBoard;
