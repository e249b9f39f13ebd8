//! Random boards for the demos.

use rand::prelude::*;
use wayfind_core::{Board, Bounds, GridBoard, GridError, Position, Tile};

/// Turn each floor cell into a wall with probability `density`.
///
/// The start and end cells are left open. Returns the number of walls
/// placed.
pub fn scatter_walls(grid: &mut GridBoard, rng: &mut impl Rng, density: f64) -> usize {
    let density = density.clamp(0.0, 1.0);
    let mut placed = 0;
    for p in grid.cells() {
        if grid.is_start(p) || grid.is_end(p) || grid.tile(p) == Some(Tile::Wall) {
            continue;
        }
        if rng.random_bool(density) && grid.set_wall(p).is_ok() {
            placed += 1;
        }
    }
    placed
}

/// Give each floor cell a random weight in `2..=max_weight` with
/// probability `chance`. Returns the number of cells reweighted.
pub fn scatter_weights(
    grid: &mut GridBoard,
    rng: &mut impl Rng,
    chance: f64,
    max_weight: u32,
) -> usize {
    if max_weight < 2 {
        return 0;
    }
    let chance = chance.clamp(0.0, 1.0);
    let mut placed = 0;
    for p in grid.cells() {
        if !grid.empty(p) || grid.is_start(p) || grid.is_end(p) {
            continue;
        }
        if rng.random_bool(chance) {
            let w = rng.random_range(2..=max_weight);
            if grid.set_weight(p, w).is_ok() {
                placed += 1;
            }
        }
    }
    placed
}

/// Parameters for [`random_board`].
#[derive(Debug, Clone, Copy)]
pub struct BoardSpec {
    pub rows: i32,
    pub cols: i32,
    pub wall_density: f64,
    pub weight_chance: f64,
    pub max_weight: u32,
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 40,
            wall_density: 0.25,
            weight_chance: 0.0,
            max_weight: 9,
        }
    }
}

/// A board with the start in the top-left corner, the end in the
/// bottom-right one and random walls and weights in between.
pub fn random_board(spec: &BoardSpec, rng: &mut impl Rng) -> Result<GridBoard, GridError> {
    let bounds = Bounds::new(spec.rows, spec.cols);
    let start = Position::new(0, 0);
    let end = Position::new(spec.rows - 1, spec.cols - 1);
    let mut grid = GridBoard::new(bounds, start, end)?;
    scatter_walls(&mut grid, rng, spec.wall_density);
    scatter_weights(&mut grid, rng, spec.weight_chance, spec.max_weight);
    Ok(grid)
}
