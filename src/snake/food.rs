//! Food placement.
//!
//! Food is sampled at random, rejecting cells on the snake and cells that
//! would box the snake in the moment it eats there. The danger check only
//! looks one move ahead; it does not prove the rest of the board stays
//! reachable.

use super::grid::{Grid, Position};
use rand::Rng;
use std::collections::VecDeque;

/// How a food cell was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Found by random sampling.
    Sampled,
    /// Sampling ran out; picked from an exhaustive scan of safe cells.
    Scanned,
    /// No safe cell exists; picked a free cell that may be fatal.
    Unsafe,
    /// The snake covers the board; the last sample was kept.
    BoardFull,
}

/// True if eating at `pos` would leave every neighbour covered by the
/// snake, counting `pos` itself as the new head.
pub fn is_danger_position(grid: &Grid, snake: &VecDeque<Position>, pos: Position) -> bool {
    grid.neighbors(pos)
        .iter()
        .all(|n| *n == pos || snake.contains(n))
}

fn is_valid_food(grid: &Grid, snake: &VecDeque<Position>, pos: Position) -> bool {
    !snake.contains(&pos) && !is_danger_position(grid, snake, pos)
}

/// Pick a food cell for the current snake.
///
/// Tries `attempts` uniform samples, then scans the whole board for safe
/// free cells, then for any free cell. Never blocks and never fails.
pub fn place_food<R: Rng>(
    grid: &Grid,
    snake: &VecDeque<Position>,
    attempts: u32,
    rng: &mut R,
) -> (Position, Placement) {
    let mut last = Position::new(0, 0);
    for _ in 0..attempts.max(1) {
        last = Position::new(
            rng.gen_range(0..grid.tile_count),
            rng.gen_range(0..grid.tile_count),
        );
        if is_valid_food(grid, snake, last) {
            return (last, Placement::Sampled);
        }
    }

    let safe: Vec<Position> = grid
        .cells()
        .filter(|&cell| is_valid_food(grid, snake, cell))
        .collect();
    if !safe.is_empty() {
        return (safe[rng.gen_range(0..safe.len())], Placement::Scanned);
    }

    let free: Vec<Position> = grid.cells().filter(|cell| !snake.contains(cell)).collect();
    if !free.is_empty() {
        return (free[rng.gen_range(0..free.len())], Placement::Unsafe);
    }

    (last, Placement::BoardFull)
}
