//! Toroidal grid arithmetic.
//!
//! Opposite edges of the board are connected, so every coordinate produced by
//! movement or neighbour enumeration goes through [`Grid::wrap`].

use serde::{Deserialize, Serialize};

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour enumeration order used by pathfinding and the safety probe.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Inverse of [`Direction::delta`]. Anything that is not a unit step
    /// along exactly one axis yields `None`.
    pub fn from_delta(dx: i16, dy: i16) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// Square toroidal board of `tile_count` cells per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub tile_count: i16,
}

impl Grid {
    pub fn new(tile_count: i16) -> Self {
        Self { tile_count }
    }

    /// Map any coordinate into `[0, tile_count)`.
    pub fn wrap(&self, coordinate: i16) -> i16 {
        coordinate.rem_euclid(self.tile_count)
    }

    pub fn wrap_position(&self, pos: Position) -> Position {
        Position {
            x: self.wrap(pos.x),
            y: self.wrap(pos.y),
        }
    }

    /// The cell one step from `pos` in `dir`, wrapped.
    pub fn step(&self, pos: Position, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        self.wrap_position(Position {
            x: pos.x + dx,
            y: pos.y + dy,
        })
    }

    /// The four wrapped neighbours of `pos` in [`Direction::SEARCH_ORDER`].
    pub fn neighbors(&self, pos: Position) -> [Position; 4] {
        Direction::SEARCH_ORDER.map(|dir| self.step(pos, dir))
    }

    /// Signed shortest displacement from `from` to `to` along one axis.
    ///
    /// The direct delta is replaced by the wrap-around delta when it is longer
    /// than half the board.
    pub fn axis_delta(&self, from: i16, to: i16) -> i16 {
        let mut delta = self.wrap(to - from);
        if delta > self.tile_count / 2 {
            delta -= self.tile_count;
        }
        delta
    }

    /// Unsigned per-axis distance on the torus.
    pub fn axis_distance(&self, from: i16, to: i16) -> i16 {
        self.axis_delta(from, to).abs()
    }

    /// Manhattan distance on the torus.
    pub fn distance(&self, a: Position, b: Position) -> i16 {
        self.axis_distance(a.x, b.x) + self.axis_distance(a.y, b.y)
    }

    pub fn cell_count(&self) -> usize {
        self.tile_count as usize * self.tile_count as usize
    }

    /// Row-major index of an in-range position.
    pub fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.tile_count as usize + pos.x as usize
    }

    /// Every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tile_count)
            .flat_map(move |y| (0..self.tile_count).map(move |x| Position { x, y }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_into_range() {
        let grid = Grid::new(20);
        assert_eq!(grid.wrap(0), 0);
        assert_eq!(grid.wrap(19), 19);
        assert_eq!(grid.wrap(20), 0);
        assert_eq!(grid.wrap(-1), 19);
        assert_eq!(grid.wrap(-21), 19);
        assert_eq!(grid.wrap(45), 5);
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let grid = Grid::new(20);
        for c in -60..60 {
            assert_eq!(grid.wrap(grid.wrap(c)), grid.wrap(c));
        }
    }

    #[test]
    fn test_step_wraps_every_edge() {
        let grid = Grid::new(20);
        assert_eq!(grid.step(Position::new(19, 5), Direction::Right), Position::new(0, 5));
        assert_eq!(grid.step(Position::new(0, 5), Direction::Left), Position::new(19, 5));
        assert_eq!(grid.step(Position::new(5, 0), Direction::Up), Position::new(5, 19));
        assert_eq!(grid.step(Position::new(5, 19), Direction::Down), Position::new(5, 0));
    }

    #[test]
    fn test_neighbors_order() {
        let grid = Grid::new(20);
        let n = grid.neighbors(Position::new(0, 0));
        assert_eq!(
            n,
            [
                Position::new(1, 0),
                Position::new(19, 0),
                Position::new(0, 1),
                Position::new(0, 19),
            ]
        );
    }

    #[test]
    fn test_axis_delta_prefers_wraparound() {
        let grid = Grid::new(20);
        assert_eq!(grid.axis_delta(2, 5), 3);
        assert_eq!(grid.axis_delta(5, 2), -3);
        // 1 -> 18 is 17 cells directly but 3 cells the other way
        assert_eq!(grid.axis_delta(1, 18), -3);
        assert_eq!(grid.axis_delta(18, 1), 3);
        // Exactly half the board keeps the direct positive delta
        assert_eq!(grid.axis_delta(0, 10), 10);
    }

    #[test]
    fn test_distance() {
        let grid = Grid::new(20);
        assert_eq!(grid.distance(Position::new(0, 0), Position::new(19, 19)), 2);
        assert_eq!(grid.distance(Position::new(10, 10), Position::new(15, 15)), 10);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_delta_roundtrip() {
        for dir in Direction::SEARCH_ORDER {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(1, 1), None);
    }

    #[test]
    fn test_cells_cover_board() {
        let grid = Grid::new(5);
        let cells: Vec<Position> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(grid.index(cells[7]), 7);
    }
}
