//! Autoplay: choose the next direction without a player.
//!
//! With collision avoidance on, the snake follows a breadth-first shortest
//! path to the food over free cells. When the food is walled off, it picks
//! the direction with the longest straight run before it would hit itself.
//! Without avoidance it simply heads for the food along the longer axis.

use super::grid::{Direction, Grid, Position};
use super::types::GameSession;
use std::collections::{HashSet, VecDeque};

/// Outcome of one autoplay decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// Cell being steered toward, if the decision came from a target.
    pub target: Option<Position>,
}

/// Breadth-first search from `start` to `goal` on the torus.
///
/// Cells covered by `snake` are impassable. Returns the path excluding
/// `start` and including `goal`, or an empty vector when the goal cannot be
/// reached. Neighbours are expanded right, left, down, up; the first
/// shortest path discovered wins.
pub fn find_safe_path(
    grid: &Grid,
    snake: &VecDeque<Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let start = grid.wrap_position(start);
    let goal = grid.wrap_position(goal);
    if start == goal {
        return Vec::new();
    }

    let mut blocked = vec![false; grid.cell_count()];
    for seg in snake {
        blocked[grid.index(grid.wrap_position(*seg))] = true;
    }

    let mut visited = vec![false; grid.cell_count()];
    let mut parent: Vec<Option<Position>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    visited[grid.index(start)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if pos == goal {
            break;
        }
        for next in grid.neighbors(pos) {
            let idx = grid.index(next);
            if visited[idx] || blocked[idx] {
                continue;
            }
            visited[idx] = true;
            parent[idx] = Some(pos);
            queue.push_back(next);
        }
    }

    if !visited[grid.index(goal)] {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut cur = goal;
    while cur != start {
        path.push(cur);
        match parent[grid.index(cur)] {
            Some(prev) => cur = prev,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Direction toward `to` along the axis with the larger wrapped delta.
/// Ties go to the vertical axis.
pub fn greedy_direction(grid: &Grid, from: Position, to: Position) -> Direction {
    let dx = grid.axis_delta(from.x, to.x);
    let dy = grid.axis_delta(from.y, to.y);
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Slide a copy of the snake straight along `direction` and count the steps
/// until it would run into itself or re-enter a cell it already crossed.
pub fn probe_straight(grid: &Grid, snake: &VecDeque<Position>, direction: Direction) -> usize {
    let Some(&head) = snake.front() else {
        return 0;
    };
    let mut body = snake.clone();
    let mut visited = HashSet::new();
    visited.insert(head);

    let mut steps = 0;
    while steps < grid.cell_count() {
        let next = grid.step(body[0], direction);
        if body.contains(&next) || !visited.insert(next) {
            break;
        }
        body.push_front(next);
        body.pop_back();
        steps += 1;
    }
    steps
}

/// The direction with the longest straight run, never the reverse of
/// `current`. Ties keep the earlier direction in search order.
pub fn safest_direction(
    grid: &Grid,
    snake: &VecDeque<Position>,
    current: Option<Direction>,
) -> Option<Direction> {
    let mut best: Option<(Direction, usize)> = None;
    for dir in Direction::SEARCH_ORDER {
        if current.is_some_and(|c| dir == c.opposite()) {
            continue;
        }
        let run = probe_straight(grid, snake, dir);
        if best.map_or(true, |(_, best_run)| run > best_run) {
            best = Some((dir, run));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Work out where the snake should go next.
pub fn decide(session: &GameSession) -> Option<Decision> {
    let grid = &session.grid;
    let head = grid.wrap_position(session.head());

    let target = if session.collision_avoidance {
        let path = find_safe_path(grid, &session.snake, head, session.food);
        match path.first() {
            Some(&next) => next,
            None => {
                return safest_direction(grid, &session.snake, session.direction).map(
                    |direction| Decision {
                        direction,
                        target: None,
                    },
                );
            }
        }
    } else {
        session.food
    };

    Some(Decision {
        direction: greedy_direction(grid, head, target),
        target: Some(target),
    })
}

/// One autoplay decision tick: steer the session if autoplay is on.
///
/// The chosen direction replaces any pending change. A reversal of the
/// committed direction is never issued. Returns the decision that was
/// applied, if any.
pub fn autoplay_step(session: &mut GameSession) -> Option<Decision> {
    if !session.autoplay || session.is_over() {
        return None;
    }
    let decision = decide(session)?;
    session.autoplay_target = decision.target;

    if session
        .direction
        .is_some_and(|current| decision.direction == current.opposite())
    {
        return None;
    }
    session.direction_queue.clear();
    if session.direction != Some(decision.direction) {
        session.direction_queue.push_back(decision.direction);
    }
    Some(decision)
}
