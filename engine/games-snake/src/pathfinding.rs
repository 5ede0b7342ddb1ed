//! One-step safety filter and breadth-first path finder.
//!
//! Both treat the tail cell as free: by the time the head could reach it, the
//! tail has moved on.

use std::collections::VecDeque;

use crate::{Action, Point, SnakeGame};

/// Default cap on BFS dequeues.
pub const DEFAULT_NODE_BUDGET: usize = 10_000;

/// Sum of absolute coordinate differences.
pub fn manhattan_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Whether moving in `action` keeps the head in bounds and off the body
/// (tail excluded).
pub fn is_safe(game: &SnakeGame, action: Action) -> bool {
    let candidate = game.head().step(action);
    game.in_bounds(candidate) && !game.body_without_tail_contains(candidate)
}

/// The safe members of `actions`, in order. May be empty.
pub fn safe_subset(game: &SnakeGame, actions: &[Action]) -> Vec<Action> {
    actions
        .iter()
        .copied()
        .filter(|&a| is_safe(game, a))
        .collect()
}

/// Legal actions that avoid an immediate collision.
///
/// Falls back to the full legal set when every move is fatal, so the result
/// is never empty.
pub fn safe_actions(game: &SnakeGame) -> Vec<Action> {
    let legal = game.legal_actions();
    let safe = safe_subset(game, &legal);
    if safe.is_empty() {
        legal
    } else {
        safe
    }
}

/// Shortest action sequence from the head to the food.
///
/// Neighbours are explored in [`Action::ALL`] order, so among equal-length
/// paths the first one found in that order wins. The search stops after
/// `node_budget` dequeues; running out of budget is reported as `None` unless
/// the food cell was already discovered.
pub fn find_path_to_food(
    game: &SnakeGame,
    allow_tail: bool,
    node_budget: usize,
) -> Option<Vec<Action>> {
    let width = game.width() as usize;
    let index = |p: Point| p.y as usize * width + p.x as usize;

    let mut blocked = vec![false; game.cell_count()];
    let obstacle_count = if allow_tail {
        game.len().saturating_sub(1)
    } else {
        game.len()
    };
    for &segment in game.snake().iter().take(obstacle_count) {
        blocked[index(segment)] = true;
    }

    let start = game.head();
    let target = game.food();

    // came_from[i] = (previous cell index, action taken from it)
    let mut came_from: Vec<Option<(usize, Action)>> = vec![None; game.cell_count()];
    let mut discovered = vec![false; game.cell_count()];
    discovered[index(start)] = true;

    let mut queue = VecDeque::from([start]);
    let mut expanded = 0usize;

    while let Some(current) = queue.pop_front() {
        if expanded >= node_budget {
            break;
        }
        expanded += 1;

        if current == target {
            break;
        }

        for action in Action::ALL {
            let next = current.step(action);
            if !game.in_bounds(next) {
                continue;
            }
            let i = index(next);
            if blocked[i] || discovered[i] {
                continue;
            }
            discovered[i] = true;
            came_from[i] = Some((index(current), action));
            queue.push_back(next);
        }
    }

    if !game.in_bounds(target) || !discovered[index(target)] {
        return None;
    }

    let mut path = Vec::new();
    let mut cursor = index(target);
    while let Some((previous, action)) = came_from[cursor] {
        path.push(action);
        cursor = previous;
    }
    path.reverse();
    Some(path)
}
