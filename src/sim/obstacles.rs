//! Obstacle placement and the fairness validator
//!
//! The interesting part of the simulation: every obstacle must leave the head
//! at least one legal move AND leave the food reachable. Either check alone is
//! not enough. A candidate can close every neighbor of the head while a long
//! detour to the food still exists, or keep a neighbor open while sealing the
//! food off completely.

use std::collections::VecDeque;

use glam::IVec2;

use super::food::{EmptyCellFilter, empty_cells};
use super::grid::{CellSet, is_no_food};
use super::rng::{UnitSource, pick_index};
use super::state::GameState;
use crate::consts::OBSTACLE_MAX_ATTEMPTS;

/// Obstacles plus the optional candidate under test
fn blocked_cells<S>(state: &GameState<S>, candidate: Option<IVec2>) -> CellSet {
    CellSet::from_cells(
        state.grid,
        state.obstacles.iter().copied().chain(candidate),
    )
}

/// True if at least one neighbor of the head is in bounds, off the body and
/// free of obstacles (with `candidate` counted as an obstacle)
pub fn has_escape_route<S>(state: &GameState<S>, candidate: Option<IVec2>) -> bool {
    let mut blocked = blocked_cells(state, candidate);
    blocked.extend(state.snake.segments());
    state
        .grid
        .neighbors(state.snake.head())
        .any(|cell| !blocked.contains(cell))
}

/// Breadth-first search from the head to the food
///
/// Obstacles, `candidate` and every body cell except the head are walls. The
/// food cell itself is always enterable. With no food on the board there is
/// nothing to reach, so the answer is trivially true.
pub fn can_reach_food<S>(state: &GameState<S>, candidate: Option<IVec2>) -> bool {
    if is_no_food(state.food) {
        return true;
    }
    let target = state.food;
    let start = state.snake.head();

    let mut blocked = blocked_cells(state, candidate);
    blocked.extend(state.snake.segments());

    let mut visited = CellSet::new(state.grid);
    visited.insert(start);
    let mut frontier = VecDeque::with_capacity(state.grid.area());
    frontier.push_back(start);

    while let Some(cell) = frontier.pop_front() {
        if cell == target {
            return true;
        }
        for next in state.grid.neighbors(cell) {
            if visited.contains(next) {
                continue;
            }
            if blocked.contains(next) && next != target {
                continue;
            }
            visited.insert(next);
            frontier.push_back(next);
        }
    }

    false
}

/// A candidate is fair when the head keeps an escape and the food stays reachable
pub fn is_fair_placement<S>(state: &GameState<S>, candidate: IVec2) -> bool {
    has_escape_route(state, Some(candidate)) && can_reach_food(state, Some(candidate))
}

/// Sample candidates without replacement and return the first fair one
///
/// Candidates are free cells outside the near-head zone and off the food. At
/// most `min(pool, OBSTACLE_MAX_ATTEMPTS)` are tested. `None` means nothing fair
/// turned up this cycle; the state is not modified either way (apart from the
/// source).
pub fn place_obstacle<S: UnitSource>(state: &mut GameState<S>) -> Option<IVec2> {
    let mut candidates = empty_cells(
        state,
        EmptyCellFilter {
            avoid_head_zone: true,
            exclude_food: true,
        },
    );
    if candidates.is_empty() {
        log::debug!("No obstacle candidates available");
        return None;
    }

    let max_attempts = candidates.len().min(OBSTACLE_MAX_ATTEMPTS);
    for _ in 0..max_attempts {
        let idx = pick_index(&mut state.rng, candidates.len());
        let candidate = candidates.remove(idx);
        if is_fair_placement(state, candidate) {
            return Some(candidate);
        }
    }

    log::debug!("Obstacle placement exhausted {} attempts", max_attempts);
    None
}
