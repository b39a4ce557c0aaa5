//! Difficulty schedule: score to obstacle count

use super::grid::Grid;
use super::obstacles::place_obstacle;
use super::rng::UnitSource;
use super::state::GameState;
use crate::consts::{
    MIN_OBSTACLE_CAP, OBSTACLE_AREA_DIVISOR, OBSTACLE_SCORE_STEP, OBSTACLE_START_SCORE,
};

/// Obstacle cap for a grid: `max(6, area / 35)`
pub fn max_obstacles_for(grid: Grid) -> usize {
    MIN_OBSTACLE_CAP.max(grid.area() / OBSTACLE_AREA_DIVISOR)
}

/// Obstacles wanted at `score`
///
/// None below the start score, then one more every `OBSTACLE_SCORE_STEP` points,
/// capped at `max_obstacles`.
pub fn target_obstacle_count(score: u32, max_obstacles: usize) -> usize {
    if score < OBSTACLE_START_SCORE {
        return 0;
    }
    let growth = 1 + ((score - OBSTACLE_START_SCORE) / OBSTACLE_SCORE_STEP) as usize;
    growth.min(max_obstacles)
}

/// Add obstacles until the target is met or a placement fails
///
/// Returns how many were added. A failed placement ends this cycle; the next
/// food pickup tries again.
pub fn sync_obstacles<S: UnitSource>(state: &mut GameState<S>) -> usize {
    let target = target_obstacle_count(state.score, state.max_obstacles);
    let mut added = 0;
    while state.obstacles.len() < target {
        match place_obstacle(state) {
            Some(cell) => {
                log::debug!(
                    "Obstacle {} of {} placed at {}",
                    state.obstacles.len() + 1,
                    target,
                    cell
                );
                state.obstacles.push(cell);
                added += 1;
            }
            None => break,
        }
    }
    added
}
