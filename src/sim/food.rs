//! Food placement
//!
//! Food prefers cells more than one step from the head so it never spawns
//! directly under the snake's nose. On a crowded board any free cell will do.

use glam::IVec2;

use super::grid::{NO_FOOD, manhattan};
use super::rng::{UnitSource, pick_index};
use super::state::GameState;

/// Filters for [`empty_cells`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCellFilter {
    /// Skip cells within Manhattan distance 1 of the head
    pub avoid_head_zone: bool,
    /// Skip the current food cell
    pub exclude_food: bool,
}

/// Free cells (no snake, no obstacle) in row-major order
pub fn empty_cells<S>(state: &GameState<S>, filter: EmptyCellFilter) -> Vec<IVec2> {
    let occupied = state.occupied();
    let head = state.snake.head();
    state
        .grid
        .cells()
        .filter(|cell| !occupied.contains(*cell))
        .filter(|cell| !(filter.exclude_food && *cell == state.food))
        .filter(|cell| !(filter.avoid_head_zone && manhattan(*cell, head) <= 1))
        .collect()
}

/// Pick a new food cell, or `NO_FOOD` if the board is full
///
/// Consumes exactly one value from the source whenever a cell is available.
/// The state itself is left untouched apart from the source.
pub fn place_food<S: UnitSource>(state: &mut GameState<S>) -> IVec2 {
    let mut pool = empty_cells(
        state,
        EmptyCellFilter {
            avoid_head_zone: true,
            ..Default::default()
        },
    );
    if pool.is_empty() {
        pool = empty_cells(state, EmptyCellFilter::default());
        log::debug!("Food falling back to near-head cells ({} free)", pool.len());
    }
    if pool.is_empty() {
        log::debug!("Board full, no food cell available");
        return NO_FOOD;
    }
    pool[pick_index(&mut state.rng, pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Grid;
    use crate::sim::rng::ScriptedSequence;
    use crate::sim::snake::Snake;

    fn scripted(rows: u32, cols: u32, values: Vec<f64>) -> GameState<ScriptedSequence> {
        GameState::with_source(Grid::new(rows, cols).unwrap(), ScriptedSequence::new(values))
    }

    #[test]
    fn test_food_avoids_head_zone() {
        let mut state = scripted(5, 5, vec![0.0]);
        for _ in 0..50 {
            let food = place_food(&mut state);
            assert!(manhattan(food, state.snake.head()) > 1);
            assert!(!state.snake.contains(food));
        }
    }

    #[test]
    fn test_food_uniform_pick_uses_pool_order() {
        // 5x5, snake (2,2) (1,2) (0,2); head zone adds (3,2) (2,1) (2,3)
        let mut state = scripted(5, 5, vec![0.0, 0.0, 0.999]);
        let pool = empty_cells(
            &state,
            EmptyCellFilter {
                avoid_head_zone: true,
                ..Default::default()
            },
        );
        assert_eq!(pool.len(), 25 - 3 - 3);
        assert_eq!(place_food(&mut state), pool[0]);
        assert_eq!(place_food(&mut state), pool[pool.len() - 1]);
    }

    #[test]
    fn test_food_falls_back_next_to_head() {
        let mut state = scripted(1, 4, vec![0.0]);
        // 1x4 row: snake (2,0) (1,0) (0,0); only (3,0) is free and it touches the head
        assert_eq!(state.food, IVec2::new(3, 0));
        assert_eq!(place_food(&mut state), IVec2::new(3, 0));
    }

    #[test]
    fn test_full_board_returns_sentinel() {
        let mut state = scripted(1, 4, vec![0.0]);
        state.snake = Snake::from_cells([
            IVec2::new(3, 0),
            IVec2::new(2, 0),
            IVec2::new(1, 0),
            IVec2::new(0, 0),
        ]);
        let before = state.rng.consumed();
        assert_eq!(place_food(&mut state), NO_FOOD);
        assert_eq!(state.rng.consumed(), before);
    }

    #[test]
    fn test_food_skips_obstacles() {
        let mut state = scripted(5, 5, vec![0.0]);
        state.obstacles.push(IVec2::new(0, 0));
        assert_eq!(place_food(&mut state), IVec2::new(1, 0));
    }
}
