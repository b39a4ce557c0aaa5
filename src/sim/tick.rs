//! Per-tick state machine
//!
//! The host calls [`step`] once per tick and [`set_direction`] whenever input
//! arrives. A dead game stays dead until [`reset`].

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::difficulty::sync_obstacles;
use super::food::place_food;
use super::rng::{ParkMiller, UnitSource};
use super::snake::Direction;
use super::state::{Death, GameState};
use crate::config::{ConfigError, GameConfig};

/// What a single call to [`step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Not alive or paused; nothing changed
    Idle,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto the food and grew
    Ate {
        /// Where the next food landed
        food: IVec2,
        /// Obstacles added by the difficulty sync
        obstacles_added: usize,
    },
    /// Snake collided; the run is over
    Died(Death),
}

/// Validate a config and create a game seeded from it
///
/// Without a seed the reference generator is seeded from entropy.
pub fn create_game(config: &GameConfig) -> Result<GameState<ParkMiller>, ConfigError> {
    let grid = config.validate()?;
    let rng = match config.seed {
        Some(seed) => ParkMiller::new(seed),
        None => ParkMiller::from_entropy(),
    };
    log::info!(
        "New game {} (seed: {:?}, rng state: {})",
        grid.label(),
        config.seed,
        rng.state()
    );
    Ok(GameState::with_source(grid, rng))
}

/// Latch the direction for the next tick
///
/// A direction opposite to the committed one is ignored, so two quick turns
/// inside one tick cannot reverse the snake onto itself.
pub fn set_direction<S>(state: &mut GameState<S>, direction: Direction) {
    if direction.is_opposite(state.direction) {
        return;
    }
    state.queued_direction = direction;
}

/// Like [`set_direction`], but from a direction name; unknown names are ignored
pub fn set_direction_by_name<S>(state: &mut GameState<S>, name: &str) {
    if let Some(direction) = Direction::from_name(name) {
        set_direction(state, direction);
    }
}

/// Advance the game state by one tick
pub fn step<S: UnitSource>(state: &mut GameState<S>) -> StepOutcome {
    if !state.alive || state.paused {
        return StepOutcome::Idle;
    }

    state.last_death = None;
    state.direction = state.queued_direction;
    let next = state.snake.next_head(state.direction);

    if let Some(cause) = state.collision_at(next) {
        let death = Death { cause, cell: next };
        state.alive = false;
        state.last_death = Some(death);
        log::info!(
            "Game over: {} at {} (score {})",
            cause.as_str(),
            next,
            state.score
        );
        return StepOutcome::Died(death);
    }

    let ate = next == state.food;
    state.snake.advance(next, ate);
    if !ate {
        return StepOutcome::Moved;
    }

    state.score += 1;
    state.food = place_food(state);
    let obstacles_added = sync_obstacles(state);
    StepOutcome::Ate {
        food: state.food,
        obstacles_added,
    }
}

/// Reinitialize in place, keeping the grid
///
/// With a seed the source restarts from it; otherwise the current source keeps
/// going where it left off.
pub fn reset<S: UnitSource>(state: &mut GameState<S>, seed: Option<u64>) {
    if let Some(seed) = seed {
        state.rng.reseed(seed);
    }
    state.restore_initial();
    log::debug!("Game reset {} (seed: {:?})", state.grid.label(), seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{Grid, NO_FOOD};
    use crate::sim::rng::ScriptedSequence;
    use crate::sim::snake::Snake;
    use crate::sim::state::DeathCause;

    fn seeded(rows: u32, cols: u32, seed: u64) -> GameState {
        GameState::new(Grid::new(rows, cols).unwrap(), seed)
    }

    #[test]
    fn test_basic_movement() {
        let mut state = seeded(15, 15, 7);
        state.food = IVec2::new(0, 0);
        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert_eq!(state.snake.head(), IVec2::new(8, 7));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut state = seeded(15, 15, 7);
        state.food = IVec2::new(8, 7);

        let outcome = step(&mut state);

        assert!(matches!(outcome, StepOutcome::Ate { obstacles_added: 0, .. }));
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Some(IVec2::new(5, 7)));
        assert_ne!(state.food, IVec2::new(8, 7));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_wall_collision_on_15x15() {
        let mut state = seeded(15, 15, 11);
        state.food = NO_FOOD;
        // Head starts at x=7; seven moves reach x=14, the eighth leaves the grid
        for _ in 0..7 {
            assert_eq!(step(&mut state), StepOutcome::Moved);
        }
        let outcome = step(&mut state);
        let death = Death {
            cause: DeathCause::Wall,
            cell: IVec2::new(15, 7),
        };
        assert_eq!(outcome, StepOutcome::Died(death));
        assert!(!state.alive);
        assert_eq!(state.last_death, Some(death));
        assert_eq!(state.snake.head(), IVec2::new(14, 7));
    }

    #[test]
    fn test_self_collision() {
        let mut state = seeded(10, 10, 1);
        state.food = NO_FOOD;
        state.snake = Snake::new(IVec2::new(5, 5), Direction::Right, 5);
        state.score = 2;

        set_direction(&mut state, Direction::Down);
        step(&mut state);
        set_direction(&mut state, Direction::Left);
        step(&mut state);
        set_direction(&mut state, Direction::Up);
        let outcome = step(&mut state);

        assert_eq!(
            outcome,
            StepOutcome::Died(Death {
                cause: DeathCause::SelfCollision,
                cell: IVec2::new(4, 5),
            })
        );
    }

    #[test]
    fn test_moving_into_tail_cell_is_fatal() {
        // Square loop: the tail has not moved yet when the head arrives
        let mut state = seeded(10, 10, 1);
        state.food = NO_FOOD;
        state.snake = Snake::from_cells([
            IVec2::new(5, 5),
            IVec2::new(5, 6),
            IVec2::new(4, 6),
            IVec2::new(4, 5),
        ]);
        state.score = 1;
        state.direction = Direction::Up;
        state.queued_direction = Direction::Left;

        let outcome = step(&mut state);
        assert!(matches!(
            outcome,
            StepOutcome::Died(Death {
                cause: DeathCause::SelfCollision,
                ..
            })
        ));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut state = seeded(15, 15, 3);
        state.food = NO_FOOD;
        state.obstacles.push(IVec2::new(8, 7));
        let outcome = step(&mut state);
        assert_eq!(
            state.last_death.map(|d| d.cause),
            Some(DeathCause::Obstacle)
        );
        assert!(matches!(outcome, StepOutcome::Died(_)));
    }

    #[test]
    fn test_reverse_direction_ignored() {
        let mut state = seeded(15, 15, 5);
        set_direction(&mut state, Direction::Left);
        assert_eq!(state.queued_direction, Direction::Right);

        set_direction(&mut state, Direction::Up);
        assert_eq!(state.queued_direction, Direction::Up);
        assert_eq!(state.direction, Direction::Right);

        state.food = NO_FOOD;
        step(&mut state);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.snake.head(), IVec2::new(7, 6));
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let mut state = seeded(15, 15, 5);
        set_direction(&mut state, Direction::Up);
        // Down reverses the queued Up but not the committed Right
        set_direction(&mut state, Direction::Down);
        assert_eq!(state.queued_direction, Direction::Down);
        set_direction(&mut state, Direction::Left);
        assert_eq!(state.queued_direction, Direction::Down);
    }

    #[test]
    fn test_unknown_direction_name_ignored() {
        let mut state = seeded(15, 15, 5);
        set_direction_by_name(&mut state, "diagonal");
        assert_eq!(state.queued_direction, Direction::Right);
        set_direction_by_name(&mut state, "down");
        assert_eq!(state.queued_direction, Direction::Down);
    }

    #[test]
    fn test_dead_game_is_frozen() {
        let mut state = seeded(15, 15, 9);
        state.alive = false;
        let before = state.clone();
        for _ in 0..5 {
            assert_eq!(step(&mut state), StepOutcome::Idle);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_paused_game_is_frozen() {
        let mut state = seeded(15, 15, 9);
        state.paused = true;
        let before = state.clone();
        for _ in 0..5 {
            assert_eq!(step(&mut state), StepOutcome::Idle);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_last_death_survives_until_reset() {
        let mut state = seeded(15, 15, 9);
        state.food = NO_FOOD;
        state.obstacles.push(IVec2::new(8, 7));
        step(&mut state);
        step(&mut state);
        assert!(state.last_death.is_some());

        reset(&mut state, None);
        assert!(state.alive);
        assert!(state.last_death.is_none());
    }

    #[test]
    fn test_reset_with_seed_matches_fresh_game() {
        let mut state = seeded(12, 18, 1234);
        state.food = NO_FOOD;
        for _ in 0..3 {
            step(&mut state);
        }
        reset(&mut state, Some(77));
        assert_eq!(state, seeded(12, 18, 77));
    }

    #[test]
    fn test_reset_without_seed_continues_sequence() {
        let mut state = seeded(15, 15, 55);
        let mut mirror = ParkMiller::new(55);
        mirror.next_unit();
        reset(&mut state, None);
        mirror.next_unit();
        assert_eq!(state.rng, mirror);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_growth_keeps_tail_and_triggers_obstacles_at_threshold() {
        let grid = Grid::new(15, 15).unwrap();
        let mut state = GameState::with_source(grid, ScriptedSequence::new(vec![0.37, 0.81]));
        state.score = 30;
        // Pretend the snake already ate 30 times
        state.snake = Snake::from_cells(
            (0..33).map(|i| {
                let x = 7 - (i % 8);
                let y = 7 + i / 8;
                IVec2::new(x, y)
            }),
        );
        state.food = IVec2::new(8, 7);
        state.obstacles.clear();

        let outcome = step(&mut state);
        let StepOutcome::Ate { obstacles_added, .. } = outcome else {
            panic!("expected to eat, got {outcome:?}");
        };
        assert_eq!(state.score, 31);
        assert_eq!(obstacles_added, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_create_game_rejects_bad_config() {
        let config = GameConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(create_game(&config).is_err());
    }

    #[test]
    fn test_same_seed_same_food() {
        let config = GameConfig {
            rows: 15,
            cols: 15,
            seed: Some(42),
            ..Default::default()
        };
        let a = create_game(&config).unwrap();
        let b = create_game(&config).unwrap();
        assert_eq!(a.food, b.food);
        assert_eq!(a, b);
    }
}
