//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded sequence sources only
//! - Stable iteration order (row-major cells, fixed neighbor order)
//! - No rendering, input or platform dependencies

pub mod difficulty;
pub mod food;
pub mod grid;
pub mod obstacles;
pub mod rng;
pub mod snake;
pub mod state;
pub mod tick;

pub use difficulty::{max_obstacles_for, sync_obstacles, target_obstacle_count};
pub use food::place_food;
pub use grid::{CellSet, Grid, NO_FOOD, manhattan};
pub use obstacles::{can_reach_food, has_escape_route, is_fair_placement, place_obstacle};
pub use rng::{ParkMiller, RandSource, ScriptedSequence, UnitSource};
pub use snake::{Direction, Snake};
pub use state::{Death, DeathCause, GameState};
pub use tick::{StepOutcome, create_game, reset, set_direction, set_direction_by_name, step};
