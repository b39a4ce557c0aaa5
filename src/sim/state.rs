//! Game state and core simulation types
//!
//! `GameState` is the single aggregate the host owns. Every field is public so
//! renderers and score keepers can read a full snapshot after each call.

use glam::IVec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::difficulty::max_obstacles_for;
use super::food::place_food;
use super::grid::{CellSet, Grid, NO_FOOD};
use super::rng::{ParkMiller, UnitSource};
use super::snake::{Direction, Snake};
use crate::config::ConfigError;
use crate::consts::INITIAL_SNAKE_LENGTH;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    #[serde(rename = "wall")]
    Wall,
    #[serde(rename = "self")]
    SelfCollision,
    #[serde(rename = "obstacle")]
    Obstacle,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Wall => "wall",
            DeathCause::SelfCollision => "self",
            DeathCause::Obstacle => "obstacle",
        }
    }
}

/// Cause of death plus the cell the head tried to enter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub cause: DeathCause,
    pub cell: IVec2,
}

/// Complete game state (deterministic, serializable when the source is)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState<S = ParkMiller> {
    /// Board dimensions
    pub grid: Grid,
    /// Body cells, head first
    pub snake: Snake,
    /// Direction committed on the last tick
    pub direction: Direction,
    /// Direction applied on the next tick
    pub queued_direction: Direction,
    /// Food cell, or `NO_FOOD` when the board is full
    pub food: IVec2,
    pub score: u32,
    pub alive: bool,
    pub paused: bool,
    /// Set when the run ends, cleared by the next live step or reset
    pub last_death: Option<Death>,
    /// Obstacle cells in placement order (no duplicates)
    pub obstacles: Vec<IVec2>,
    /// Obstacle cap, fixed by grid area
    pub max_obstacles: usize,
    /// Sequence source for food and obstacle placement
    pub rng: S,
}

impl<S: UnitSource> GameState<S> {
    /// Create a fresh game on `grid` drawing placements from `rng`
    pub fn with_source(grid: Grid, rng: S) -> Self {
        let mut state = Self {
            grid,
            snake: Snake::spawn(grid, INITIAL_SNAKE_LENGTH),
            direction: Direction::Right,
            queued_direction: Direction::Right,
            food: NO_FOOD,
            score: 0,
            alive: true,
            paused: false,
            last_death: None,
            obstacles: Vec::new(),
            max_obstacles: max_obstacles_for(grid),
            rng,
        };
        state.food = place_food(&mut state);
        state
    }

    /// Put every field except the grid and the source back to its starting value
    pub(crate) fn restore_initial(&mut self) {
        self.snake = Snake::spawn(self.grid, INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.queued_direction = Direction::Right;
        self.food = NO_FOOD;
        self.score = 0;
        self.alive = true;
        self.paused = false;
        self.last_death = None;
        self.obstacles.clear();
        self.max_obstacles = max_obstacles_for(self.grid);
        self.food = place_food(self);
    }
}

impl<S> GameState<S> {
    pub fn has_obstacle_at(&self, cell: IVec2) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Cells held by the snake or an obstacle
    pub fn occupied(&self) -> CellSet {
        CellSet::from_cells(
            self.grid,
            self.snake.cells().chain(self.obstacles.iter().copied()),
        )
    }

    /// Collision the head would suffer entering `next`
    ///
    /// Wall beats everything. The whole body counts, tail included, since the
    /// tail has not moved yet. An obstacle is reported over the body when both
    /// match.
    pub fn collision_at(&self, next: IVec2) -> Option<DeathCause> {
        if !self.grid.in_bounds(next) {
            return Some(DeathCause::Wall);
        }
        let hit_self = self.snake.contains(next);
        let hit_obstacle = self.has_obstacle_at(next);
        if hit_obstacle {
            Some(DeathCause::Obstacle)
        } else if hit_self {
            Some(DeathCause::SelfCollision)
        } else {
            None
        }
    }

    /// Snake length at creation
    pub fn initial_length(&self) -> usize {
        INITIAL_SNAKE_LENGTH
    }

    /// Checks the aggregate invariants, returning the first violation found
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = CellSet::new(self.grid);
        for cell in self.snake.cells() {
            if !self.grid.in_bounds(cell) {
                return Err(format!("snake cell {cell} out of bounds"));
            }
            if !seen.insert(cell) {
                return Err(format!("snake overlaps itself at {cell}"));
            }
        }
        for cell in &self.obstacles {
            if !self.grid.in_bounds(*cell) {
                return Err(format!("obstacle {cell} out of bounds"));
            }
            if !seen.insert(*cell) {
                return Err(format!("obstacle {cell} overlaps snake or obstacle"));
            }
        }
        if self.food != NO_FOOD && seen.contains(self.food) {
            return Err(format!("food {} on an occupied cell", self.food));
        }
        if self.obstacles.len() > self.max_obstacles {
            return Err(format!(
                "{} obstacles exceed cap {}",
                self.obstacles.len(),
                self.max_obstacles
            ));
        }
        if self.snake.len() != self.score as usize + INITIAL_SNAKE_LENGTH {
            return Err(format!(
                "length {} != score {} + {}",
                self.snake.len(),
                self.score,
                INITIAL_SNAKE_LENGTH
            ));
        }
        Ok(())
    }
}

impl<S: DeserializeOwned> GameState<S> {
    /// Restore a snapshot written by the host, rejecting any that break the
    /// state invariants
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let state: Self = serde_json::from_str(json)?;
        if state.max_obstacles != max_obstacles_for(state.grid) {
            return Err(ConfigError::InvalidSnapshot(format!(
                "obstacle cap {} does not match a {} board",
                state.max_obstacles,
                state.grid.label()
            )));
        }
        state.check_invariants().map_err(ConfigError::InvalidSnapshot)?;
        Ok(state)
    }
}

impl GameState<ParkMiller> {
    /// Create a game seeded with the reference generator
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self::with_source(grid, ParkMiller::new(seed))
    }
}
