//! Host session: phases, tick pacing and input buffering
//!
//! The simulation core only knows `alive` and `paused`. A host also needs a
//! "Ready" state before the first tick, a tick interval that speeds up with the
//! score, and an input buffer that holds at most one turn per tick. This module
//! layers those on top of [`GameState`] without any rendering or device code.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::consts::{
    BASE_TICK_MS, LEVEL_SCORE_STEP, MAX_FRAME_MS, MAX_SUBSTEPS, MIN_TICK_MS, TICK_STEP_MS,
};
use crate::leaderboard::RunSummary;
use crate::sim::{
    Direction, GameState, ParkMiller, StepOutcome, UnitSource, create_game, reset,
    set_direction, step,
};

/// Phase as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created or restarted, waiting for the first start
    Ready,
    /// Ticking
    Running,
    /// Ticks suspended
    Paused,
    /// Run ended
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Ready => "Ready",
            SessionPhase::Running => "Running",
            SessionPhase::Paused => "Paused",
            SessionPhase::GameOver => "Game Over",
        }
    }
}

/// Tick interval schedule (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickPacing {
    pub base_tick_ms: u32,
    pub tick_step_ms: u32,
    pub min_tick_ms: u32,
}

impl Default for TickPacing {
    fn default() -> Self {
        Self {
            base_tick_ms: BASE_TICK_MS,
            tick_step_ms: TICK_STEP_MS,
            min_tick_ms: MIN_TICK_MS,
        }
    }
}

impl TickPacing {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_tick_ms == 0 {
            return Err(ConfigError::InvalidPacing(
                "min_tick_ms must be positive".to_string(),
            ));
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::InvalidPacing(format!(
                "min_tick_ms {} exceeds base_tick_ms {}",
                self.min_tick_ms, self.base_tick_ms
            )));
        }
        Ok(())
    }

    /// Tick interval at `score`: one step faster every level, never below the floor
    pub fn tick_ms_for(&self, score: u32) -> u32 {
        let level_ups = score / LEVEL_SCORE_STEP;
        self.base_tick_ms
            .saturating_sub(level_ups.saturating_mul(self.tick_step_ms))
            .max(self.min_tick_ms)
    }
}

/// 1-based level for a score
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Something the host should react to after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Food eaten; level and obstacle count after the pickup
    FoodEaten {
        score: u32,
        level: u32,
        obstacles: usize,
    },
    /// The run just ended (reported once per run)
    GameOver(RunSummary),
}

/// A game plus the host-level bookkeeping around it
#[derive(Debug, Clone)]
pub struct Session<S = ParkMiller> {
    pub state: GameState<S>,
    pub pacing: TickPacing,
    started: bool,
    queued: Option<Direction>,
    accumulator_ms: f64,
    elapsed_ms: u64,
}

impl Session<ParkMiller> {
    /// Validate a config and open a session on a fresh game
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let state = create_game(config)?;
        Ok(Self::new(state, config.pacing))
    }
}

impl<S: UnitSource> Session<S> {
    pub fn new(state: GameState<S>, pacing: TickPacing) -> Self {
        Self {
            state,
            pacing,
            started: false,
            queued: None,
            accumulator_ms: 0.0,
            elapsed_ms: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.state.alive {
            SessionPhase::GameOver
        } else if !self.started {
            SessionPhase::Ready
        } else if self.state.paused {
            SessionPhase::Paused
        } else {
            SessionPhase::Running
        }
    }

    /// Current tick interval
    pub fn tick_ms(&self) -> u32 {
        self.pacing.tick_ms_for(self.state.score)
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.state.score)
    }

    /// Simulated run time, excluding pauses
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Begin ticking: from Ready, from Paused, or from GameOver after a restart
    pub fn start(&mut self) {
        if !self.state.alive {
            self.restart();
        }
        if !self.started {
            self.started = true;
            self.elapsed_ms = 0;
        }
        self.state.paused = false;
        log::debug!("Session {}", self.phase().as_str());
    }

    /// Pause or resume a started, live run
    pub fn set_paused(&mut self, paused: bool) {
        if !self.state.alive || !self.started || self.state.paused == paused {
            return;
        }
        self.state.paused = paused;
        if paused {
            self.accumulator_ms = 0.0;
        }
        log::debug!("Session {}", self.phase().as_str());
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.state.paused;
        self.set_paused(!paused);
    }

    /// Buffer a turn for the next tick; only the first one per tick is kept
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.phase() != SessionPhase::Running {
            return;
        }
        if self.queued.is_none() {
            self.queued = Some(direction);
        }
    }

    /// Buffer a turn by name; unknown names are ignored
    pub fn queue_direction_name(&mut self, name: &str) {
        if let Some(direction) = Direction::from_name(name) {
            self.queue_direction(direction);
        }
    }

    /// Run exactly one tick if the session is running
    pub fn advance(&mut self) -> Option<SessionEvent> {
        if self.phase() != SessionPhase::Running {
            return None;
        }
        if let Some(direction) = self.queued.take() {
            set_direction(&mut self.state, direction);
        }

        let tick_ms = self.tick_ms();
        let outcome = step(&mut self.state);
        self.elapsed_ms += u64::from(tick_ms);

        match outcome {
            StepOutcome::Ate { .. } => Some(SessionEvent::FoodEaten {
                score: self.state.score,
                level: self.level(),
                obstacles: self.state.obstacles.len(),
            }),
            StepOutcome::Died(_) => {
                self.accumulator_ms = 0.0;
                Some(SessionEvent::GameOver(self.summary()))
            }
            StepOutcome::Moved | StepOutcome::Idle => None,
        }
    }

    /// Feed wall-clock time; runs as many ticks as fit, up to `MAX_SUBSTEPS`
    pub fn update(&mut self, dt_ms: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase() != SessionPhase::Running {
            return events;
        }

        let dt_ms = if dt_ms.is_finite() { dt_ms } else { 0.0 };
        self.accumulator_ms += dt_ms.clamp(0.0, MAX_FRAME_MS);
        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS && self.phase() == SessionPhase::Running {
            let tick_ms = f64::from(self.tick_ms());
            if self.accumulator_ms < tick_ms {
                break;
            }
            self.accumulator_ms -= tick_ms;
            substeps += 1;
            if let Some(event) = self.advance() {
                events.push(event);
            }
        }
        events
    }

    /// Back to Ready on a fresh board; the source keeps its sequence
    pub fn restart(&mut self) {
        reset(&mut self.state, None);
        self.started = false;
        self.queued = None;
        self.accumulator_ms = 0.0;
        self.elapsed_ms = 0;
        log::debug!("Session {}", self.phase().as_str());
    }

    /// Snapshot of the run for score keeping
    pub fn summary(&self) -> RunSummary {
        RunSummary::new(&self.state, self.tick_ms(), self.elapsed_ms)
    }
}
