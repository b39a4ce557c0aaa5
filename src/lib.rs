//! Snake Arcade - A grid snake game with fair procedural obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake movement, food, obstacles, ticks)
//! - `config`: Game configuration and validation
//! - `session`: Host-level phases, tick pacing and input buffering
//! - `leaderboard`: Run summaries, tiers and the top-10 ranking

pub mod config;
pub mod leaderboard;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use leaderboard::{Leaderboard, LeaderboardEntry, RunSummary, Tier};
pub use session::{Session, SessionEvent, SessionPhase, TickPacing};

/// Game configuration constants
pub mod consts {
    /// Snake length at creation and after every reset
    pub const INITIAL_SNAKE_LENGTH: usize = 3;

    /// Default grid dimensions
    pub const DEFAULT_ROWS: u32 = 20;
    pub const DEFAULT_COLS: u32 = 20;
    /// Largest accepted grid side
    pub const MAX_DIMENSION: u32 = 512;
    /// Narrowest grid that fits the starting snake left of center
    pub const MIN_COLS: u32 = 4;

    /// Score at which the first obstacle is requested
    pub const OBSTACLE_START_SCORE: u32 = 31;
    /// Score points per additional obstacle past the start score
    pub const OBSTACLE_SCORE_STEP: u32 = 5;
    /// Candidates tested per placement before giving up for this cycle
    pub const OBSTACLE_MAX_ATTEMPTS: usize = 120;
    /// Obstacle cap floor, and the area divisor used above it
    pub const MIN_OBSTACLE_CAP: usize = 6;
    pub const OBSTACLE_AREA_DIVISOR: usize = 35;

    /// Tick pacing (milliseconds per tick)
    pub const BASE_TICK_MS: u32 = 240;
    pub const TICK_STEP_MS: u32 = 20;
    pub const MIN_TICK_MS: u32 = 80;
    /// Score points per level
    pub const LEVEL_SCORE_STEP: u32 = 5;

    /// Maximum ticks per host update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host update will account for
    pub const MAX_FRAME_MS: f64 = 1000.0;
}
