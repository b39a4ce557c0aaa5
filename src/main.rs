//! Snake Arcade entry point
//!
//! Runs a headless session with a simple autopilot and prints the run summary
//! as JSON. Usage: `snake-arcade [config.json]`

use snake_arcade::sim::{Direction, GameState, manhattan};
use snake_arcade::{GameConfig, Session, SessionEvent};

/// Stop runs that never end (the autopilot can loop forever on a safe cycle)
const MAX_TICKS: u32 = 20_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Snake Arcade (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut session = Session::from_config(&config)?;
    session.start();

    let mut ticks: u32 = 0;
    let summary = loop {
        if let Some(direction) = choose_direction(&session.state) {
            session.queue_direction(direction);
        }
        // Feed exactly one interval so every update runs one tick
        let dt = f64::from(session.tick_ms());
        let events = session.update(dt);
        ticks += 1;

        let mut over = None;
        for event in events {
            match event {
                SessionEvent::FoodEaten {
                    score,
                    level,
                    obstacles,
                } => {
                    log::info!(
                        "Score {} (level {}, {} obstacles, {}ms ticks)",
                        score,
                        level,
                        obstacles,
                        session.tick_ms()
                    );
                }
                SessionEvent::GameOver(summary) => over = Some(summary),
            }
        }
        if let Some(summary) = over {
            break summary;
        }
        if ticks >= MAX_TICKS {
            log::warn!("Tick limit reached, stopping run");
            break session.summary();
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Greedy autopilot: among moves that don't die this tick, head toward the food,
/// preferring moves with more open neighbors
fn choose_direction<S>(state: &GameState<S>) -> Option<Direction> {
    let head = state.snake.head();
    Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(state.direction))
        .filter(|dir| state.collision_at(head + dir.delta()).is_none())
        .min_by_key(|dir| {
            let next = head + dir.delta();
            let open = state
                .grid
                .neighbors(next)
                .filter(|n| state.collision_at(*n).is_none())
                .count() as i32;
            let distance = if state.grid.in_bounds(state.food) {
                manhattan(next, state.food)
            } else {
                0
            };
            (open == 0, distance, -open)
        })
}
