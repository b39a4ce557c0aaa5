use proptest::prelude::*;
use snake_arcade::sim::{
    Direction, GameState, Grid, ParkMiller, StepOutcome, UnitSource, can_reach_food,
    has_escape_route, set_direction, step,
};

/// One host tick: a turn, and whether to drop food right in front of the head
fn tick_strategy() -> impl Strategy<Value = (usize, bool)> {
    (0usize..4, any::<bool>())
}

fn apply_tick(state: &mut GameState, (dir, feed): (usize, bool)) -> StepOutcome {
    set_direction(state, Direction::ALL[dir]);
    if feed {
        let next = state.snake.head() + state.queued_direction.delta();
        if state.grid.in_bounds(next) && state.collision_at(next).is_none() {
            state.food = next;
        }
    }
    step(state)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_for_any_input(
        seed in any::<u64>(),
        rows in 4u32..16,
        cols in 4u32..16,
        ticks in prop::collection::vec(tick_strategy(), 1..400),
    ) {
        let mut state = GameState::new(Grid::new(rows, cols).unwrap(), seed);
        prop_assert!(state.check_invariants().is_ok());

        let mut last_score = 0;
        for tick in ticks {
            let outcome = apply_tick(&mut state, tick);
            if let Err(violation) = state.check_invariants() {
                prop_assert!(false, "{}", violation);
            }
            prop_assert!(state.score >= last_score);
            prop_assert_eq!(state.snake.len(), state.score as usize + 3);
            last_score = state.score;

            if let StepOutcome::Ate { obstacles_added, .. } = outcome {
                if obstacles_added > 0 {
                    prop_assert!(has_escape_route(&state, None));
                    prop_assert!(can_reach_food(&state, None));
                }
            }
            if !state.alive {
                prop_assert!(state.last_death.is_some());
            }
        }
    }

    #[test]
    fn dead_or_paused_games_never_change(
        seed in any::<u64>(),
        paused in any::<bool>(),
        ticks in prop::collection::vec(tick_strategy(), 1..50),
    ) {
        let mut state = GameState::new(Grid::new(12, 12).unwrap(), seed);
        if paused {
            state.paused = true;
        } else {
            state.alive = false;
        }
        for (dir, _) in ticks {
            let before = state.clone();
            prop_assert_eq!(step(&mut state), StepOutcome::Idle);
            prop_assert_eq!(&state, &before);
            set_direction(&mut state, Direction::ALL[dir]);
            prop_assert!(!state.queued_direction.is_opposite(state.direction));
        }
    }

    #[test]
    fn same_seed_same_run(
        seed in any::<u64>(),
        ticks in prop::collection::vec(tick_strategy(), 1..300),
    ) {
        let grid = Grid::new(10, 14).unwrap();
        let mut a = GameState::new(grid, seed);
        let mut b = GameState::new(grid, seed);
        for tick in ticks {
            prop_assert_eq!(apply_tick(&mut a, tick), apply_tick(&mut b, tick));
        }
        prop_assert_eq!(a, b);
    }

    #[test]
    fn park_miller_stays_in_unit_interval(seed in any::<u64>()) {
        let mut rng = ParkMiller::new(seed);
        prop_assert!(rng.state() >= 1 && rng.state() < ParkMiller::MODULUS);
        for _ in 0..256 {
            let x = rng.next_unit();
            prop_assert!((0.0..1.0).contains(&x));
        }
    }
}
