//! Headless session runner
//!
//! Drives the simulation without a browser: 60 Hz frames, spawner fed by
//! simulated time, no player input. Used by the native binary as a smoke
//! run and by tests.

use serde::Serialize;

use crate::consts::SIM_STEP_MS;
use crate::platform::InputState;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Spawner, tick};

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub score: u32,
    pub obstacles: usize,
    pub game_over: bool,
}

/// Run until the first game over or `max_frames`, whichever comes first
pub fn run(seed: u64, max_frames: u64, settings: &Settings) -> RunSummary {
    let mut state = GameState::new(seed);
    let mut spawner = Spawner::new(settings.spawn_interval_ms, settings.spawn_while_frozen);
    let mut input = InputState::new();

    let mut frames = 0;
    while frames < max_frames && state.phase != GamePhase::GameOver {
        spawner.advance(SIM_STEP_MS, &mut state);
        tick(&mut state, &input.take_tick_input());
        for event in state.drain_events() {
            event.log();
        }
        frames += 1;
    }

    RunSummary {
        seed,
        frames,
        score: state.score,
        obstacles: state.obstacles.len(),
        game_over: state.phase == GamePhase::GameOver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_is_deterministic() {
        let settings = Settings::default();
        assert_eq!(run(2024, 5_000, &settings), run(2024, 5_000, &settings));
    }

    #[test]
    fn test_run_respects_frame_limit() {
        let summary = run(1, 10, &Settings::default());
        assert_eq!(summary.frames, 10);
        // First spawn is 1200 ms in
        assert_eq!(summary.obstacles, 0);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_idle_player_eventually_crashes() {
        // A car parked in the middle of a 400 px road cannot dodge forever
        let summary = run(77, 1_000_000, &Settings::default());
        assert!(summary.game_over);
        assert!(summary.frames < 1_000_000);
        assert!(summary.obstacles >= 1);
    }
}
