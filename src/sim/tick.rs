//! Per-frame simulation tick
//!
//! Core game loop step: phase transitions, player movement, obstacle
//! movement, collision and scoring. Drawing happens separately from the
//! resulting state.

use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Sustained move-left intent
    pub left: bool,
    /// Sustained move-right intent
    pub right: bool,
    /// Pause toggle (one-shot)
    pub toggle_pause: bool,
    /// Restart after game over (one-shot)
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Restart only means something once the run is over
    if input.restart && state.phase == GamePhase::GameOver {
        state.reset();
        state.push_event(GameEvent::Restarted);
    }

    if input.toggle_pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.push_event(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    // Motion is frozen outside Running
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    // Move player
    let player = &mut state.player;
    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }
    player.clamp_to(&state.viewport);

    let player_rect = state.player.rect();
    let height = state.viewport.height;

    for i in 0..state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.y += obstacle.speed;

        // The rest of the frame still runs after a hit
        if obstacle.rect().overlaps(&player_rect) && state.phase == GamePhase::Running {
            state.phase = GamePhase::GameOver;
            state.push_event(GameEvent::Collision { score: state.score });
        }

        if state.obstacles[i].pos.y > height {
            state.score += 1;
            let x = state.random_obstacle_x();
            state.obstacles[i].recycle(x);
            state.push_event(GameEvent::ObstaclePassed { score: state.score });
        }
    }
}
