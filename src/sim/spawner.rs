//! Obstacle spawning
//!
//! In the browser the spawner is fired by a `setInterval` timer that runs
//! independently of the render loop. Headless runs feed it elapsed time
//! instead.

use super::state::{GameEvent, GameState, Obstacle};
use crate::consts::{OBSTACLE_SPAWN_Y, SPAWN_INTERVAL_MS};

/// Append one obstacle above the visible area at a random x and speed
pub fn spawn_obstacle(state: &mut GameState) {
    let x = state.random_obstacle_x();
    let speed = state.random_obstacle_speed();
    state.obstacles.push(Obstacle::new(x, OBSTACLE_SPAWN_Y, speed));
    state.push_event(GameEvent::ObstacleSpawned { x, speed });
}

/// Fixed-period spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    pub period_ms: u32,
    /// Keep spawning while paused or game over
    pub while_frozen: bool,
    elapsed_ms: f64,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_MS, true)
    }
}

impl Spawner {
    pub fn new(period_ms: u32, while_frozen: bool) -> Self {
        Self {
            period_ms,
            while_frozen,
            elapsed_ms: 0.0,
        }
    }

    /// Handle one timer firing. Returns whether an obstacle was added.
    pub fn fire(&self, state: &mut GameState) -> bool {
        if state.is_frozen() && !self.while_frozen {
            return false;
        }
        spawn_obstacle(state);
        true
    }

    /// Advance the timer by `dt_ms` and fire once per whole period elapsed.
    /// Returns the number of firings.
    pub fn advance(&mut self, dt_ms: f64, state: &mut GameState) -> u32 {
        if self.period_ms == 0 {
            return 0;
        }
        let period = f64::from(self.period_ms);
        self.elapsed_ms += dt_ms.max(0.0);

        let mut fired = 0;
        while self.elapsed_ms >= period {
            self.elapsed_ms -= period;
            self.fire(state);
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Viewport};

    #[test]
    fn test_spawn_obstacle() {
        let mut state = GameState::with_viewport(11, Viewport::new(400.0, 600.0));
        spawn_obstacle(&mut state);

        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.pos.y, -80.0);
        assert!((0.0..360.0).contains(&obstacle.pos.x));
        assert!((3.0..5.0).contains(&obstacle.speed));
        assert_eq!(obstacle.size.x, 40.0);
        assert_eq!(obstacle.size.y, 70.0);

        let events = state.drain_events();
        assert!(matches!(events[..], [GameEvent::ObstacleSpawned { .. }]));
    }

    #[test]
    fn test_collection_grows_by_one_per_period() {
        let mut state = GameState::new(5);
        let mut spawner = Spawner::default();

        // 1199 ms: nothing yet
        assert_eq!(spawner.advance(1199.0, &mut state), 0);
        assert!(state.obstacles.is_empty());

        // Crossing the period spawns exactly one
        assert_eq!(spawner.advance(1.0, &mut state), 1);
        assert_eq!(state.obstacles.len(), 1);

        // A long gap catches up period by period
        assert_eq!(spawner.advance(3600.0, &mut state), 3);
        assert_eq!(state.obstacles.len(), 4);
    }

    #[test]
    fn test_spawns_while_frozen_by_default() {
        let mut state = GameState::new(5);
        state.phase = GamePhase::Paused;
        assert!(Spawner::default().fire(&mut state));

        state.phase = GamePhase::GameOver;
        assert!(Spawner::default().fire(&mut state));
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_suspended_while_frozen_when_configured() {
        let mut state = GameState::new(5);
        let spawner = Spawner::new(1200, false);

        state.phase = GamePhase::Paused;
        assert!(!spawner.fire(&mut state));
        assert!(state.obstacles.is_empty());

        state.phase = GamePhase::Running;
        assert!(spawner.fire(&mut state));
        assert_eq!(state.obstacles.len(), 1);
    }
}
