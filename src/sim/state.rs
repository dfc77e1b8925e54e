//! Game state and core simulation types
//!
//! One owned `GameState` is the whole session: player, obstacles, score,
//! phase and the seeded RNG. Frontends pass it explicitly to `tick`,
//! the spawner and the renderer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay (mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Player and obstacles move
    #[default]
    Running,
    /// Motion frozen, paused overlay shown
    Paused,
    /// Motion frozen until restart
    GameOver,
}

/// Notable things that happened during a tick or spawn, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { x: f32, speed: f32 },
    /// An obstacle left the bottom edge; `score` is the new total
    ObstaclePassed { score: u32 },
    Collision { score: u32 },
    Paused,
    Resumed,
    Restarted,
}

impl GameEvent {
    /// Log at a level matching how notable the event is
    pub fn log(&self) {
        match *self {
            GameEvent::ObstacleSpawned { x, speed } => {
                log::debug!("Obstacle spawned at x={:.1}, speed {:.2}", x, speed)
            }
            GameEvent::ObstaclePassed { score } => log::debug!("Obstacle passed, score {}", score),
            GameEvent::Collision { score } => log::info!("Game over with score {}", score),
            GameEvent::Paused => log::info!("Paused"),
            GameEvent::Resumed => log::info!("Resumed"),
            GameEvent::Restarted => log::info!("Game restarted"),
        }
    }
}

/// The visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface size for a browser window: capped width, 80% of the height capped
    pub fn for_window(window_width: f32, window_height: f32) -> Self {
        Self {
            width: window_width.min(MAX_VIEW_WIDTH).floor().max(0.0),
            height: (window_height * VIEW_HEIGHT_FRACTION)
                .min(MAX_VIEW_HEIGHT)
                .floor()
                .max(0.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MAX_VIEW_WIDTH, MAX_VIEW_HEIGHT)
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed in units per tick
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Keep the car fully inside the visible width
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x + self.size.x > viewport.width {
            self.pos.x = viewport.width - self.size.x;
        }
    }
}

/// An oncoming car
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed in units per tick, fixed at creation
    pub speed: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Reuse this slot as a fresh car above the screen, keeping its speed
    pub fn recycle(&mut self, x: f32) {
        self.pos = Vec2::new(x, OBSTACLE_RECYCLE_Y);
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    /// Obstacle slots; grows by one per spawn, recycled in place, emptied on reset
    pub obstacles: Vec<Obstacle>,
    pub viewport: Viewport,
    /// Simulation tick counter (not reset on restart)
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed and the default viewport
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Viewport::default())
    }

    pub fn with_viewport(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            viewport,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Back to a fresh run: player home, no obstacles, zero score, running.
    /// The RNG stream and viewport carry over.
    pub fn reset(&mut self) {
        self.player = Player::default();
        self.obstacles.clear();
        self.score = 0;
        self.phase = GamePhase::Running;
    }

    /// Apply a new visible area (window resize)
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Random x for an obstacle: uniform in [0, width - obstacle width)
    pub fn random_obstacle_x(&mut self) -> f32 {
        let max_x = self.viewport.width - OBSTACLE_WIDTH;
        if max_x > 0.0 {
            self.rng.random_range(0.0..max_x)
        } else {
            0.0
        }
    }

    /// Random obstacle speed: uniform in [min, max)
    pub fn random_obstacle_speed(&mut self) -> f32 {
        self.rng
            .random_range(OBSTACLE_MIN_SPEED..OBSTACLE_MAX_SPEED)
    }

    pub fn is_frozen(&self) -> bool {
        self.phase != GamePhase::Running
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(180.0, 450.0));
        assert_eq!(state.player.size, Vec2::new(40.0, 70.0));
    }

    #[test]
    fn test_reset_restores_initial_session() {
        let mut state = GameState::new(7);
        state.player.pos.x = 12.0;
        state.score = 9;
        state.phase = GamePhase::GameOver;
        state.obstacles.push(Obstacle::new(10.0, 10.0, 3.5));
        state.obstacles.push(Obstacle::new(90.0, 300.0, 4.5));

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player, Player::default());
    }

    #[test]
    fn test_viewport_for_window() {
        // Desktop: both caps apply
        assert_eq!(Viewport::for_window(1920.0, 1080.0), Viewport::new(400.0, 600.0));
        // Phone portrait: width and 80% height, truncated
        assert_eq!(Viewport::for_window(375.0, 667.0), Viewport::new(375.0, 533.0));
    }

    #[test]
    fn test_random_x_in_range() {
        let mut state = GameState::with_viewport(42, Viewport::new(300.0, 500.0));
        for _ in 0..1000 {
            let x = state.random_obstacle_x();
            assert!((0.0..260.0).contains(&x), "x out of range: {x}");
        }
    }

    #[test]
    fn test_random_x_narrow_viewport() {
        let mut state = GameState::with_viewport(42, Viewport::new(30.0, 500.0));
        assert_eq!(state.random_obstacle_x(), 0.0);
    }

    #[test]
    fn test_random_speed_in_range() {
        let mut state = GameState::new(3);
        for _ in 0..1000 {
            let speed = state.random_obstacle_speed();
            assert!((3.0..5.0).contains(&speed), "speed out of range: {speed}");
        }
    }

    #[test]
    fn test_clamp_to_viewport() {
        let viewport = Viewport::new(400.0, 600.0);
        let mut player = Player::default();

        player.pos.x = -12.0;
        player.clamp_to(&viewport);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 395.0;
        player.clamp_to(&viewport);
        assert_eq!(player.pos.x, 360.0);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1);
        state.push_event(GameEvent::Paused);
        assert_eq!(state.drain_events(), vec![GameEvent::Paused]);
        assert!(state.drain_events().is_empty());
    }
}
