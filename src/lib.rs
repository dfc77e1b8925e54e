//! Traffic Dodge - A vertically scrolling dodge-the-traffic arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, spawning)
//! - `platform`: Keyboard/touch/pointer/gamepad events mapped to intents
//! - `renderer`: WebGPU rectangles plus a 2D text overlay
//! - `settings`: Data-driven controls and timing
//! - `headless`: Browser-free session runner for smoke runs and tests

pub mod headless;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{GamepadSnapshot, InputState};
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Player car size and speed (units per tick)
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player spawn position (not viewport-relative)
    pub const PLAYER_START_X: f32 = 180.0;
    pub const PLAYER_START_Y: f32 = 450.0;

    /// Obstacle car size
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 70.0;
    /// Obstacle speed range [min, max)
    pub const OBSTACLE_MIN_SPEED: f32 = 3.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 5.0;
    /// Y of a freshly spawned obstacle
    pub const OBSTACLE_SPAWN_Y: f32 = -80.0;
    /// Y of an obstacle recycled after leaving the bottom edge
    pub const OBSTACLE_RECYCLE_Y: f32 = -100.0;

    /// Spawner period
    pub const SPAWN_INTERVAL_MS: u32 = 1200;
    /// Gamepad poll period
    pub const GAMEPAD_POLL_MS: u32 = 100;
    /// Left-stick deflection needed to register a direction
    pub const STICK_THRESHOLD: f32 = 0.3;

    /// Drawing surface caps
    pub const MAX_VIEW_WIDTH: f32 = 400.0;
    pub const MAX_VIEW_HEIGHT: f32 = 600.0;
    /// Share of the window height given to the surface
    pub const VIEW_HEIGHT_FRACTION: f32 = 0.8;

    /// Fixed-step pacing: 60 Hz ticks
    pub const SIM_STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per refresh to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest refresh gap fed into the accumulator (tab switches etc.)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;
}
