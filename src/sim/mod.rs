//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, speeds in units per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{FrameClock, FramePacing};
pub use collision::Rect;
pub use spawner::{Spawner, spawn_obstacle};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Viewport};
pub use tick::{TickInput, tick};
