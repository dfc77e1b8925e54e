//! Platform abstraction layer
//!
//! Browser events are translated into platform-neutral calls here; the
//! wasm entry point only extracts raw values (key codes, touch x, gamepad
//! axes/buttons) and forwards them.

pub mod input;

pub use input::{EdgeDetector, GamepadSnapshot, InputState, Steer};
