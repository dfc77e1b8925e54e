//! Raw input events mapped to game intents
//!
//! Sustained intents (left/right) are tracked per source and OR'd together,
//! so lifting a finger does not cancel a held arrow key. One-shot intents
//! (pause toggle, restart) queue until the next `take_tick_input`.

use crate::settings::{KeyAction, KeyBindings};
use crate::sim::TickInput;

/// Standard-mapping gamepad button indices
pub mod buttons {
    pub const A: usize = 0;
    pub const B: usize = 1;
    pub const DPAD_LEFT: usize = 14;
    pub const DPAD_RIGHT: usize = 15;
}

/// Fires once per not-pressed → pressed transition
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    /// Feed the current pressed state; true on the rising edge only
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        fired
    }

    pub fn reset(&mut self) {
        self.was_pressed = false;
    }
}

/// Left/right held by one input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
}

/// Platform-neutral view of one polled gamepad.
/// Missing axes or buttons are simply not present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub id: String,
    pub axes: Vec<f64>,
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn axis(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Stick and D-pad folded into a steer, with the stick thresholded
    pub fn steer(&self, threshold: f32) -> Steer {
        let x = self.axis(0);
        let threshold = f64::from(threshold);
        Steer {
            left: x < -threshold || self.button(buttons::DPAD_LEFT),
            right: x > threshold || self.button(buttons::DPAD_RIGHT),
        }
    }
}

/// All input-derived intents between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keyboard: Steer,
    touch: Steer,
    gamepad: Steer,
    pause_key: EdgeDetector,
    pause_button: EdgeDetector,
    pending_pause: bool,
    pending_restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined sustained intents across sources
    pub fn steer(&self) -> Steer {
        Steer {
            left: self.keyboard.left || self.touch.left || self.gamepad.left,
            right: self.keyboard.right || self.touch.right || self.gamepad.right,
        }
    }

    /// Key down by `KeyboardEvent.code`. Returns true if the key is bound.
    pub fn key_down(&mut self, code: &str, keys: &KeyBindings) -> bool {
        match keys.action_for(code) {
            Some(KeyAction::Left) => self.keyboard.left = true,
            Some(KeyAction::Right) => self.keyboard.right = true,
            Some(KeyAction::Pause) => {
                // Auto-repeat keydowns arrive without a keyup in between
                if self.pause_key.update(true) {
                    self.pending_pause = true;
                }
            }
            None => return false,
        }
        true
    }

    /// Key up by `KeyboardEvent.code`. Returns true if the key is bound.
    pub fn key_up(&mut self, code: &str, keys: &KeyBindings) -> bool {
        match keys.action_for(code) {
            Some(KeyAction::Left) => self.keyboard.left = false,
            Some(KeyAction::Right) => self.keyboard.right = false,
            Some(KeyAction::Pause) => {
                self.pause_key.update(false);
            }
            None => return false,
        }
        true
    }

    /// First touch point at `x` within a window `window_width` wide
    pub fn touch_start(&mut self, x: f32, window_width: f32, game_over: bool) {
        if game_over {
            self.pending_restart = true;
            return;
        }
        if x < window_width / 2.0 {
            self.touch.left = true;
        } else {
            self.touch.right = true;
        }
    }

    pub fn touch_end(&mut self) {
        self.touch = Steer::default();
    }

    /// Any mouse/pen/touch press
    pub fn pointer_down(&mut self, game_over: bool) {
        if game_over {
            self.pending_restart = true;
        }
    }

    /// Apply one gamepad poll. `None` means no pad is connected.
    pub fn poll_gamepad(&mut self, pad: Option<&GamepadSnapshot>, threshold: f32, game_over: bool) {
        let Some(pad) = pad else {
            self.gamepad = Steer::default();
            self.pause_button.reset();
            return;
        };

        self.gamepad = pad.steer(threshold);

        if pad.button(buttons::A) && game_over {
            self.pending_restart = true;
        }
        if self.pause_button.update(pad.button(buttons::B)) {
            self.pending_pause = true;
        }
    }

    /// Input for the next tick; one-shot intents are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let steer = self.steer();
        TickInput {
            left: steer.left,
            right: steer.right,
            toggle_pause: std::mem::take(&mut self.pending_pause),
            restart: std::mem::take(&mut self.pending_restart),
        }
    }
}
