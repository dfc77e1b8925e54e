//! Game settings
//!
//! Read once at startup from an optional JSON block in the host page:
//! `<script id="game-config" type="application/json">{ ... }</script>`.
//! Missing fields fall back to defaults. Nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::{GAMEPAD_POLL_MS, SPAWN_INTERVAL_MS, STICK_THRESHOLD};
use crate::sim::FramePacing;

/// Keyboard codes (`KeyboardEvent.code`) bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub pause: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec!["ArrowLeft".to_string()],
            right: vec!["ArrowRight".to_string()],
            pause: vec!["Escape".to_string()],
        }
    }
}

/// What a key code is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Pause,
}

impl KeyBindings {
    pub fn action_for(&self, code: &str) -> Option<KeyAction> {
        let bound = |codes: &[String]| codes.iter().any(|c| c == code);
        if bound(&self.left) {
            Some(KeyAction::Left)
        } else if bound(&self.right) {
            Some(KeyAction::Right)
        } else if bound(&self.pause) {
            Some(KeyAction::Pause)
        } else {
            None
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keyboard remapping
    pub keys: KeyBindings,

    // === Timing ===
    /// Obstacle spawn period
    pub spawn_interval_ms: u32,
    /// Keep spawning while paused or game over
    pub spawn_while_frozen: bool,
    /// Refresh callback to tick mapping
    pub frame_pacing: FramePacing,

    // === Gamepad ===
    /// Poll connected gamepads and show the "A" restart hint
    pub gamepad_enabled: bool,
    pub gamepad_poll_ms: u32,
    /// Left-stick deflection needed to steer
    pub stick_threshold: f32,
    /// Show the controller connection line under the score
    pub show_controller_debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_while_frozen: true,
            frame_pacing: FramePacing::PerRefresh,

            gamepad_enabled: true,
            gamepad_poll_ms: GAMEPAD_POLL_MS,
            stick_threshold: STICK_THRESHOLD,
            show_controller_debug: false,
        }
    }
}

impl Settings {
    /// Element id of the JSON config block
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const CONFIG_ELEMENT_ID: &'static str = "game-config";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Restart hint shown under "Game Over"
    pub fn restart_hint(&self) -> &'static str {
        if self.gamepad_enabled {
            "Tap / A to Restart"
        } else {
            "Tap to Restart"
        }
    }

    /// Load settings from the page's config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid game config, using defaults: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.spawn_interval_ms, 1200);
        assert_eq!(settings.gamepad_poll_ms, 100);
        assert_eq!(settings.stick_threshold, 0.3);
        assert!(settings.spawn_while_frozen);
        assert_eq!(settings.frame_pacing, FramePacing::PerRefresh);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "gamepad_enabled": false, "frame_pacing": "fixed_step", "keys": { "left": ["KeyA"] } }"#,
        )
        .unwrap();

        assert!(!settings.gamepad_enabled);
        assert_eq!(settings.frame_pacing, FramePacing::FixedStep);
        assert_eq!(settings.keys.left, vec!["KeyA".to_string()]);
        // Untouched bindings and timing keep their defaults
        assert_eq!(settings.keys.right, vec!["ArrowRight".to_string()]);
        assert_eq!(settings.spawn_interval_ms, 1200);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "spawn_interval_ms": "soon" }"#).is_err());
    }

    #[test]
    fn test_key_actions() {
        let keys = KeyBindings {
            left: vec!["ArrowLeft".into(), "KeyA".into()],
            ..Default::default()
        };
        assert_eq!(keys.action_for("KeyA"), Some(KeyAction::Left));
        assert_eq!(keys.action_for("ArrowLeft"), Some(KeyAction::Left));
        assert_eq!(keys.action_for("ArrowRight"), Some(KeyAction::Right));
        assert_eq!(keys.action_for("Escape"), Some(KeyAction::Pause));
        assert_eq!(keys.action_for("Space"), None);
    }

    #[test]
    fn test_restart_hint_follows_gamepad_support() {
        let mut settings = Settings::default();
        assert_eq!(settings.restart_hint(), "Tap / A to Restart");
        settings.gamepad_enabled = false;
        assert_eq!(settings.restart_hint(), "Tap to Restart");
    }
}
