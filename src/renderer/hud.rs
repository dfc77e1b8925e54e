//! Text overlay: score, pause and game-over screens
//!
//! Lines are computed from state so they can be tested natively; in the
//! browser they are drawn with `fillText` on a transparent 2D canvas
//! stacked over the WebGPU canvas.

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// One line of overlay text in canvas pixels (baseline position)
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: &'static str,
    pub color: &'static str,
}

impl TextLine {
    fn new(text: impl Into<String>, x: f64, y: f64, font: &'static str, color: &'static str) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
        }
    }
}

/// Everything the overlay shows for the current state.
/// `controller` is the connected pad id, only shown when the debug line is on.
pub fn overlay_lines(state: &GameState, settings: &Settings, controller: Option<&str>) -> Vec<TextLine> {
    let mut lines = Vec::with_capacity(4);

    match state.phase {
        GamePhase::Running => {}
        GamePhase::Paused => {
            lines.push(TextLine::new("PAUSED", 120.0, 300.0, "36px Arial", "white"));
            lines.push(TextLine::new("Press B or Esc", 135.0, 340.0, "18px Arial", "white"));
        }
        GamePhase::GameOver => {
            lines.push(TextLine::new("Game Over", 90.0, 300.0, "36px Arial", "yellow"));
            lines.push(TextLine::new(
                settings.restart_hint(),
                115.0,
                340.0,
                "18px Arial",
                "yellow",
            ));
        }
    }

    lines.push(TextLine::new(
        format!("Score: {}", state.score),
        10.0,
        30.0,
        "20px Arial",
        "white",
    ));

    if settings.show_controller_debug {
        lines.push(TextLine::new(
            format!("Controller: {}", controller.unwrap_or("none")),
            10.0,
            55.0,
            "14px Arial",
            "gray",
        ));
    }

    lines
}

/// 2D canvas the overlay is drawn on (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct TextOverlay {
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl TextOverlay {
    pub fn new(canvas: web_sys::HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("2d context unavailable"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Clear and draw a fresh set of lines
    pub fn draw(&self, lines: &[TextLine]) {
        let w = f64::from(self.canvas.width());
        let h = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for line in lines {
            self.ctx.set_fill_style_str(line.color);
            self.ctx.set_font(line.font);
            if let Err(e) = self.ctx.fill_text(&line.text, line.x, line.y) {
                log::warn!("fillText failed: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_running_shows_only_score() {
        let mut state = GameState::new(1);
        state.score = 12;
        let lines = overlay_lines(&state, &Settings::default(), None);
        assert_eq!(texts(&lines), vec!["Score: 12"]);
        assert_eq!((lines[0].x, lines[0].y), (10.0, 30.0));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Paused;
        let lines = overlay_lines(&state, &Settings::default(), None);
        assert_eq!(texts(&lines), vec!["PAUSED", "Press B or Esc", "Score: 0"]);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.score = 3;

        let lines = overlay_lines(&state, &Settings::default(), None);
        assert_eq!(texts(&lines), vec!["Game Over", "Tap / A to Restart", "Score: 3"]);

        let touch_only = Settings {
            gamepad_enabled: false,
            ..Default::default()
        };
        let lines = overlay_lines(&state, &touch_only, None);
        assert_eq!(lines[1].text, "Tap to Restart");
    }

    #[test]
    fn test_controller_debug_line() {
        let state = GameState::new(1);
        let settings = Settings {
            show_controller_debug: true,
            ..Default::default()
        };

        let lines = overlay_lines(&state, &settings, Some("Xbox Wireless Controller"));
        assert_eq!(lines.last().unwrap().text, "Controller: Xbox Wireless Controller");

        let lines = overlay_lines(&state, &settings, None);
        assert_eq!(lines.last().unwrap().text, "Controller: none");
    }
}
