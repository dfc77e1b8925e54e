//! Shape generation for 2D primitives
//!
//! Everything is in screen pixels (origin top-left, y down); the pipeline
//! maps to NDC on upload.

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, Rect};

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Rectangles to draw this frame.
/// Only a running game shows cars; the paused and game-over screens are
/// text alone.
pub fn scene(state: &GameState) -> Vec<Vertex> {
    if state.phase != GamePhase::Running {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((state.obstacles.len() + 1) * 6);
    vertices.extend(rect(&state.player.rect(), colors::PLAYER));
    for obstacle in &state.obstacles {
        vertices.extend(rect(&obstacle.rect(), colors::OBSTACLE));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_rect_corners() {
        let vertices = rect(&Rect::new(10.0, 20.0, 40.0, 70.0), colors::PLAYER);
        for v in &vertices {
            assert!(v.position[0] == 10.0 || v.position[0] == 50.0);
            assert!(v.position[1] == 20.0 || v.position[1] == 90.0);
            assert_eq!(v.color, colors::PLAYER);
        }
    }

    #[test]
    fn test_scene_running() {
        let mut state = GameState::new(1);
        state.obstacles.push(Obstacle::new(0.0, 0.0, 3.0));
        state.obstacles.push(Obstacle::new(100.0, 50.0, 3.0));

        let vertices = scene(&state);
        assert_eq!(vertices.len(), 18);
        assert_eq!(vertices[0].color, colors::PLAYER);
        assert_eq!(vertices[6].color, colors::OBSTACLE);
        assert_eq!(vertices[17].color, colors::OBSTACLE);
    }

    #[test]
    fn test_scene_frozen_is_empty() {
        let mut state = GameState::new(1);
        state.obstacles.push(Obstacle::new(0.0, 0.0, 3.0));

        state.phase = GamePhase::Paused;
        assert!(scene(&state).is_empty());
        state.phase = GamePhase::GameOver;
        assert!(scene(&state).is_empty());
    }
}
