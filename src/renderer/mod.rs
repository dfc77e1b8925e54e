//! Rendering module
//!
//! Cars are plain rectangles drawn through a WebGPU pipeline; text goes on
//! a 2D overlay canvas.

pub mod hud;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use hud::{TextLine, overlay_lines};
pub use pipeline::RenderState;
pub use vertex::Vertex;
