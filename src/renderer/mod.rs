//! WebGPU rendering module
//!
//! Flat-colored rectangles, one triangle list per frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, world_to_ndc};
pub use shapes::{rect, scene_vertices};
pub use vertex::Vertex;
