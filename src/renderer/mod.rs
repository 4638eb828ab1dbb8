//! WebGPU rendering module
//!
//! `scene` turns game state into colored triangles in playfield pixels;
//! `pipeline` maps them to the viewport and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
