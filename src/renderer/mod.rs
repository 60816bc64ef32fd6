//! WebGPU rendering module
//!
//! All primitives are triangulated on the CPU (`shapes`, `scene`) into one
//! colored vertex buffer per frame, drawn by a single pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
