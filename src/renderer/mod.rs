//! Rendering module
//!
//! Worlds are painted into a `DrawList` of 2D primitives, tessellated into
//! colored triangles and presented with WebGPU.

pub mod draw_list;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use draw_list::{DrawCmd, DrawList, Rgba, Shape, rgba};
pub use pipeline::{RenderError, RenderState};
pub use scene::{Painter, Scene, Style, draw_entity};
pub use vertex::Vertex;
