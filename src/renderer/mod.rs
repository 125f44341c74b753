//! Rendering module
//!
//! The simulation draws through [`DrawSurface`]. [`VertexBatch`] records a
//! frame as triangles; [`RenderState`] uploads that batch to WebGPU.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::RenderState;
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::Color;

/// A 2D raster target in surface-local pixels (origin top-left, y down)
pub trait DrawSurface {
    /// Surface size in pixels
    fn size(&self) -> Vec2;

    /// Clear the whole surface
    fn clear(&mut self);

    /// Draw a filled disc
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color);
}
