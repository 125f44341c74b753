//! CPU-side frame recording

use glam::Vec2;

use super::DrawSurface;
use super::shapes::{disc_segments, push_circle};
use super::vertex::{Vertex, colors};
use crate::sim::Color;

/// A frame recorded as a triangle list in surface-local pixels
#[derive(Debug, Clone)]
pub struct VertexBatch {
    size: Vec2,
    clear_color: [f32; 4],
    vertices: Vec<Vertex>,
    discs: usize,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            clear_color: colors::BACKGROUND,
            vertices: Vec::new(),
            discs: 0,
        }
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Discs drawn since the last clear
    pub fn disc_count(&self) -> usize {
        self.discs
    }

    /// Map surface-local pixels (y down) to normalized device coordinates
    pub fn to_ndc(&self, p: [f32; 2]) -> [f32; 2] {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return [0.0, 0.0];
        }
        [
            p[0] / self.size.x * 2.0 - 1.0,
            1.0 - p[1] / self.size.y * 2.0,
        ]
    }

    /// The batch's vertices converted to NDC, ready for upload
    pub fn ndc_vertices(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .map(|v| {
                let [x, y] = self.to_ndc(v.position);
                Vertex::new(x, y, v.color)
            })
            .collect()
    }
}

impl DrawSurface for VertexBatch {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.discs = 0;
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        push_circle(
            &mut self.vertices,
            center,
            radius,
            color.rgba(),
            disc_segments(radius),
        );
        self.discs += 1;
    }
}
