//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segment count for a disc of `radius` pixels (more for bigger discs)
pub fn disc_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(12, 64)
}

/// Append a filled circle (triangle fan from the centre) to `vertices`
pub fn push_circle(
    vertices: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_segments_clamped() {
        assert_eq!(disc_segments(1.0), 12);
        assert_eq!(disc_segments(20.0), 30);
        assert_eq!(disc_segments(500.0), 64);
    }

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(50.0, 60.0);
        let mut verts = Vec::new();
        push_circle(&mut verts, center, 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);

        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [50.0, 60.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 10.0).abs() < 1e-3);
            }
        }
    }
}
