//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a textured quad covering the whole texture
pub fn textured_quad(origin: Vec2, size: Vec2, tint: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);

    vec![
        Vertex::new(x0, y0, 0.0, 0.0, tint),
        Vertex::new(x1, y0, 1.0, 0.0, tint),
        Vertex::new(x0, y1, 0.0, 1.0, tint),
        Vertex::new(x0, y1, 0.0, 1.0, tint),
        Vertex::new(x1, y0, 1.0, 0.0, tint),
        Vertex::new(x1, y1, 1.0, 1.0, tint),
    ]
}

/// Append a solid-colored axis-aligned rectangle
pub fn push_rect(vertices: &mut Vec<Vertex>, origin: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);

    vertices.push(Vertex::solid(x0, y0, color));
    vertices.push(Vertex::solid(x1, y0, color));
    vertices.push(Vertex::solid(x0, y1, color));

    vertices.push(Vertex::solid(x0, y1, color));
    vertices.push(Vertex::solid(x1, y0, color));
    vertices.push(Vertex::solid(x1, y1, color));
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + Vec2::from_angle(theta1) * inner_radius;
        let outer1 = center + Vec2::from_angle(theta1) * outer_radius;
        let inner2 = center + Vec2::from_angle(theta2) * inner_radius;
        let outer2 = center + Vec2::from_angle(theta2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::solid(inner1.x, inner1.y, color));
        vertices.push(Vertex::solid(outer1.x, outer1.y, color));
        vertices.push(Vertex::solid(inner2.x, inner2.y, color));

        vertices.push(Vertex::solid(inner2.x, inner2.y, color));
        vertices.push(Vertex::solid(outer1.x, outer1.y, color));
        vertices.push(Vertex::solid(outer2.x, outer2.y, color));
    }

    vertices
}
