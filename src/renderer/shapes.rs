//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::scene::DrawCommand;
use crate::sim::BoundingBox;

/// Two triangles covering a box, in world pixels
pub fn rect(bbox: &BoundingBox, color: [f32; 4]) -> Vec<Vertex> {
    let (left, top) = (bbox.x, bbox.y);
    let (right, bottom) = (bbox.right(), bbox.bottom());

    vec![
        Vertex::new(left, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, top, color),
        Vertex::new(right, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, bottom, color),
    ]
}

/// Flatten a draw list into one triangle list, keeping its order
pub fn scene_vertices(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * 6);
    for cmd in commands {
        vertices.extend(rect(&cmd.rect, cmd.color));
    }
    vertices
}
