//! Shape generation for 2D primitives
//!
//! Everything is tessellated on the CPU into a flat triangle list; the
//! pipeline just draws vertices.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{PADDLE_SIZE, TILE_SIZE};
use crate::sim::GameState;

/// Triangle segments used for ball-sized circles
const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

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

    vertices
}

/// Generate vertices for a filled axis-aligned quad
pub fn quad(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half = 0.5 * size;
    let tl = Vertex::new(center.x - half.x, center.y - half.y, color);
    let tr = Vertex::new(center.x + half.x, center.y - half.y, color);
    let bl = Vertex::new(center.x - half.x, center.y + half.y, color);
    let br = Vertex::new(center.x + half.x, center.y + half.y, color);

    vec![tl, bl, tr, tr, bl, br]
}

/// Tessellate the whole scene for one frame
pub fn scene_vertices(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.tiles.len() * 6 + 256);

    for tile in &state.tiles {
        vertices.extend(quad(tile.center, TILE_SIZE, colors::TILE));
    }

    vertices.extend(quad(state.paddle.pos, PADDLE_SIZE, colors::PADDLE));
    vertices.extend(circle(
        state.ball.pos,
        state.ball.radius,
        colors::BALL,
        CIRCLE_SEGMENTS,
    ));

    // Health pips, top-left
    for i in 0..state.health {
        let center = Vec2::new(20.0 + i as f32 * 24.0, 20.0);
        vertices.extend(circle(center, 7.0, colors::HEALTH_PIP, 16));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_two_triangles() {
        let verts = quad(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0), colors::TILE);
        assert_eq!(verts.len(), 6);

        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().copied().fold(f32::MAX, f32::min), 8.0);
        assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 12.0);
        assert_eq!(ys.iter().copied().fold(f32::MAX, f32::min), 19.0);
        assert_eq!(ys.iter().copied().fold(f32::MIN, f32::max), 21.0);
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 5.0, colors::BALL, 12);
        assert_eq!(verts.len(), 36);
    }

    #[test]
    fn test_scene_includes_all_entities() {
        let state = GameState::new(1);
        let verts = scene_vertices(&state);
        let expected = state.tiles.len() * 6 // tiles
            + 6 // paddle
            + (CIRCLE_SEGMENTS as usize) * 3 // ball
            + state.health as usize * 16 * 3; // pips
        assert_eq!(verts.len(), expected);
    }
}
