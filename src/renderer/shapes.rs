//! Tessellation of draw commands into colored triangles

use glam::Vec2;
use std::f32::consts::PI;

use super::draw_list::{DrawCmd, DrawList, Rgba, Shape};
use super::vertex::Vertex;

/// Halo opacity at the shape's edge, relative to the fill
pub const GLOW_ALPHA: f32 = 0.45;

/// Triangles for every command in painter's order
pub fn tessellate(list: &DrawList, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * segments as usize * 3);
    for cmd in list.commands() {
        push_cmd(cmd, segments, &mut vertices);
    }
    vertices
}

fn push_cmd(cmd: &DrawCmd, segments: u32, out: &mut Vec<Vertex>) {
    let points = outline(&cmd.shape, segments);
    if points.len() < 3 {
        return;
    }
    let center = centroid(&points);

    // Halo first so the fill sits on top of it
    if cmd.glow > 0.0 {
        halo(&points, center, cmd.glow, cmd.color, out);
    }
    fan(&points, center, cmd.color, out);
}

/// Boundary of a shape as an ordered point loop
pub fn outline(shape: &Shape, segments: u32) -> Vec<Vec2> {
    match shape {
        Shape::Rect { pos, size } => vec![
            *pos,
            Vec2::new(pos.x + size.x, pos.y),
            *pos + *size,
            Vec2::new(pos.x, pos.y + size.y),
        ],
        Shape::Circle { center, radius } => ellipse_points(*center, Vec2::splat(*radius), segments),
        Shape::Ellipse { center, radii } => ellipse_points(*center, *radii, segments),
        Shape::Polygon(points) => points.clone(),
        Shape::Line { from, to, width } => {
            let dir = (*to - *from).normalize_or_zero();
            let perp = Vec2::new(-dir.y, dir.x) * (*width / 2.0);
            vec![*from + perp, *to + perp, *to - perp, *from - perp]
        }
    }
}

fn ellipse_points(center: Vec2, radii: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
        })
        .collect()
}

fn centroid(points: &[Vec2]) -> Vec2 {
    points.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / points.len() as f32
}

/// Triangle fan from `center` to each edge
fn fan(points: &[Vec2], center: Vec2, color: Rgba, out: &mut Vec<Vertex>) {
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
    }
}

/// Band around the outline fading from `GLOW_ALPHA` to transparent
fn halo(points: &[Vec2], center: Vec2, width: f32, color: Rgba, out: &mut Vec<Vertex>) {
    let inner = [color[0], color[1], color[2], color[3] * GLOW_ALPHA];
    let outer = [color[0], color[1], color[2], 0.0];
    let push_out = |p: Vec2| p + (p - center).normalize_or_zero() * width;

    for (i, a) in points.iter().copied().enumerate() {
        let b = points[(i + 1) % points.len()];
        let (a_out, b_out) = (push_out(a), push_out(b));

        // Two triangles per edge
        out.push(Vertex::new(a.x, a.y, inner));
        out.push(Vertex::new(a_out.x, a_out.y, outer));
        out.push(Vertex::new(b.x, b.y, inner));

        out.push(Vertex::new(b.x, b.y, inner));
        out.push(Vertex::new(a_out.x, a_out.y, outer));
        out.push(Vertex::new(b_out.x, b_out.y, outer));
    }
}
