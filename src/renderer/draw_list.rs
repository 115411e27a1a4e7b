//! Backend-neutral list of 2D primitives for one frame
//!
//! Coordinates are canvas pixels: origin top-left, y down, 800x600.

use glam::Vec2;

use crate::hex_to_rgb;

/// Straight (non-premultiplied) RGBA
pub type Rgba = [f32; 4];

/// `0xRRGGBB` plus alpha
#[inline]
pub fn rgba(hex: u32, alpha: f32) -> Rgba {
    let [r, g, b] = hex_to_rgb(hex);
    [r, g, b, alpha]
}

/// Geometry of a fill
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { pos: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2 },
    /// Must be star-shaped around the average of its points
    Polygon(Vec<Vec2>),
    Line { from: Vec2, to: Vec2, width: f32 },
}

impl Shape {
    pub fn rect(pos: Vec2, size: Vec2) -> Self {
        Shape::Rect { pos, size }
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        Shape::Circle { center, radius }
    }

    /// Rectangle of `size` centered at `center`, rotated by `angle` radians
    pub fn rotated_rect(center: Vec2, size: Vec2, angle: f32) -> Self {
        let half = size / 2.0;
        let rot = Vec2::from_angle(angle);
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ];
        Shape::Polygon(corners.iter().map(|c| center + rot.rotate(*c)).collect())
    }
}

/// One fill with its color and optional halo
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub shape: Shape,
    pub color: Rgba,
    /// Halo width in pixels, 0 for none
    pub glow: f32,
}

/// Commands in painter's order plus the clear color
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    clear: Rgba,
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(clear: Rgba) -> Self {
        Self {
            clear,
            cmds: Vec::new(),
        }
    }

    /// Empty the list for a new frame, keeping its allocation
    pub fn reset(&mut self, clear: Rgba) {
        self.clear = clear;
        self.cmds.clear();
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear
    }

    pub fn fill(&mut self, shape: Shape, color: Rgba) {
        self.glow(shape, color, 0.0);
    }

    pub fn glow(&mut self, shape: Shape, color: Rgba, glow: f32) {
        // Fully transparent fills draw nothing
        if color[3] <= 0.0 {
            return;
        }
        self.cmds.push(DrawCmd { shape, color, glow });
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}
