//! Collision detection for circles and axis-aligned boxes
//!
//! Both games re-run these tests pairwise every tick. Entity counts stay in
//! the tens, so there is no broad phase.

use glam::Vec2;

/// A circle in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Circle-circle contact test: `distance - ra - rb < epsilon`
///
/// With `epsilon == 0.0` this is a strict overlap test: circles whose
/// centers are exactly `ra + rb` apart do not collide.
#[inline]
pub fn circles_collide(a: &Circle, b: &Circle, epsilon: f32) -> bool {
    a.center.distance(b.center) - a.radius - b.radius < epsilon
}

/// Axis-aligned bounding box overlap (touching edges do not overlap)
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circle_literal_radii() {
        let projectile = Circle::new(Vec2::ZERO, 4.0);

        let near = Circle::new(Vec2::new(23.0, 0.0), 20.0);
        assert!(circles_collide(&projectile, &near, 0.0));

        let far = Circle::new(Vec2::new(25.0, 0.0), 20.0);
        assert!(!circles_collide(&projectile, &far, 0.0));

        // Exactly touching is not a hit
        let touching = Circle::new(Vec2::new(24.0, 0.0), 20.0);
        assert!(!circles_collide(&projectile, &touching, 0.0));
    }

    #[test]
    fn test_circle_epsilon_slack() {
        let a = Circle::new(Vec2::ZERO, 4.0);
        let b = Circle::new(Vec2::new(24.5, 0.0), 20.0);
        assert!(!circles_collide(&a, &b, 0.0));
        assert!(circles_collide(&a, &b, 1.0));
    }

    #[test]
    fn test_aabb_runner_example() {
        let player = Rect::new(100.0, 100.0, 40.0, 60.0);
        let obstacle = Rect::new(130.0, 80.0, 30.0, 80.0);
        assert!(aabb_overlap(&player, &obstacle));
        assert!(aabb_overlap(&obstacle, &player));
    }

    #[test]
    fn test_aabb_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &right));
        assert!(!aabb_overlap(&a, &below));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.center(), Vec2::new(30.0, 50.0));
        assert_eq!(r.max(), Vec2::new(50.0, 80.0));
    }

    proptest! {
        #[test]
        fn prop_circles_apart_never_hit(
            ra in 0.5f32..50.0,
            rb in 0.5f32..50.0,
            gap in 0.01f32..500.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let d = ra + rb + gap;
            let a = Circle::new(Vec2::ZERO, ra);
            let b = Circle::new(Vec2::new(angle.cos(), angle.sin()) * d, rb);
            prop_assert!(!circles_collide(&a, &b, 0.0));
        }

        #[test]
        fn prop_circles_overlapping_always_hit(
            ra in 0.5f32..50.0,
            rb in 0.5f32..50.0,
            frac in 0.0f32..0.99,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let d = (ra + rb) * frac;
            let a = Circle::new(Vec2::ZERO, ra);
            let b = Circle::new(Vec2::new(angle.cos(), angle.sin()) * d, rb);
            prop_assert!(circles_collide(&a, &b, 0.0));
        }

        #[test]
        fn prop_aabb_disjoint_x_never_collide(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            gap in 0.0f32..100.0,
            other_y in -500.0f32..500.0,
            other_w in 1.0f32..100.0,
            other_h in 1.0f32..100.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(x + w + gap, other_y, other_w, other_h);
            prop_assert!(!aabb_overlap(&a, &b));
            prop_assert!(!aabb_overlap(&b, &a));
        }

        #[test]
        fn prop_aabb_disjoint_y_never_collide(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            gap in 0.0f32..100.0,
            other_x in -500.0f32..500.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(other_x, y + h + gap, w, h);
            prop_assert!(!aabb_overlap(&a, &b));
        }
    }
}
