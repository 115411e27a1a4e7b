//! Turns a world into a frame's `DrawList`
//!
//! Every entity kind has exactly one drawing routine, selected by
//! `draw_entity`. Cosmetic flicker (thruster, engine flame) uses the
//! painter's own RNG so the simulation stream is never touched.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::draw_list::{DrawList, Rgba, Shape, rgba};
use crate::consts::CANVAS_WIDTH;
use crate::sim::entity::EntityRef;
use crate::sim::runner::state::{GROUND_HEIGHT, GROUND_TOP};
use crate::sim::runner::{Character, Runner, RunnerState};
use crate::sim::shooter::state::{PROJECTILE_COLOR, SHIP_COLOR};
use crate::sim::shooter::{Ship, ShooterState};

pub const SHOOTER_BACKGROUND: u32 = 0x000000;
pub const RUNNER_BACKGROUND: u32 = 0x0f0c29;
pub const GROUND_COLOR: u32 = 0x1a1a2e;
pub const HORIZON_COLOR: u32 = 0x00ff88;
pub const HORIZON_WIDTH: f32 = 2.0;
pub const DUST_ALPHA: f32 = 0.5;

const WHITE: u32 = 0xffffff;
const THRUSTER_COLOR: u32 = 0x00ffff;
const FLAME_COLOR: u32 = 0xff4400;
const EYE_COLOR: u32 = 0x000000;

/// Halo widths, in pixels
const GLOW_STRONG: f32 = 15.0;
const GLOW_SOFT: f32 = 10.0;
const GLOW_FAINT: f32 = 5.0;

/// Visual options projected from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Segments used for circles and ellipses
    pub circle_segments: u32,
    /// Draw halos around neon shapes
    pub glow: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            circle_segments: 32,
            glow: true,
        }
    }
}

impl Style {
    fn glow(&self, width: f32) -> f32 {
        if self.glow { width } else { 0.0 }
    }
}

/// A world that can be drawn
pub trait Scene {
    fn clear_color(&self) -> Rgba;
    /// Entities in painter's order
    fn entities(&self) -> impl Iterator<Item = EntityRef<'_>>;
}

impl Scene for ShooterState {
    fn clear_color(&self) -> Rgba {
        rgba(SHOOTER_BACKGROUND, 1.0)
    }

    fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        ShooterState::entities(self)
    }
}

impl Scene for RunnerState {
    fn clear_color(&self) -> Rgba {
        rgba(RUNNER_BACKGROUND, 1.0)
    }

    fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        RunnerState::entities(self)
    }
}

/// Builds draw lists frame after frame, reusing one allocation
pub struct Painter {
    pub style: Style,
    rng: Pcg32,
    list: DrawList,
}

impl Painter {
    pub fn new(style: Style, seed: u64) -> Self {
        Self {
            style,
            rng: Pcg32::seed_from_u64(seed),
            list: DrawList::new(rgba(SHOOTER_BACKGROUND, 1.0)),
        }
    }

    pub fn paint<S: Scene>(&mut self, scene: &S) -> &DrawList {
        self.list.reset(scene.clear_color());
        for entity in scene.entities() {
            draw_entity(&mut self.list, entity, &self.style, &mut self.rng);
        }
        &self.list
    }
}

/// Append the commands for one entity
pub fn draw_entity(list: &mut DrawList, entity: EntityRef<'_>, style: &Style, rng: &mut Pcg32) {
    match entity {
        EntityRef::Star(star) => list.fill(
            Shape::rect(star.pos, Vec2::splat(star.size)),
            rgba(WHITE, star.brightness),
        ),
        EntityRef::Ship(ship) => draw_ship(list, ship, style),
        EntityRef::Projectile(p) => list.glow(
            Shape::circle(p.pos, p.radius),
            rgba(PROJECTILE_COLOR, 1.0),
            style.glow(GLOW_SOFT),
        ),
        EntityRef::Enemy(enemy) => list.glow(
            Shape::circle(enemy.pos, enemy.radius),
            rgba(enemy.color, 1.0),
            style.glow(GLOW_SOFT),
        ),
        EntityRef::Particle(p) => list.fill(
            Shape::circle(p.pos, p.radius),
            rgba(p.color, p.alpha.clamp(0.0, 1.0)),
        ),
        EntityRef::Ground => {
            list.fill(
                Shape::Rect {
                    pos: Vec2::new(0.0, GROUND_TOP),
                    size: Vec2::new(CANVAS_WIDTH, GROUND_HEIGHT),
                },
                rgba(GROUND_COLOR, 1.0),
            );
            list.fill(
                Shape::Line {
                    from: Vec2::new(0.0, GROUND_TOP),
                    to: Vec2::new(CANVAS_WIDTH, GROUND_TOP),
                    width: HORIZON_WIDTH,
                },
                rgba(HORIZON_COLOR, 1.0),
            );
        }
        EntityRef::Dust(dust) => list.fill(
            Shape::rect(dust.pos, Vec2::splat(dust.size)),
            rgba(WHITE, DUST_ALPHA),
        ),
        EntityRef::Runner(runner) => draw_runner(list, runner, style, rng),
        EntityRef::Obstacle(o) => list.glow(
            Shape::rect(o.pos, o.size),
            rgba(o.color, 1.0),
            style.glow(GLOW_SOFT),
        ),
    }
}

/// Arrowhead pointing up with a notch at the tail
fn draw_ship(list: &mut DrawList, ship: &Ship, style: &Style) {
    let c = ship.bounds().center();
    let half = ship.size / 2.0;
    let points = vec![
        c + Vec2::new(0.0, -half.y),
        c + Vec2::new(half.x, half.y),
        c + Vec2::new(0.0, half.y - 10.0),
        c + Vec2::new(-half.x, half.y),
    ];
    let glow = style.glow(GLOW_STRONG);
    list.glow(Shape::Polygon(points), rgba(SHIP_COLOR, 1.0), glow);
}

fn draw_runner(list: &mut DrawList, runner: &Runner, style: &Style, rng: &mut Pcg32) {
    let Vec2 { x, y } = runner.pos;
    let Vec2 { x: w, y: h } = runner.size;
    let t = runner.run_anim_timer as f32;
    let color = rgba(runner.character.color(), 1.0);
    let white = rgba(WHITE, 1.0);
    let glow = style.glow(GLOW_STRONG);

    match runner.character {
        Character::CyberBot => {
            let body = Shape::rect(Vec2::new(x, y + 20.0), Vec2::new(w, 40.0));
            list.glow(body, color, glow);

            // Head floats while running
            let head_y = if runner.grounded {
                y + (t * 0.2).sin() * 2.0
            } else {
                y
            };
            let head = Shape::rect(Vec2::new(x + 5.0, head_y), Vec2::new(30.0, 18.0));
            list.glow(head, color, glow);
            let visor = Shape::rect(Vec2::new(x + 20.0, head_y + 5.0), Vec2::new(15.0, 8.0));
            list.glow(visor, white, style.glow(GLOW_FAINT));

            if !runner.grounded {
                let tip = y + 75.0 + rng.random::<f32>() * 5.0;
                list.glow(
                    Shape::Polygon(vec![
                        Vec2::new(x + 10.0, y + 60.0),
                        Vec2::new(x + 20.0, tip),
                        Vec2::new(x + 30.0, y + 60.0),
                    ]),
                    rgba(THRUSTER_COLOR, 1.0),
                    style.glow(GLOW_FAINT),
                );
            }
        }
        Character::NeonCube => {
            let center = Vec2::new(x + w / 2.0, y + h / 2.0);
            // Spins faster in the air
            let angle = if runner.grounded { t * 0.1 } else { t * 0.2 };
            let shell = Shape::rotated_rect(center, runner.size, angle);
            list.glow(shell, color, glow);
            let core = Shape::rotated_rect(center, Vec2::splat(20.0), angle);
            list.glow(core, white, glow);
        }
        Character::Speedster => {
            list.glow(
                Shape::Polygon(vec![
                    Vec2::new(x, y + h),
                    Vec2::new(x + w, y + h / 2.0 + 5.0),
                    Vec2::new(x, y + 10.0),
                ]),
                color,
                glow,
            );
            list.glow(
                Shape::Polygon(vec![
                    Vec2::new(x + 10.0, y + 15.0),
                    Vec2::new(x + 30.0, y + h / 2.0 + 5.0),
                    Vec2::new(x + 10.0, y + h - 5.0),
                ]),
                white,
                glow,
            );

            if !runner.grounded || runner.run_anim_timer % 4 < 2 {
                let tail = x - 20.0 - rng.random::<f32>() * 10.0;
                list.glow(
                    Shape::Polygon(vec![
                        Vec2::new(x, y + 15.0),
                        Vec2::new(tail, y + h / 2.0 + 5.0),
                        Vec2::new(x, y + h - 5.0),
                    ]),
                    rgba(FLAME_COLOR, 1.0),
                    glow,
                );
            }
        }
        Character::Alien => {
            // Squash and stretch while running, stretched tall in the air
            let (stretch_x, stretch_y) = if runner.grounded {
                let sy = (t * 0.3).sin() * 5.0;
                (-sy, sy)
            } else {
                (5.0, -5.0)
            };
            let body_y = y + h / 2.0 + stretch_y / 2.0;
            let radii = Vec2::new(w / 2.0 + stretch_x, h / 2.0 - stretch_y).max(Vec2::ONE);
            list.glow(
                Shape::Ellipse {
                    center: Vec2::new(x + w / 2.0, body_y),
                    radii,
                },
                color,
                glow,
            );
            for dx in [-10.0, 10.0] {
                let eye = Vec2::new(x + w / 2.0 + dx, body_y - 5.0);
                list.fill(Shape::circle(eye, 4.0), rgba(EYE_COLOR, 1.0));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::SimOptions;
    use crate::sim::shooter::Particle;

    fn runner_with(character: Character, grounded: bool, timer: u32) -> Runner {
        let mut runner = Runner::new(character);
        runner.grounded = grounded;
        runner.run_anim_timer = timer;
        runner
    }

    fn draw_one(runner: &Runner) -> DrawList {
        let mut list = DrawList::new(rgba(0, 1.0));
        let mut rng = Pcg32::seed_from_u64(0);
        let style = Style::default();
        draw_entity(&mut list, EntityRef::Runner(runner), &style, &mut rng);
        list
    }

    fn command_count(character: Character, grounded: bool, timer: u32) -> usize {
        draw_one(&runner_with(character, grounded, timer)).len()
    }

    #[test]
    fn test_fresh_shooter_frame() {
        let state = ShooterState::new(9, SimOptions::default());
        let mut painter = Painter::new(Style::default(), 1);
        let list = painter.paint(&state);

        assert_eq!(list.clear_color(), rgba(SHOOTER_BACKGROUND, 1.0));
        assert_eq!(list.len(), state.stars.len() + 1);
        let ship = list.commands().last().map(|c| &c.shape);
        assert!(matches!(ship, Some(Shape::Polygon(p)) if p.len() == 4));
    }

    #[test]
    fn test_glow_disabled() {
        let mut state = RunnerState::new(4, SimOptions::default());
        state.runner = Runner::new(Character::CyberBot);
        let style = Style {
            circle_segments: 12,
            glow: false,
        };
        let mut painter = Painter::new(style, 1);
        let list = painter.paint(&state);
        assert!(list.commands().iter().all(|c| c.glow == 0.0));
        assert_eq!(list.clear_color(), rgba(RUNNER_BACKGROUND, 1.0));
    }

    #[test]
    fn test_ground_drawn_first() {
        let state = RunnerState::new(4, SimOptions::default());
        let mut painter = Painter::new(Style::default(), 1);
        let cmds = painter.paint(&state).commands();
        let Shape::Rect { pos, .. } = cmds[0].shape else {
            panic!("expected ground rect");
        };
        assert_eq!(pos.y, GROUND_TOP);
        let Shape::Line { width, .. } = cmds[1].shape else {
            panic!("expected horizon line");
        };
        assert_eq!(width, HORIZON_WIDTH);
        assert_eq!(cmds[1].color, rgba(HORIZON_COLOR, 1.0));
    }

    #[test]
    fn test_particle_alpha_applied() {
        let mut list = DrawList::new(rgba(0, 1.0));
        let mut rng = Pcg32::seed_from_u64(0);
        let particle = Particle {
            pos: Vec2::new(5.0, 5.0),
            vel: Vec2::ZERO,
            radius: 2.0,
            color: 0xff3333,
            alpha: 0.25,
        };
        let style = Style::default();
        draw_entity(&mut list, EntityRef::Particle(&particle), &style, &mut rng);
        assert_eq!(list.commands()[0].color[3], 0.25);
    }

    #[test]
    fn test_cyberbot_thruster_only_airborne() {
        assert_eq!(command_count(Character::CyberBot, true, 0), 3);
        assert_eq!(command_count(Character::CyberBot, false, 0), 4);
    }

    #[test]
    fn test_speedster_flame_flickers() {
        assert_eq!(command_count(Character::Speedster, true, 0), 3);
        assert_eq!(command_count(Character::Speedster, true, 2), 2);
        assert_eq!(command_count(Character::Speedster, false, 2), 3);
    }

    #[test]
    fn test_cube_spins_faster_airborne() {
        let grounded = draw_one(&runner_with(Character::NeonCube, true, 5));
        let airborne = draw_one(&runner_with(Character::NeonCube, false, 5));
        assert_ne!(grounded.commands()[0].shape, airborne.commands()[0].shape);
        assert_eq!(grounded.len(), command_count(Character::NeonCube, false, 5));
    }

    #[test]
    fn test_alien_has_eyes() {
        let list = draw_one(&runner_with(Character::Alien, false, 0));
        assert_eq!(list.len(), 3);
        let Shape::Ellipse { radii, .. } = list.commands()[0].shape else {
            panic!("expected ellipse");
        };
        // Airborne stretch
        assert_eq!(radii, Vec2::new(45.0 / 2.0 + 5.0, 45.0 / 2.0 + 5.0));
    }
}
