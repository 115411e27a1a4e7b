//! Shooter world state and entities

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::collision::{Circle, Rect};
use crate::sim::entity::EntityRef;
use crate::sim::session::SimOptions;

/// Ship defaults
pub const SHIP_SIZE: f32 = 40.0;
pub const SHIP_SPEED: f32 = 5.0;
pub const SHIP_BOTTOM_MARGIN: f32 = 20.0;
pub const SHIP_COLOR: u32 = 0x00ffff;
/// Minimum wall-clock gap between shots
pub const FIRE_COOLDOWN_MS: f64 = 200.0;

/// Projectile defaults
pub const PROJECTILE_RADIUS: f32 = 4.0;
pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_COLOR: u32 = 0xff00ff;

/// Enemy defaults
pub const ENEMY_RADIUS: f32 = 20.0;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
pub const ENEMY_SPEED_RANGE: f32 = 2.0;
pub const ENEMY_COLOR: u32 = 0xff3333;

/// Explosion particles
pub const BURST_SIZE: usize = 10;
pub const PARTICLE_MAX_RADIUS: f32 = 3.0;
/// Per-axis velocity range is [-PARTICLE_SPREAD/2, PARTICLE_SPREAD/2)
pub const PARTICLE_SPREAD: f32 = 4.0;
pub const PARTICLE_FADE: f32 = 0.02;

/// Starfield
pub const STAR_COUNT: usize = 100;
pub const STAR_MAX_SIZE: f32 = 2.0;
pub const STAR_MIN_SPEED: f32 = 0.1;
pub const STAR_SPEED_RANGE: f32 = 0.5;

/// Spawn pacing (in frames)
pub const SPAWN_INTERVAL_START: f32 = 60.0;
pub const SPAWN_INTERVAL_FLOOR: f32 = 20.0;
pub const SPAWN_INTERVAL_STEP: f32 = 0.1;

/// Score per destroyed enemy
pub const HIT_SCORE: u64 = 100;
/// Contact slack for circle tests
pub const HIT_EPSILON: f32 = 0.0;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement applied on the last tick
    pub vel: Vec2,
    pub speed: f32,
    /// Wall-clock time of the last shot
    pub last_shot_ms: Option<f64>,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 - SHIP_SIZE / 2.0,
                CANVAS_HEIGHT - SHIP_SIZE - SHIP_BOTTOM_MARGIN,
            ),
            size: Vec2::splat(SHIP_SIZE),
            vel: Vec2::ZERO,
            speed: SHIP_SPEED,
            last_shot_ms: None,
        }
    }
}

impl Ship {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision shape: circle of half the width at the ship's center
    pub fn hit_circle(&self) -> Circle {
        Circle::new(self.bounds().center(), self.size.x / 2.0)
    }

    /// Muzzle position (top center)
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Largest allowed top-left corner
    pub fn max_pos(&self) -> Vec2 {
        Vec2::new(CANVAS_WIDTH - self.size.x, CANVAS_HEIGHT - self.size.y)
    }

    /// Move along `axis` (components in [-1, 1]) and clamp to the canvas
    pub fn steer(&mut self, axis: Vec2) {
        let before = self.pos;
        self.pos = (self.pos + axis * self.speed).clamp(Vec2::ZERO, self.max_pos());
        self.vel = self.pos - before;
    }

    /// Whether the cooldown has elapsed at `now_ms`
    pub fn can_fire(&self, now_ms: f64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now_ms - last > FIRE_COOLDOWN_MS)
    }
}

/// A player shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
            alive: true,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A descending enemy orb
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: u32,
    pub alive: bool,
}

impl Enemy {
    /// Spawn just above the top edge at a random column
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let radius = ENEMY_RADIUS;
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * (CANVAS_WIDTH - radius * 2.0) + radius,
                -radius,
            ),
            radius,
            speed: rng.random::<f32>() * ENEMY_SPEED_RANGE + ENEMY_MIN_SPEED,
            color: ENEMY_COLOR,
            alive: true,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// An explosion fragment (dead once alpha reaches zero)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    pub alpha: f32,
}

impl Particle {
    pub fn spawn(rng: &mut Pcg32, pos: Vec2, color: u32) -> Self {
        Self {
            pos,
            radius: rng.random::<f32>() * PARTICLE_MAX_RADIUS,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            ),
            color,
            alpha: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// A background star drifting down
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Twinkle brightness in [0.5, 1), re-rolled every tick
    pub brightness: f32,
}

impl Star {
    pub fn spawn(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: rng.random::<f32>() * STAR_MAX_SIZE,
            speed: rng.random::<f32>() * STAR_SPEED_RANGE + STAR_MIN_SPEED,
            brightness: 1.0,
        }
    }
}

/// Complete shooter world
#[derive(Debug, Clone)]
pub struct ShooterState {
    pub options: SimOptions,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u64,
    /// Frames since the last spawn
    pub spawn_timer: u32,
    /// Frames between spawns, shrinks toward `SPAWN_INTERVAL_FLOOR`
    pub spawn_interval: f32,
    pub(crate) rng: Pcg32,
}

impl ShooterState {
    pub fn new(seed: u64, options: SimOptions) -> Self {
        let mut state = Self {
            options,
            ship: Ship::default(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            score: 0,
            spawn_timer: 0,
            spawn_interval: SPAWN_INTERVAL_START,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Fresh ship, empty collections, new starfield, initial timers
    pub fn reset(&mut self) {
        self.ship = Ship::default();
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.spawn_interval = SPAWN_INTERVAL_START;

        let rng = &mut self.rng;
        self.stars = (0..STAR_COUNT).map(|_| Star::spawn(rng)).collect();
    }

    /// Every drawable entity, back to front
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.stars
            .iter()
            .map(EntityRef::Star)
            .chain(std::iter::once(EntityRef::Ship(&self.ship)))
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(self.particles.iter().map(EntityRef::Particle))
    }
}
