//! Runner world state and entities

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::collision::Rect;
use crate::sim::entity::EntityRef;
use crate::sim::session::SimOptions;

/// Physics (per frame)
pub const GRAVITY: f32 = 0.6;
pub const JUMP_FORCE: f32 = -13.2;
pub const GROUND_HEIGHT: f32 = 50.0;
/// Y of the ground surface
pub const GROUND_TOP: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

/// Fixed horizontal position of the runner
pub const RUNNER_X: f32 = 100.0;

/// Obstacle sizing
pub const OBSTACLE_MIN_WIDTH: f32 = 30.0;
pub const OBSTACLE_WIDTH_RANGE: f32 = 30.0;
pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
pub const OBSTACLE_HEIGHT_RANGE: f32 = 40.0;
pub const OBSTACLE_COLOR: u32 = 0xff0055;

/// Scroll speed in px/frame
pub const START_SPEED: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.1;

/// Gap before the first obstacle, in frames
pub const FIRST_GAP_MIN: f32 = 50.0;
pub const FIRST_GAP_RANGE: f32 = 50.0;
/// Gap between later obstacles, in frames
pub const GAP_MIN: f32 = 60.0;
pub const GAP_RANGE: f32 = 60.0;

/// Background dust
pub const DUST_COUNT: usize = 50;
pub const DUST_MAX_SIZE: f32 = 2.0;
pub const DUST_MIN_SPEED: f32 = 0.1;
pub const DUST_SPEED_RANGE: f32 = 0.5;
/// Dust drifts at this fraction of the scroll speed
pub const DUST_PARALLAX: f32 = 0.1;

/// Playable characters. Each has its own hitbox and look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Character {
    CyberBot,
    NeonCube,
    Speedster,
    Alien,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::CyberBot,
        Character::NeonCube,
        Character::Speedster,
        Character::Alien,
    ];

    pub fn random(rng: &mut Pcg32) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn size(self) -> Vec2 {
        match self {
            Character::CyberBot => Vec2::new(40.0, 60.0),
            Character::NeonCube => Vec2::new(40.0, 40.0),
            Character::Speedster => Vec2::new(50.0, 30.0),
            Character::Alien => Vec2::new(45.0, 45.0),
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Character::CyberBot => 0x00ff88,
            Character::NeonCube => 0xff00ff,
            Character::Speedster => 0xffaa00,
            Character::Alien => 0x00ffff,
        }
    }
}

/// The player
#[derive(Debug, Clone)]
pub struct Runner {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Only `vel.y` changes; the world scrolls instead
    pub vel: Vec2,
    pub character: Character,
    pub grounded: bool,
    /// Frames since the run started, drives animations
    pub run_anim_timer: u32,
}

impl Runner {
    pub fn new(character: Character) -> Self {
        let size = character.size();
        Self {
            pos: Vec2::new(RUNNER_X, GROUND_TOP - size.y),
            size,
            vel: Vec2::ZERO,
            character,
            grounded: true,
            run_anim_timer: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Jump if requested and standing, then integrate gravity.
    /// Returns true when a jump started this frame.
    pub fn update(&mut self, jump: bool) -> bool {
        let jumped = jump && self.grounded;
        if jumped {
            self.vel.y = JUMP_FORCE;
            self.grounded = false;
        }

        self.pos.y += self.vel.y;

        if self.pos.y + self.size.y < GROUND_TOP {
            self.vel.y += GRAVITY;
            self.grounded = false;
        } else {
            self.vel.y = 0.0;
            self.grounded = true;
            self.pos.y = GROUND_TOP - self.size.y;
        }

        self.run_anim_timer = self.run_anim_timer.wrapping_add(1);
        jumped
    }
}

/// A block standing on the ground
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
    pub alive: bool,
}

impl Obstacle {
    /// New obstacle just past the right edge
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let width = OBSTACLE_MIN_WIDTH + rng.random::<f32>() * OBSTACLE_WIDTH_RANGE;
        let height = OBSTACLE_MIN_HEIGHT + rng.random::<f32>() * OBSTACLE_HEIGHT_RANGE;
        Self {
            pos: Vec2::new(CANVAS_WIDTH + width, GROUND_TOP - height),
            size: Vec2::new(width, height),
            color: OBSTACLE_COLOR,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Background dust drifting left
#[derive(Debug, Clone)]
pub struct Dust {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Dust {
    pub fn spawn(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * CANVAS_WIDTH,
                rng.random::<f32>() * CANVAS_HEIGHT,
            ),
            size: rng.random::<f32>() * DUST_MAX_SIZE,
            speed: rng.random::<f32>() * DUST_SPEED_RANGE + DUST_MIN_SPEED,
        }
    }
}

/// Complete runner world
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub options: SimOptions,
    pub runner: Runner,
    pub obstacles: Vec<Obstacle>,
    pub dust: Vec<Dust>,
    pub score: u64,
    /// Global scroll speed, grows with every obstacle passed
    pub scroll_speed: f32,
    /// Frames since the last spawn
    pub spawn_timer: u32,
    /// Frames to wait before the next spawn
    pub spawn_interval: f32,
    pub(crate) rng: Pcg32,
}

impl RunnerState {
    pub fn new(seed: u64, options: SimOptions) -> Self {
        let mut state = Self {
            options,
            runner: Runner::new(Character::CyberBot),
            obstacles: Vec::new(),
            dust: Vec::new(),
            score: 0,
            scroll_speed: START_SPEED,
            spawn_timer: 0,
            spawn_interval: FIRST_GAP_MIN,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// New random character, empty track, initial speed and timers
    pub fn reset(&mut self) {
        self.runner = Runner::new(Character::random(&mut self.rng));
        self.obstacles.clear();
        self.score = 0;
        self.scroll_speed = START_SPEED;
        self.spawn_timer = 0;
        self.spawn_interval = FIRST_GAP_MIN + self.rng.random::<f32>() * FIRST_GAP_RANGE;

        let rng = &mut self.rng;
        self.dust = (0..DUST_COUNT).map(|_| Dust::spawn(rng)).collect();
    }

    /// Every drawable entity, back to front
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Ground)
            .chain(self.dust.iter().map(EntityRef::Dust))
            .chain(std::iter::once(EntityRef::Runner(&self.runner)))
            .chain(self.obstacles.iter().map(EntityRef::Obstacle))
    }
}
