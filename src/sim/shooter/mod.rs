//! Nebula Shooter: a vertical shooter
//!
//! The ship moves in all four directions and fires upward. Enemy orbs fall
//! from the top at a rate that slowly increases.

pub mod state;
pub mod tick;

pub use state::{Enemy, Particle, Projectile, Ship, ShooterState, Star};
pub use tick::tick;

use super::input::{InputState, KeyMap};
use super::session::{GameEvent, SimOptions, Simulation, StepOutcome};

impl Simulation for ShooterState {
    const KEY_MAP: KeyMap = KeyMap::Shooter;
    const NAME: &'static str = "Nebula Shooter";

    fn new(seed: u64, options: SimOptions) -> Self {
        ShooterState::new(seed, options)
    }

    fn reset(&mut self) {
        ShooterState::reset(self);
    }

    fn step(
        &mut self,
        input: &InputState,
        now_ms: f64,
        events: &mut Vec<GameEvent>,
    ) -> StepOutcome {
        tick(self, input, now_ms, events)
    }

    fn score(&self) -> u64 {
        self.score
    }
}
