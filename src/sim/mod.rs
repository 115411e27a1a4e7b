//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame
//! - Seeded RNG only
//! - Wall-clock time only where passed in by the host
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod input;
pub mod runner;
pub mod session;
pub mod shooter;

pub use collision::{Circle, Rect, aabb_overlap, circles_collide};
pub use entity::EntityRef;
pub use input::{Button, ButtonSet, InputState, KeyMap, VirtualJoystick};
pub use runner::RunnerState;
pub use session::{GameEvent, GamePhase, Session, SimOptions, Simulation, StepOutcome};
pub use shooter::ShooterState;
