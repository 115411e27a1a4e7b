//! Borrowed view over every drawable entity

use super::runner::{Dust, Obstacle, Runner};
use super::shooter::{Enemy, Particle, Projectile, Ship, Star};

/// One entity of either game, in draw order
///
/// Worlds hand these out from `entities()`; the renderer matches on the
/// variant to pick a drawing routine.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Star(&'a Star),
    Ship(&'a Ship),
    Projectile(&'a Projectile),
    Enemy(&'a Enemy),
    Particle(&'a Particle),
    Ground,
    Dust(&'a Dust),
    Runner(&'a Runner),
    Obstacle(&'a Obstacle),
}
