//! Shooter frame update
//!
//! Order per tick: stars, ship (move + fire), projectiles, spawn, enemies,
//! particles, collisions, then one compaction pass over every collection.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::*;
use crate::consts::CANVAS_HEIGHT;
use crate::consts::CANVAS_WIDTH;
use crate::sim::collision::circles_collide;
use crate::sim::input::{Button, InputState};
use crate::sim::session::{GameEvent, StepOutcome};

/// Advance the shooter by one frame
pub fn tick(
    state: &mut ShooterState,
    input: &InputState,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> StepOutcome {
    update_stars(state);

    // Ship
    state.ship.steer(input.axis());
    let wants_fire = state.options.auto_fire || input.pressed(Button::Action);
    if wants_fire && state.ship.can_fire(now_ms) {
        state.projectiles.push(Projectile::new(state.ship.nose()));
        state.ship.last_shot_ms = Some(now_ms);
        events.push(GameEvent::Fired);
    }

    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed;
        if projectile.pos.y < 0.0 {
            projectile.alive = false;
        }
    }

    spawn_enemy(state);

    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
        if enemy.pos.y > CANVAS_HEIGHT + enemy.radius {
            enemy.alive = false;
        }
    }

    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.alpha -= PARTICLE_FADE;
    }

    let outcome = check_collisions(state, events);

    // Compact once, after every pass has marked its dead
    state.projectiles.retain(|p| p.alive);
    state.enemies.retain(|e| e.alive);
    state.particles.retain(Particle::is_alive);

    outcome
}

fn update_stars(state: &mut ShooterState) {
    let rng = &mut state.rng;
    for star in &mut state.stars {
        star.pos.y += star.speed;
        if star.pos.y > CANVAS_HEIGHT {
            star.pos.y = 0.0;
            star.pos.x = rng.random::<f32>() * CANVAS_WIDTH;
        }
        star.brightness = rng.random::<f32>() * 0.5 + 0.5;
    }
}

/// Count frames and append one enemy when the counter passes the interval
fn spawn_enemy(state: &mut ShooterState) {
    if state.spawn_timer as f32 > state.spawn_interval {
        let enemy = Enemy::spawn(&mut state.rng);
        log::debug!(
            "Enemy spawned at x={:.0}, speed {:.2}",
            enemy.pos.x,
            enemy.speed
        );
        state.enemies.push(enemy);
        state.spawn_timer = 0;
        let next = state.spawn_interval - SPAWN_INTERVAL_STEP;
        state.spawn_interval = next.max(SPAWN_INTERVAL_FLOOR);
    } else {
        state.spawn_timer += 1;
    }
}

/// Spawn a burst of particles, respecting the particle cap
fn create_explosion(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len()).min(BURST_SIZE);
    particles.extend((0..room).map(|_| Particle::spawn(rng, pos, color)));
}

/// Projectile/enemy hits, then enemy/ship contact.
///
/// An entity already marked dead takes no further part in this pass, so an
/// enemy scores once even when two projectiles reach it on the same tick.
fn check_collisions(state: &mut ShooterState, events: &mut Vec<GameEvent>) -> StepOutcome {
    let ShooterState {
        projectiles,
        enemies,
        particles,
        rng,
        score,
        options,
        ship,
        ..
    } = state;

    for projectile in projectiles.iter_mut().filter(|p| p.alive) {
        let shot = projectile.circle();
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && circles_collide(&shot, &e.circle(), HIT_EPSILON))
        else {
            continue;
        };

        let cap = options.max_particles;
        create_explosion(particles, rng, enemy.pos, enemy.color, cap);
        enemy.alive = false;
        projectile.alive = false;
        *score += HIT_SCORE;

        events.push(GameEvent::EnemyDestroyed { pos: enemy.pos });
        events.push(GameEvent::ScoreChanged(*score));
        log::debug!("Enemy destroyed, score {}", score);
    }

    let hull = ship.hit_circle();
    let rammed = enemies
        .iter()
        .filter(|e| e.alive)
        .any(|e| circles_collide(&hull, &e.circle(), HIT_EPSILON));

    if rammed {
        StepOutcome::GameOver
    } else {
        StepOutcome::Continue
    }
}
