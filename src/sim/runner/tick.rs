//! Runner frame update

use rand::Rng;

use super::state::*;
use crate::consts::CANVAS_WIDTH;
use crate::sim::collision::aabb_overlap;
use crate::sim::input::{Button, InputState};
use crate::sim::session::{GameEvent, StepOutcome};

/// Advance the runner by one frame
///
/// The wall clock is unused: jumps are gated by ground contact, not time.
pub fn tick(
    state: &mut RunnerState,
    input: &InputState,
    _now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> StepOutcome {
    update_dust(state);

    if state.runner.update(input.pressed(Button::Action)) {
        events.push(GameEvent::Jumped);
    }

    spawn_obstacle(state);

    // Speed changes apply to the obstacles that follow in the same pass
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= state.scroll_speed;
        if obstacle.pos.x + obstacle.size.x < 0.0 {
            obstacle.alive = false;
            state.score += 1;
            state.scroll_speed += SPEED_STEP;
            events.push(GameEvent::ObstaclePassed);
            events.push(GameEvent::ScoreChanged(state.score));
            log::debug!(
                "Obstacle passed, score {}, speed {:.1}",
                state.score,
                state.scroll_speed
            );
        }
    }
    state.obstacles.retain(|o| o.alive);

    let hitbox = state.runner.bounds();
    if state
        .obstacles
        .iter()
        .any(|o| aabb_overlap(&hitbox, &o.bounds()))
    {
        return StepOutcome::GameOver;
    }

    StepOutcome::Continue
}

fn update_dust(state: &mut RunnerState) {
    let drift = state.scroll_speed * DUST_PARALLAX;
    let rng = &mut state.rng;
    for dust in &mut state.dust {
        dust.pos.x -= dust.speed * drift;
        if dust.pos.x < 0.0 {
            dust.pos.x = CANVAS_WIDTH;
            dust.pos.y = rng.random::<f32>() * GROUND_TOP;
        }
    }
}

/// Count frames; when past the current gap, add an obstacle and roll a new gap
fn spawn_obstacle(state: &mut RunnerState) {
    if state.spawn_timer as f32 > state.spawn_interval {
        let obstacle = Obstacle::spawn(&mut state.rng);
        log::debug!(
            "Obstacle spawned {:.0}x{:.0}",
            obstacle.size.x,
            obstacle.size.y
        );
        state.obstacles.push(obstacle);
        state.spawn_timer = 0;
        state.spawn_interval = GAP_MIN + state.rng.random::<f32>() * GAP_RANGE;
    } else {
        state.spawn_timer += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CANVAS_HEIGHT;
    use crate::sim::input::KeyMap;
    use crate::sim::session::SimOptions;
    use glam::Vec2;
    use proptest::prelude::*;

    fn quiet_state() -> RunnerState {
        let mut state = RunnerState::new(12345, SimOptions::default());
        state.spawn_interval = f32::MAX;
        state
    }

    fn obstacle(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color: OBSTACLE_COLOR,
            alive: true,
        }
    }

    #[test]
    fn test_new_state() {
        let state = RunnerState::new(5, SimOptions::default());
        assert_eq!(state.dust.len(), DUST_COUNT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.scroll_speed, START_SPEED);
        let first_gap = FIRST_GAP_MIN..FIRST_GAP_MIN + FIRST_GAP_RANGE;
        assert!(first_gap.contains(&state.spawn_interval));
        assert!(state.runner.grounded);
        assert_eq!(state.runner.pos.y + state.runner.size.y, GROUND_TOP);
    }

    #[test]
    fn test_character_sizes() {
        assert_eq!(Character::CyberBot.size(), Vec2::new(40.0, 60.0));
        assert_eq!(Character::Speedster.size(), Vec2::new(50.0, 30.0));
        assert_eq!(Character::Alien.color(), 0x00ffff);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut runner = Runner::new(Character::NeonCube);
        let ground_y = runner.pos.y;

        assert!(runner.update(true));
        assert!(!runner.grounded);
        assert_eq!(runner.pos.y, ground_y + JUMP_FORCE);

        // Holding jump in the air does nothing
        assert!(!runner.update(true));

        let mut peak = runner.pos.y;
        for _ in 0..100 {
            runner.update(false);
            peak = peak.min(runner.pos.y);
            if runner.grounded {
                break;
            }
        }
        assert!(runner.grounded);
        assert_eq!(runner.pos.y, ground_y);
        assert_eq!(runner.vel.y, 0.0);
        assert!(peak < ground_y - 100.0, "jump clears tall obstacles");
        assert!(peak >= 0.0);
    }

    #[test]
    fn test_jump_event() {
        let mut state = quiet_state();
        let mut input = InputState::new();
        input.key_down(KeyMap::Runner, "ArrowUp");
        let mut events = Vec::new();
        tick(&mut state, &input, 0.0, &mut events);
        assert_eq!(events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_aabb_example_ends_run() {
        let mut state = quiet_state();
        state.runner.size = Vec2::new(40.0, 60.0);
        state.runner.pos = Vec2::new(100.0, 100.0);
        state.runner.grounded = false;
        // Obstacle placed so that after scrolling it sits at (130, 80)
        let incoming = obstacle(130.0 + START_SPEED, 80.0, 30.0, 80.0);
        state.obstacles.push(incoming);
        let mut events = Vec::new();

        // Runner falls 0 px on the first airborne frame: it starts at rest
        let outcome = tick(&mut state, &InputState::new(), 0.0, &mut events);
        assert_eq!(state.obstacles[0].pos.x, 130.0);
        assert_eq!(state.runner.pos, Vec2::new(100.0, 100.0));
        assert_eq!(outcome, StepOutcome::GameOver);
    }

    #[test]
    fn test_passed_obstacle_scores_and_speeds_up() {
        let mut state = quiet_state();
        let top = GROUND_TOP - 40.0;
        state.obstacles.push(obstacle(-26.0, top, 30.0, 40.0));
        state.obstacles.push(obstacle(600.0, top, 30.0, 40.0));
        let mut events = Vec::new();

        let outcome = tick(&mut state, &InputState::new(), 0.0, &mut events);
        assert_eq!(outcome, StepOutcome::Continue);
        assert_eq!(state.score, 1);
        let faster = START_SPEED + SPEED_STEP;
        assert!((state.scroll_speed - faster).abs() < 1e-6);
        assert_eq!(state.obstacles.len(), 1);
        // The second obstacle already moved at the new speed
        let expected_x = 600.0 - START_SPEED - SPEED_STEP;
        assert!((state.obstacles[0].pos.x - expected_x).abs() < 1e-4);
        assert!(events.contains(&GameEvent::ScoreChanged(1)));
    }

    #[test]
    fn test_spawn_gap_is_rerolled() {
        let mut state = RunnerState::new(77, SimOptions::default());
        state.spawn_interval = 3.0;
        let mut events = Vec::new();
        let input = InputState::new();
        for _ in 0..5 {
            tick(&mut state, &input, 0.0, &mut events);
        }
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0);
        let later_gap = GAP_MIN..GAP_MIN + GAP_RANGE;
        assert!(later_gap.contains(&state.spawn_interval));

        let o = &state.obstacles[0];
        let widths = OBSTACLE_MIN_WIDTH..OBSTACLE_MIN_WIDTH + OBSTACLE_WIDTH_RANGE;
        assert!(widths.contains(&o.size.x));
        assert_eq!(o.pos.y + o.size.y, GROUND_TOP);
        assert!(o.pos.x > CANVAS_WIDTH - START_SPEED);
    }

    #[test]
    fn test_dust_wraps_above_ground() {
        let mut state = quiet_state();
        state.dust.truncate(1);
        state.dust[0].pos = Vec2::new(0.01, 10.0);
        state.dust[0].speed = 0.5;
        let mut events = Vec::new();
        tick(&mut state, &InputState::new(), 0.0, &mut events);
        assert_eq!(state.dust[0].pos.x, CANVAS_WIDTH);
        assert!(state.dust[0].pos.y < GROUND_TOP);
    }

    #[test]
    fn test_reset_restores_initial_world() {
        let mut state = RunnerState::new(8, SimOptions::default());
        state.score = 14;
        state.scroll_speed = 6.4;
        state.spawn_timer = 30;
        // A later gap lies outside the first-gap range
        state.spawn_interval = GAP_MIN + GAP_RANGE - 20.0;
        state.obstacles.push(obstacle(300.0, 500.0, 30.0, 50.0));
        state.runner.run_anim_timer = 99;

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed, START_SPEED);
        assert_eq!(state.spawn_timer, 0);
        let first_gap = FIRST_GAP_MIN..FIRST_GAP_MIN + FIRST_GAP_RANGE;
        assert!(first_gap.contains(&state.spawn_interval));
        assert!(state.obstacles.is_empty());
        assert_eq!(state.dust.len(), DUST_COUNT);
        assert_eq!(state.runner.run_anim_timer, 0);
        assert!(state.runner.grounded);
    }

    proptest! {
        #[test]
        fn prop_runner_stays_in_bounds(
            jumps in prop::collection::vec(any::<bool>(), 1..600),
            seed in any::<u64>(),
        ) {
            let mut state = RunnerState::new(seed, SimOptions::default());
            let mut events = Vec::new();
            let mut last_score = 0;
            for jump in jumps {
                let mut input = InputState::new();
                if jump {
                    input.touch_down(Button::Action);
                }
                let outcome = tick(&mut state, &input, 0.0, &mut events);

                let r = &state.runner;
                prop_assert!(r.pos.y >= 0.0);
                prop_assert!(r.pos.y + r.size.y <= CANVAS_HEIGHT);
                prop_assert!(r.pos.x >= 0.0 && r.pos.x + r.size.x <= CANVAS_WIDTH);
                prop_assert!(state.score >= last_score);
                last_score = state.score;

                if outcome == StepOutcome::GameOver {
                    break;
                }
            }
        }
    }
}
