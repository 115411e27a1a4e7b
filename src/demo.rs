//! Scripted players for headless runs
//!
//! Used by the native binary to exercise both games without a browser.

use crate::consts::SIM_DT;
use crate::sim::{Button, InputState, RunnerState, Session, ShooterState, SimOptions, Simulation};

/// A bot that sets this frame's input from the world it sees
pub trait Autopilot {
    fn drive(&self, input: &mut InputState);
}

/// Pixels of slack before the ship starts sliding toward its target
const SHOOTER_AIM_SLACK: f32 = 4.0;
/// Jump when the next obstacle is this many frames away
const RUNNER_JUMP_LEAD_FRAMES: f32 = 8.0;

impl Autopilot for ShooterState {
    /// Hold fire and slide under the enemy closest to the bottom
    fn drive(&self, input: &mut InputState) {
        input.release_all();
        input.touch_down(Button::Action);

        let ship_x = self.ship.bounds().center().x;
        let target = self
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x);

        if let Some(x) = target {
            if x < ship_x - SHOOTER_AIM_SLACK {
                input.touch_down(Button::Left);
            } else if x > ship_x + SHOOTER_AIM_SLACK {
                input.touch_down(Button::Right);
            }
        }
    }
}

impl Autopilot for RunnerState {
    /// Jump just before the nearest obstacle ahead arrives
    fn drive(&self, input: &mut InputState) {
        input.release_all();

        let front = self.runner.pos.x + self.runner.size.x;
        let lead = self.scroll_speed * RUNNER_JUMP_LEAD_FRAMES;
        let incoming = self
            .obstacles
            .iter()
            .map(|o| o.pos.x - front)
            .any(|gap| (0.0..=lead).contains(&gap));

        if incoming {
            input.touch_down(Button::Action);
        }
    }
}

/// Summary of one headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoReport {
    pub frames: u64,
    pub score: u64,
    pub game_over: bool,
}

/// Play one run, optionally with the autopilot, for at most `max_frames`
pub fn run_headless<S>(
    seed: u64,
    options: SimOptions,
    max_frames: u64,
    autopilot: bool,
) -> DemoReport
where
    S: Simulation + Autopilot,
{
    let mut session: Session<S> = Session::new(seed, options);
    let mut input = InputState::new();
    session.start();

    let mut frames = 0;
    while frames < max_frames && session.is_running() {
        if autopilot {
            session.sim().drive(&mut input);
        }
        // Wall clock advances one frame per step
        let now_ms = frames as f64 * SIM_DT as f64 * 1000.0;
        session.frame(&input, now_ms);
        frames += 1;
    }
    session.drain_events().for_each(drop);

    DemoReport {
        frames,
        score: session.sim().score(),
        game_over: !session.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_run_is_deterministic() {
        let a = run_headless::<ShooterState>(42, SimOptions::default(), 2000, true);
        let b = run_headless::<ShooterState>(42, SimOptions::default(), 2000, true);
        assert_eq!(a, b);
        assert!(a.frames <= 2000);
    }

    #[test]
    fn test_runner_autopilot_outlasts_standing_still() {
        let options = SimOptions::default();
        let mut best_score = 0;
        for seed in [1, 2, 3] {
            let idle = run_headless::<RunnerState>(seed, options, 5000, false);
            let bot = run_headless::<RunnerState>(seed, options, 5000, true);
            assert!(idle.game_over);
            assert_eq!(idle.score, 0);
            assert!(bot.frames >= idle.frames);
            best_score = best_score.max(bot.score);
        }
        assert!(best_score > 0, "the bot clears at least one obstacle");
    }

    #[test]
    fn test_shooter_autopilot_holds_fire() {
        let state = ShooterState::new(1, SimOptions::default());
        let mut input = InputState::new();
        state.drive(&mut input);
        assert!(input.pressed(Button::Action));
        assert!(!input.pressed(Button::Left));
        assert!(!input.pressed(Button::Right));
    }

    #[test]
    fn test_runner_autopilot_jumps_for_close_obstacle() {
        let mut state = RunnerState::new(1, SimOptions::default());
        let mut input = InputState::new();
        state.drive(&mut input);
        assert!(!input.pressed(Button::Action));

        let mut obstacle = crate::sim::runner::Obstacle::spawn(&mut state.rng);
        obstacle.pos.x = state.runner.pos.x + state.runner.size.x + 10.0;
        state.obstacles.push(obstacle);
        state.drive(&mut input);
        assert!(input.pressed(Button::Action));
    }
}
