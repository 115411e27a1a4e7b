//! Neon Runner: a side-scrolling endless runner
//!
//! The runner stays at a fixed column and jumps over obstacles that scroll
//! in from the right. Each obstacle cleared scores a point and speeds the
//! world up.

pub mod state;
pub mod tick;

pub use state::{Character, Dust, Obstacle, Runner, RunnerState};
pub use tick::tick;

use super::input::{InputState, KeyMap};
use super::session::{GameEvent, SimOptions, Simulation, StepOutcome};

impl Simulation for RunnerState {
    const KEY_MAP: KeyMap = KeyMap::Runner;
    const NAME: &'static str = "Neon Runner";

    fn new(seed: u64, options: SimOptions) -> Self {
        RunnerState::new(seed, options)
    }

    fn reset(&mut self) {
        RunnerState::reset(self);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::{GamePhase, Session};

    #[test]
    fn test_session_runs_until_collision() {
        let mut session: Session<RunnerState> = Session::new(3, SimOptions::default());
        assert!(session.start());

        // Never jumping guarantees a hit once the first obstacle arrives
        let input = InputState::new();
        for _ in 0..1000 {
            session.frame(&input, 0.0);
            if !session.is_running() {
                break;
            }
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
        assert!(session.sim().obstacles.len() >= 1);
    }
}
