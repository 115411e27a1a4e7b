//! Game phase state machine shared by both games
//!
//! `Idle -> Running -> GameOver -> Running`. Entering `Running` always
//! rebuilds the world from scratch.

use glam::Vec2;

use super::input::{InputState, KeyMap};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen shown, nothing simulated
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for restart
    GameOver,
}

/// Something the host may want to react to (HUD, audio)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh run started
    Started,
    /// Shooter fired a projectile
    Fired,
    /// Runner left the ground
    Jumped,
    /// Enemy destroyed at position
    EnemyDestroyed { pos: Vec2 },
    /// Runner cleared an obstacle
    ObstaclePassed,
    /// Score changed to the given value
    ScoreChanged(u64),
    /// Run ended with the given score
    GameOver { score: u64 },
}

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    GameOver,
}

/// Options the host projects from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOptions {
    /// Fire whenever the cooldown allows, without holding the button
    pub auto_fire: bool,
    /// Upper bound on live particles
    pub max_particles: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            auto_fire: false,
            max_particles: 500,
        }
    }
}

/// A game world driven one fixed step at a time
pub trait Simulation {
    /// Key layout for this game
    const KEY_MAP: KeyMap;
    /// Human readable name for logs
    const NAME: &'static str;

    fn new(seed: u64, options: SimOptions) -> Self;

    /// Rebuild the world: fresh collections, zero score, initial timers
    fn reset(&mut self);

    /// Advance one frame. `now_ms` is the host's wall-clock timestamp.
    fn step(&mut self, input: &InputState, now_ms: f64, events: &mut Vec<GameEvent>) -> StepOutcome;

    fn score(&self) -> u64;
}

/// Owns a simulation and its phase
#[derive(Debug, Clone)]
pub struct Session<S> {
    sim: S,
    phase: GamePhase,
    events: Vec<GameEvent>,
}

impl<S: Simulation> Session<S> {
    pub fn new(seed: u64, options: SimOptions) -> Self {
        Self {
            sim: S::new(seed, options),
            phase: GamePhase::Idle,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Begin a run from `Idle` or `GameOver`. Returns false (and does
    /// nothing) while already running.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            return false;
        }
        self.sim.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::ScoreChanged(self.sim.score()));
        log::info!("{} started", S::NAME);
        true
    }

    /// Run one simulation step if the session is running
    pub fn frame(&mut self, input: &InputState, now_ms: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.sim.step(input, now_ms, &mut self.events) == StepOutcome::GameOver {
            self.phase = GamePhase::GameOver;
            let score = self.sim.score();
            self.events.push(GameEvent::GameOver { score });
            log::info!("{} over, score {}", S::NAME, score);
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal world: scores one point per step, dies at a fixed step
    struct Counter {
        score: u64,
        resets: u32,
        die_at: u64,
    }

    impl Simulation for Counter {
        const KEY_MAP: KeyMap = KeyMap::Runner;
        const NAME: &'static str = "counter";

        fn new(_seed: u64, _options: SimOptions) -> Self {
            Self {
                score: 0,
                resets: 0,
                die_at: 3,
            }
        }

        fn reset(&mut self) {
            self.score = 0;
            self.resets += 1;
        }

        fn step(
            &mut self,
            _input: &InputState,
            _now_ms: f64,
            events: &mut Vec<GameEvent>,
        ) -> StepOutcome {
            self.score += 1;
            events.push(GameEvent::ScoreChanged(self.score));
            if self.score >= self.die_at {
                StepOutcome::GameOver
            } else {
                StepOutcome::Continue
            }
        }

        fn score(&self) -> u64 {
            self.score
        }
    }

    #[test]
    fn test_idle_does_not_step() {
        let mut session: Session<Counter> = Session::new(1, SimOptions::default());
        assert_eq!(session.phase(), GamePhase::Idle);
        session.frame(&InputState::new(), 0.0);
        assert_eq!(session.sim().score, 0);
        assert_eq!(session.drain_events().count(), 0);
    }

    #[test]
    fn test_full_cycle() {
        let mut session: Session<Counter> = Session::new(1, SimOptions::default());
        let input = InputState::new();

        assert!(session.start());
        assert!(session.is_running());
        assert_eq!(session.sim().resets, 1);
        assert!(!session.start(), "start while running is a no-op");
        assert_eq!(session.sim().resets, 1);

        for _ in 0..5 {
            session.frame(&input, 0.0);
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.sim().score, 3, "no steps after game over");

        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 3 }));

        // Restart rebuilds the world
        assert!(session.start());
        assert_eq!(session.sim().score, 0);
        assert_eq!(session.sim().resets, 2);
        let events: Vec<_> = session.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Started, GameEvent::ScoreChanged(0)]);
    }
}
