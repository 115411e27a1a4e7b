//! Neon Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use neon_arcade::Settings;
    use neon_arcade::audio::AudioManager;
    use neon_arcade::consts::*;
    use neon_arcade::platform::hud::Hud;
    use neon_arcade::platform::input::{self, InputSink};
    use neon_arcade::platform::{self, PlatformError};
    use neon_arcade::renderer::{Painter, RenderState, Scene};
    use neon_arcade::sim::{
        GameEvent, InputState, KeyMap, RunnerState, Session, ShooterState, Simulation,
        VirtualJoystick,
    };

    /// Game instance holding all state
    struct Game<S> {
        session: Session<S>,
        input: InputState,
        joystick: VirtualJoystick,
        hud: Hud,
        audio: AudioManager,
        painter: Painter,
        render_state: RenderState,
        accumulator: f32,
        last_time: f64,
        /// An animation frame is scheduled
        loop_armed: bool,
    }

    impl<S: Simulation + Scene + 'static> Game<S> {
        /// Run simulation steps for the elapsed time
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;
            let now_ms = js_sys::Date::now();

            let mut substeps = 0;
            while self.accumulator >= SIM_DT
                && substeps < MAX_SUBSTEPS
                && self.session.is_running()
            {
                self.session.frame(&self.input, now_ms);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Drop any backlog instead of chasing it next frame
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        /// Forward queued events to the HUD and audio
        fn flush_events(&mut self) {
            let events: Vec<GameEvent> = self.session.drain_events().collect();
            for event in &events {
                match event {
                    GameEvent::Started => self.hud.hide_screens(),
                    GameEvent::ScoreChanged(score) => self.hud.set_score(*score),
                    GameEvent::GameOver { score } => self.hud.show_game_over(*score),
                    _ => {}
                }
            }
            self.audio.play_events(&events);
        }

        /// Render the current frame
        fn render(&mut self) {
            let segments = self.painter.style.circle_segments;
            let list = self.painter.paint(self.session.sim());
            match self.render_state.render(list, segments) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    impl<S: Simulation + Scene + 'static> InputSink for Game<S> {
        fn key_map(&self) -> KeyMap {
            S::KEY_MAP
        }

        fn is_running(&self) -> bool {
            self.session.is_running()
        }

        fn input_mut(&mut self) -> &mut InputState {
            &mut self.input
        }

        fn joystick_mut(&mut self) -> &mut VirtualJoystick {
            &mut self.joystick
        }

        fn request_start(handle: &Rc<RefCell<Self>>) {
            let arm = {
                let mut g = handle.borrow_mut();
                if !g.session.start() {
                    return;
                }
                g.accumulator = 0.0;
                g.last_time = 0.0;
                g.flush_events();
                !std::mem::replace(&mut g.loop_armed, true)
            };
            if arm {
                request_animation_frame(handle.clone());
            }
        }
    }

    fn request_animation_frame<S: Simulation + Scene + 'static>(game: Rc<RefCell<Game<S>>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop<S: Simulation + Scene + 'static>(game: Rc<RefCell<Game<S>>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.flush_events();
            g.render();

            let running = g.session.is_running();
            if !running {
                g.loop_armed = false;
            }
            running
        };

        // Not rescheduling is how a run ends
        if running {
            request_animation_frame(game);
        }
    }

    async fn launch<S: Simulation + Scene + 'static>(
        canvas: HtmlCanvasElement,
        settings: Settings,
    ) -> Result<(), PlatformError> {
        let window = platform::window()?;
        let document = platform::document()?;

        let seed = js_sys::Date::now() as u64;
        let render_state = RenderState::for_canvas(canvas).await?;

        let game = Rc::new(RefCell::new(Game::<S> {
            session: Session::new(seed, settings.sim_options()),
            input: InputState::new(),
            joystick: VirtualJoystick::default(),
            hud: Hud::new(&document),
            audio: AudioManager::new(&settings),
            painter: Painter::new(settings.render_style(), seed ^ 0x5eed),
            render_state,
            accumulator: 0.0,
            last_time: 0.0,
            loop_armed: false,
        }));
        log::info!("{} initialized with seed: {}", S::NAME, seed);

        input::attach_keyboard(&document, game.clone());
        input::attach_blur(&window, game.clone());
        match S::KEY_MAP {
            KeyMap::Shooter => {
                input::attach_touch_buttons(&document, game.clone());
                input::attach_joystick(&document, game.clone(), settings.show_joystick);
            }
            KeyMap::Runner => input::attach_play_area(&document, game.clone()),
        }

        // Show the idle world behind the start screen
        game.borrow_mut().render();
        Ok(())
    }

    pub async fn run() -> Result<(), PlatformError> {
        let document = platform::document()?;
        let canvas = platform::canvas(&document, "gameCanvas")?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let settings = Settings::load();

        // The page picks its game with data-game="runner" or "shooter"
        match canvas.get_attribute("data-game").as_deref() {
            Some("runner") => launch::<RunnerState>(canvas, settings).await,
            _ => launch::<ShooterState>(canvas, settings).await,
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Neon Arcade starting...");
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_arcade::Settings;
    use neon_arcade::demo::{DemoReport, run_headless};
    use neon_arcade::sim::{RunnerState, ShooterState, Simulation};

    /// Ten minutes of play at 60 frames per second
    const DEMO_FRAMES: u64 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Arcade (native) starting...");
    log::info!("Playing both games headless");

    let settings = Settings::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x00c0_ffee);

    let report = |name: &str, r: DemoReport| {
        let ending = if r.game_over { "game over" } else { "time up" };
        log::info!(
            "{}: score {} after {} frames ({})",
            name,
            r.score,
            r.frames,
            ending
        );
    };

    report(
        ShooterState::NAME,
        run_headless::<ShooterState>(seed, settings.sim_options(), DEMO_FRAMES, true),
    );
    report(
        RunnerState::NAME,
        run_headless::<RunnerState>(seed, settings.sim_options(), DEMO_FRAMES, true),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
