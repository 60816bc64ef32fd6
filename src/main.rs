//! Poly Break entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! playable build targets the browser; the native binary drives the
//! simulation headless as a smoke run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use poly_break::audio::{AudioManager, Cue};
    use poly_break::consts::*;
    use poly_break::renderer::{RenderState, scene};
    use poly_break::settings::Settings;
    use poly_break::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Key flags filled by the DOM listeners, sampled once per tick.
    /// `restart`, `quit` and `toggle_mute` are one-shots.
    #[derive(Default)]
    struct InputState {
        left: bool,
        right: bool,
        restart: bool,
        quit: bool,
        toggle_mute: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        input: InputState,
        accumulator: f32,
        last_time: f64,
        /// Rendered frame counter (seeds the jitter lines)
        frame: u64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::default();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                state: GameState::new(seed),
                render_state: None,
                audio,
                settings,
                input: InputState::default(),
                accumulator: 0.0,
                last_time: 0.0,
                frame: 0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks for the elapsed real time
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    left: self.input.left,
                    right: self.input.right,
                    restart: self.input.restart,
                };
                tick(&mut self.state, &input);
                self.dispatch_events();
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.restart = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Map the tick's events to audio cues and logging
        fn dispatch_events(&mut self) {
            for event in self.state.events.drain(..) {
                match event {
                    GameEvent::PaddleHit => self.audio.play(Cue::PaddleHit),
                    GameEvent::BrickBroken => self.audio.play(Cue::BrickBreak),
                    GameEvent::WallBounce => self.audio.play(Cue::WallBounce),
                    GameEvent::BallLost => self.audio.play(Cue::BallLost),
                    GameEvent::GameOver { won } => {
                        log::info!(
                            "run over: won={}, score={}, ticks={}",
                            won,
                            self.state.score,
                            self.state.time_ticks
                        );
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.frame += 1;
            let vertices = scene::build_frame(&self.state, self.frame, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            // Show/hide game over banner
            if let Some(el) = document.get_element_by_id("game-over") {
                if let GamePhase::GameOver { won } = self.state.phase {
                    let _ = el.set_attribute("class", "");
                    let message = if won { "YOU WIN!" } else { "GAME OVER!" };
                    if let Some(title) = document.get_element_by_id("game-over-title") {
                        title.set_text_content(Some(message));
                    }
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Stop the loop and release audio/display resources
        fn shutdown(&mut self) {
            self.audio.shutdown();
            self.render_state = None;
            log::info!("quit: final score {}", self.state.score);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Poly Break starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU; failure here is fatal
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Poly Break running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key press: movement, restart, quit, mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "r" | "R" => g.input.restart = true,
                    "Escape" => g.input.quit = true,
                    "m" | "M" => g.input.toggle_mute = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key release: movement keys are held-state
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Quit stops the loop for good: no further frames scheduled
            if g.input.quit {
                g.shutdown();
                return;
            }

            if g.input.toggle_mute {
                g.input.toggle_mute = false;
                g.settings.muted = !g.settings.muted;
                g.audio.set_volume(g.settings.effective_volume());
                log::info!("muted: {}", g.settings.muted);
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Poly Break (native) starting...");
    log::info!("The playable build targets the browser - run with `trunk serve`");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation without a display: a minimal paddle tracker plays
/// for up to two simulated minutes and the outcome is printed. Useful as a
/// native smoke run of the whole sim.
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use poly_break::sim::{GameState, TickInput, tick};

    let seed = 42;
    let mut state = GameState::new(seed);

    for _ in 0..(120 * 60) {
        // Track the ball with a small deadzone so the paddle doesn't twitch
        let center = state.paddle.pos.x + state.paddle.width / 2.0;
        let input = TickInput {
            left: state.ball.pos.x < center - 4.0,
            right: state.ball.pos.x > center + 4.0,
            restart: false,
        };
        tick(&mut state, &input);
        if state.game_over() {
            break;
        }
    }

    println!(
        "seed {}: {} ticks, score {}, lives {}, bricks left {}",
        seed,
        state.time_ticks,
        state.score,
        state.lives,
        state.bricks.iter().filter(|b| b.visible).count()
    );
}
