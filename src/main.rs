//! Ledge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build drives the game from `requestAnimationFrame`; the native build is a
//! headless runner that plays a scripted session and dumps the final state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use ledge_runner::audio::{AudioManager, SoundEffect};
    use ledge_runner::renderer::{RenderState, scene_vertices};
    use ledge_runner::scene::draw_list;
    use ledge_runner::sim::{GameState, tick};
    use ledge_runner::{FramePacer, KeyState, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: KeyState,
        pacer: FramePacer,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_fps_log: f64,
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            Self {
                state,
                keys: KeyState::new(),
                pacer: FramePacer::new(settings.timestep),
                render_state: None,
                audio: AudioManager::new(&settings),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_fps_log: 0.0,
            }
        }

        /// Run the simulation ticks owed for this frame
        fn update(&mut self, time: f64) {
            let dt = self.pacer.frame_dt(time);
            let ticks = self.pacer.ticks_for_frame(dt);

            for _ in 0..ticks {
                let input = self.keys.snapshot();
                tick(&mut self.state, &input);

                for event in self.state.take_events() {
                    if let Some(effect) = SoundEffect::for_event(&event) {
                        self.audio.play(effect);
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest entry is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.settings.show_fps && time - self.last_fps_log >= 1000.0 {
                self.last_fps_log = time;
                log::info!("FPS: {}", self.fps);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };

            let vertices = scene_vertices(&draw_list(&self.state));
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

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or_else(|| js_err("no #game canvas"))?
            .dyn_into()?;

        // The world spans the canvas' CSS size; the backing store is scaled
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let dpr = window.device_pixel_ratio();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load(&canvas);
        let state = GameState::new(client_w as f32, client_h as f32).map_err(js_err)?;
        let world_size = (state.bounds().width(), state.bounds().height());
        let game = Rc::new(RefCell::new(Game::new(state, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world_size)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone())?;

        request_animation_frame(game);

        log::info!("Ledge Runner running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.keys.press(&event.code()) {
                    // Keep Space/arrows from scrolling the page
                    event.prevent_default();
                    g.audio.resume();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-ups for held keys will never arrive, and frames
        // stop while hidden
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys.clear();
                g.pacer.reset();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ledge_runner::consts::SIM_DT;
    use ledge_runner::sim::{GameEvent, GameState, RespawnCause, TickInput, tick};
    use ledge_runner::{FramePacer, Settings};

    /// `WxH` world size override
    pub const SIZE_VAR: &str = "LEDGE_RUNNER_SIZE";
    pub const DEFAULT_SIZE: (f32, f32) = (800.0, 600.0);
    /// Frames presented in a scripted session (15 s at 60 Hz)
    pub const SESSION_FRAMES: u32 = 900;

    /// Parse `"800x600"`; rejects anything that isn't two positive numbers
    pub fn parse_size(s: &str) -> Option<(f32, f32)> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        let w: f32 = w.trim().parse().ok()?;
        let h: f32 = h.trim().parse().ok()?;
        (w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0).then_some((w, h))
    }

    /// Walk right most of the time, back off briefly, hop every 45 ticks
    pub fn scripted_input(tick: u32) -> TickInput {
        let phase = tick % 240;
        TickInput {
            left: (200..230).contains(&phase),
            right: phase < 180,
            jump: tick % 45 == 0,
        }
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    pub struct SessionStats {
        pub ticks: u32,
        pub jumps: u32,
        pub falls: u32,
        pub enemy_hits: u32,
    }

    /// Play the scripted session on `state`
    pub fn play(state: &mut GameState, pacer: &mut FramePacer, frames: u32) -> SessionStats {
        let mut stats = SessionStats::default();

        for _ in 0..frames {
            // Headless frames arrive exactly on the 60 Hz grid
            for _ in 0..pacer.ticks_for_frame(SIM_DT) {
                let input = scripted_input(stats.ticks);
                tick(state, &input);
                stats.ticks += 1;

                for event in state.take_events() {
                    match event {
                        GameEvent::Jumped => stats.jumps += 1,
                        GameEvent::Respawned {
                            cause: RespawnCause::FellOutOfWorld,
                        } => stats.falls += 1,
                        GameEvent::Respawned {
                            cause: RespawnCause::EnemyContact,
                        } => stats.enemy_hits += 1,
                    }
                }
            }
        }

        stats
    }

    pub fn run() {
        let settings = Settings::load();

        let (width, height) = match std::env::var(SIZE_VAR) {
            Ok(raw) => parse_size(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring invalid {}={:?}", SIZE_VAR, raw);
                DEFAULT_SIZE
            }),
            Err(_) => DEFAULT_SIZE,
        };

        let mut state = match GameState::new(width, height) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot build world: {}", e);
                std::process::exit(1);
            }
        };

        let mut pacer = FramePacer::new(settings.timestep);
        let stats = play(&mut state, &mut pacer, SESSION_FRAMES);

        log::info!(
            "Session done: {} ticks, {} jumps, {} falls, {} enemy hits",
            stats.ticks,
            stats.jumps,
            stats.falls,
            stats.enemy_hits
        );
        log::info!("Player ends at {}", state.player.rect().min());

        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize final state: {}", e),
        }
    }

}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ledge Runner (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
