//! Hex Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build drives the game from `requestAnimationFrame`; the native build runs a
//! headless autoplay demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use hex_pop::Tuning;
    use hex_pop::audio::{AudioManager, effects_for};
    use hex_pop::consts::*;
    use hex_pop::renderer::{RenderState, build_scene};
    use hex_pop::sim::{GameEvent, GameState, TickInput, generate_grid, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Arrow keys currently held
        rotate_left: bool,
        rotate_right: bool,
        /// Device pixels per CSS pixel on the canvas
        pixel_ratio: f32,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            let mut state = GameState::new(seed, tuning);
            generate_grid(&mut state);
            Self {
                state,
                render_state: None,
                audio: AudioManager::new(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                rotate_left: false,
                rotate_right: false,
                pixel_ratio: 1.0,
            }
        }

        /// Convert a pointer offset (CSS pixels) to playfield pixels
        fn pointer_to_field(&self, x: f32, y: f32) -> Option<Vec2> {
            let render_state = self.render_state.as_ref()?;
            Some(render_state.viewport_to_game(Vec2::new(x, y) * self.pixel_ratio))
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(MAX_FRAME_DT);
            self.input.rotate = self.rotate_left as i32 as f32 - self.rotate_right as i32 as f32;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs are consumed by the first step
                self.input.aim_at = None;
                self.input.launch = false;
                self.input.restart = false;
            }

            self.handle_events();
        }

        fn handle_events(&mut self) {
            let events = self.state.drain_events();
            for event in &events {
                match event {
                    GameEvent::Cleared | GameEvent::Overflowed | GameEvent::Reset => {
                        log::info!("{:?} (score {})", event, self.state.score)
                    }
                    _ => log::debug!("{:?}", event),
                }
            }
            for effect in effects_for(&events) {
                self.audio.play(effect);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state);
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

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-shots") {
                el.set_text_content(Some(&self.state.shots.to_string()));
            }

            let Some(overlay) = document.get_element_by_id("game-over") else {
                return;
            };
            match self.state.end_message() {
                Some(message) => {
                    overlay.set_class_name("");
                    if let Some(el) = document.get_element_by_id("end-message") {
                        el.set_text_content(Some(message));
                    }
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&self.state.score.to_string()));
                    }
                }
                None => overlay.set_class_name("hidden"),
            }
        }
    }

    /// Tuning from an inline `<script id="tuning" type="application/json">`
    ///
    /// Missing element means defaults; a bad document is logged and ignored.
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }
        log::info!("Hex Pop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            loading.set_class_name("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning(&document);
        let field = Vec2::new(tuning.field_width(), tuning.playfield_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning)));
        game.borrow_mut().pixel_ratio = dpr as f32;
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            hud.set_class_name("");
        }

        request_animation_frame(game);
        log::info!("Hex Pop running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Pointer move aims
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let target = g.pointer_to_field(event.offset_x() as f32, event.offset_y() as f32);
                if target.is_some() {
                    g.input.aim_at = target;
                }
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down aims and launches
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let target = g.pointer_to_field(event.offset_x() as f32, event.offset_y() as f32);
                if target.is_some() {
                    g.input.aim_at = target;
                }
                g.input.launch = true;
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.audio.resume();
                        g.input.launch = true;
                    }
                    "ArrowLeft" => g.rotate_left = true,
                    "ArrowRight" => g.rotate_right = true,
                    "Enter" => g.input.restart = true,
                    "m" | "M" => {
                        let muted = g.audio.toggle_muted();
                        log::info!("Audio muted: {}", muted);
                    }
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.rotate_left = false,
                    "ArrowRight" => g.rotate_right = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Lost window; stopping frame loop");
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Hex Pop failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hex Pop (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let state = demo::autoplay(seed, hex_pop::Tuning::default());

    println!("seed:   {}", state.seed);
    println!("result: {:?}", state.phase);
    println!("shots:  {}", state.shots);
    println!("score:  {}", state.score);
    println!("left:   {} bubbles", state.grid.bubble_count());
    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use hex_pop::Tuning;
    use hex_pop::consts::SIM_DT;
    use hex_pop::sim::{GameState, TickInput, generate_grid, tick};

    /// Upper bound on shots before the demo gives up
    const MAX_SHOTS: u32 = 400;

    /// Play a game to the end by always aiming at the lowest bubble of the
    /// loaded color
    pub fn autoplay(seed: u64, tuning: Tuning) -> GameState {
        let mut state = GameState::new(seed, tuning);
        generate_grid(&mut state);

        while !state.is_over() && state.shots < MAX_SHOTS {
            let input = if state.projectile.is_none() {
                TickInput {
                    aim_at: Some(pick_target(&state)),
                    launch: true,
                    ..Default::default()
                }
            } else {
                TickInput::default()
            };
            tick(&mut state, &input, SIM_DT);
            state.drain_events();
        }

        log::info!(
            "Autoplay finished: {:?} after {} shots ({} ticks)",
            state.phase,
            state.shots,
            state.time_ticks
        );
        state
    }

    fn pick_target(state: &GameState) -> glam::Vec2 {
        let color = state.shooter.current_color;
        state
            .grid
            .bubbles()
            .filter(|b| b.color == color)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos)
            .unwrap_or_else(|| state.shooter_position() - glam::Vec2::new(0.0, 100.0))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_terminates() {
            let state = autoplay(7, Tuning::default());
            assert!(state.is_over() || state.shots == MAX_SHOTS);
            assert!(state.shots > 0);
        }

        #[test]
        fn test_autoplay_is_deterministic() {
            let a = autoplay(11, Tuning::default());
            let b = autoplay(11, Tuning::default());
            assert_eq!(a.score, b.score);
            assert_eq!(a.shots, b.shots);
            assert_eq!(a.phase, b.phase);
            assert_eq!(a.time_ticks, b.time_ticks);
        }
    }
}
