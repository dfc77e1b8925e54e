//! Traffic Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use traffic_dodge::platform::{GamepadSnapshot, InputState};
    use traffic_dodge::renderer::hud::TextOverlay;
    use traffic_dodge::renderer::{RenderState, overlay_lines, shapes};
    use traffic_dodge::settings::Settings;
    use traffic_dodge::sim::{FrameClock, GamePhase, GameState, Spawner, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        input: InputState,
        spawner: Spawner,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        overlay: TextOverlay,
        /// Id of the connected gamepad, for the debug line
        controller: Option<String>,
    }

    impl Game {
        fn is_game_over(&self) -> bool {
            self.state.phase == GamePhase::GameOver
        }

        /// Run simulation ticks for this refresh
        fn update(&mut self, time: f64) {
            let ticks = self.clock.ticks_for(time);
            for _ in 0..ticks {
                let input = self.input.take_tick_input();
                tick(&mut self.state, &input);
            }

            for event in self.state.drain_events() {
                event.log();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&shapes::scene(&self.state)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            let lines = overlay_lines(&self.state, &self.settings, self.controller.as_deref());
            self.overlay.draw(&lines);
        }

        /// Apply a new window size to the simulation and both canvases
        fn resize(&mut self, viewport: Viewport) {
            let (w, h) = (viewport.width as u32, viewport.height as u32);
            self.state.resize(viewport);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.overlay.resize(w, h);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(w, h);
            }
        }
    }

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Viewport::for_window(dim(window.inner_width()), dim(window.inner_height()))
    }

    fn canvas_by_id(document: &web_sys::Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} canvas", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not a canvas", id)))
    }

    fn make_seed() -> u64 {
        getrandom::u64().unwrap_or_else(|_| js_sys::Date::now() as u64)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Traffic Dodge starting...");

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas = canvas_by_id(&document, "game")?;
        let overlay_canvas = canvas_by_id(&document, "overlay")?;

        let settings = Settings::load();
        let viewport = window_viewport(&window);
        let (width, height) = (viewport.width as u32, viewport.height as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let overlay = TextOverlay::new(overlay_canvas)?;
        overlay.resize(width, height);

        // Initialize game
        let seed = make_seed();
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_viewport(seed, viewport),
            input: InputState::new(),
            spawner: Spawner::new(settings.spawn_interval_ms, settings.spawn_while_frozen),
            clock: FrameClock::new(settings.frame_pacing),
            canvas: canvas.clone(),
            render_state: None,
            overlay,
            controller: None,
            settings,
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_spawner(&window, game.clone())?;
        if game.borrow().settings.gamepad_enabled {
            setup_gamepad(&window, game.clone())?;
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Traffic Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                if g.input.key_down(&event.code(), &g.settings.keys) {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut guard = game.borrow_mut();
                let g = &mut *guard;
                g.input.key_up(&event.code(), &g.settings.keys);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start: steer by screen half, or restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let window_width = web_sys::window()
                    .and_then(|w| w.inner_width().ok())
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0) as f32;

                let mut g = game.borrow_mut();
                let game_over = g.is_game_over();
                g.input
                    .touch_start(touch.client_x() as f32, window_width, game_over);
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.touch_end();
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer press (mouse click restart for PC)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                let game_over = g.is_game_over();
                g.input.pointer_down(game_over);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let viewport = window_viewport(&window);
            log::debug!("Resized to {}x{}", viewport.width, viewport.height);
            game.borrow_mut().resize(viewport);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn set_interval(
        window: &web_sys::Window,
        period_ms: u32,
        callback: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut()>::new(callback);
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(period_ms).unwrap_or(i32::MAX),
        )?;
        closure.forget();
        Ok(())
    }

    /// Spawn timer, independent of the render loop
    fn setup_spawner(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let period = game.borrow().spawner.period_ms;
        set_interval(window, period, move || {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            g.spawner.fire(&mut g.state);
        })
    }

    /// First connected pad, if any
    fn read_gamepad(navigator: &web_sys::Navigator) -> Option<GamepadSnapshot> {
        let pads = navigator.get_gamepads().ok()?;
        let pad = pads
            .iter()
            .find_map(|p| p.dyn_into::<web_sys::Gamepad>().ok())?;

        let axes = pad
            .axes()
            .iter()
            .map(|a| a.as_f64().unwrap_or(0.0))
            .collect();
        let buttons = pad
            .buttons()
            .iter()
            .map(|b| {
                b.dyn_into::<web_sys::GamepadButton>()
                    .map(|b| b.pressed())
                    .unwrap_or(false)
            })
            .collect();

        Some(GamepadSnapshot {
            id: pad.id(),
            axes,
            buttons,
        })
    }

    fn setup_gamepad(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Connection events only log; the poll below is what reads state
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    log::info!("Controller connected: {}", pad.id());
                }
            });
            window.add_event_listener_with_callback(
                "gamepadconnected",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::GamepadEvent| {
                if let Some(pad) = event.gamepad() {
                    log::info!("Controller disconnected: {}", pad.id());
                }
            });
            window.add_event_listener_with_callback(
                "gamepaddisconnected",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        let navigator = window.navigator();
        let period = game.borrow().settings.gamepad_poll_ms;
        set_interval(window, period, move || {
            let pad = read_gamepad(&navigator);
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            let game_over = g.is_game_over();
            g.input
                .poll_gamepad(pad.as_ref(), g.settings.stick_threshold, game_over);
            if g.controller.as_deref() != pad.as_ref().map(|p| p.id.as_str()) {
                g.controller = pad.map(|p| p.id);
            }
        })
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
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

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Traffic Dodge failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use traffic_dodge::Settings;
    use traffic_dodge::headless;

    /// Fixed seed so smoke runs are comparable
    const HEADLESS_SEED: u64 = 0x7aff1c;
    /// Ten minutes at 60 Hz
    const HEADLESS_MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Traffic Dodge (native) starting headless run...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let summary = headless::run(HEADLESS_SEED, HEADLESS_MAX_FRAMES, &Settings::default());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
