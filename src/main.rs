//! Synthwave Runner entry point
//!
//! Browser builds run the game on a canvas; native builds play a headless run
//! with the autopilot and print a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, KeyboardEvent, PointerEvent, VisibilityState, Window,
    };

    use synthwave_runner::audio::{AudioManager, SoundEffect};
    use synthwave_runner::input::{self, KeyPhase};
    use synthwave_runner::persistence::LocalStorageStore;
    use synthwave_runner::renderer::CanvasRenderer;
    use synthwave_runner::settings::{Preset, Settings};
    use synthwave_runner::sim::{GameMode, InputSignal, RunnerConfig};
    use synthwave_runner::{Game, HighScoreStore};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Browser-side session
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        audio: AudioManager,
        settings: Settings,
        /// Pending `requestAnimationFrame` request
        frame_handle: Option<i32>,
    }

    impl App {
        fn send(&mut self, signal: InputSignal) {
            // Browsers only unlock audio inside a user gesture
            self.audio.resume();
            self.game.handle_input(signal);
        }

        fn frame(&mut self, time: f64) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let width = (self.canvas.client_width() as f64 * dpr).round() as u32;
            let height = (self.canvas.client_height() as f64 * dpr).round() as u32;
            self.renderer.resize(width, height);

            for event in self.game.frame(time) {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            let fps = self.settings.show_fps.then(|| self.game.fps());
            self.renderer.render(&self.game.snapshot(), fps);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save(&mut LocalStorageStore);
            log::info!("Muted: {}", self.settings.muted);
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.settings.auto_pause && self.game.mode() == GameMode::Playing {
                self.game.handle_input(InputSignal::PauseToggle);
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn schedule(&mut self, callback: &FrameCallback) {
            if self.frame_handle.is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            let callback = callback.borrow();
            let Some(cb) = callback.as_ref() else {
                return;
            };
            self.frame_handle = window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok();
        }

        fn cancel(&mut self) {
            if let (Some(handle), Some(window)) = (self.frame_handle.take(), web_sys::window()) {
                window.cancel_animation_frame(handle).ok();
                log::debug!("Frame loop suspended");
            }
        }
    }

    fn missing(what: &str) -> JsValue {
        JsValue::from_str(&format!("{} not available", what))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Synthwave Runner starting...");

        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or_else(|| missing("#canvas"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let settings = Settings::load(&LocalStorageStore);
        // The page can force a preset, e.g. the compact 404 embed
        let preset = canvas
            .get_attribute("data-preset")
            .and_then(|p| Preset::from_str(&p))
            .unwrap_or(settings.preset);
        log::info!("Preset: {}", preset.as_str());
        let config = canvas
            .get_attribute("data-config")
            .and_then(|json| {
                RunnerConfig::from_json(&json)
                    .map_err(|e| log::warn!("Ignoring data-config: {}", e))
                    .ok()
            })
            .unwrap_or_else(|| preset.config());

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, HighScoreStore::local_storage(), seed);
        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer::new(canvas.clone())?,
            canvas: canvas.clone(),
            audio: AudioManager::new(&settings),
            settings,
            frame_handle: None,
        }));

        let callback = frame_callback(app.clone());
        setup_input_handlers(&window, &canvas, app.clone());
        setup_lifecycle(&window, &document, app.clone(), callback.clone());

        app.borrow_mut().schedule(&callback);
        log::info!("Synthwave Runner running!");
        Ok(())
    }

    fn frame_callback(app: Rc<RefCell<App>>) -> FrameCallback {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let reschedule = callback.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            a.frame(time);
            a.schedule(&reschedule);
        }));
        callback
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if input::captures_key(&key) {
                    event.prevent_default();
                }
                if event.repeat() {
                    return;
                }
                let mut a = app.borrow_mut();
                if input::is_mute_key(&key) {
                    a.toggle_mute();
                    return;
                }
                if let Some(signal) = input::signal_for_key(&key, KeyPhase::Down, a.game.mode()) {
                    a.send(signal);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if let Some(signal) = input::signal_for_key(&event.key(), KeyPhase::Up, a.game.mode())
                {
                    a.send(signal);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse, pen and touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let signal = input::signal_for_pointer(a.game.mode());
                a.send(signal);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_lifecycle(
        window: &Window,
        document: &Document,
        app: Rc<RefCell<App>>,
        callback: FrameCallback,
    ) {
        // Tab switch or minimize: stop the loop while hidden
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if document_clone.visibility_state() == VisibilityState::Hidden {
                    a.auto_pause("tab hidden");
                    a.cancel();
                } else {
                    a.game.resync_clock();
                    a.schedule(&callback);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Click outside the page
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().auto_pause("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaving the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.cancel();
                a.game.abandon();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use synthwave_runner::autopilot::run_headless;
    use synthwave_runner::settings::Preset;
    use synthwave_runner::{Game, HighScoreStore};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: synthwave-runner [seed] [seconds] [preset]
    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), "seed", 1_u64);
    let seconds = parse_arg(args.next(), "seconds", 60.0_f32);
    let preset = args
        .next()
        .and_then(|p| Preset::from_str(&p))
        .unwrap_or_default();

    log::info!(
        "Synthwave Runner (native) starting: seed {}, {}s, {} preset",
        seed,
        seconds,
        preset.as_str()
    );

    let mut game = Game::new(preset.config(), HighScoreStore::memory(), seed);
    let summary = run_headless(&mut game, seconds);

    match game.snapshot().to_json() {
        Ok(json) => log::debug!("Final snapshot: {}", json),
        Err(e) => log::warn!("Snapshot export failed: {}", e),
    }
    log::info!(
        "Seed {} {} after {:.1}s: score {}, distance {:.0}m",
        summary.seed,
        if summary.crashed { "crashed" } else { "survived" },
        summary.frames as f32 / 60.0,
        summary.score,
        summary.distance
    );
    log::info!(
        "{} jumps, {} collectibles, {} power-ups",
        summary.jumps,
        summary.collected,
        summary.power_ups
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} `{}`, using default", name, raw);
            default
        }),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
