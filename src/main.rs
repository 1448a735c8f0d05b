//! Raven Hunt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use raven_hunt::assets::AssetManifest;
    use raven_hunt::audio::AudioManager;
    use raven_hunt::platform::{WebAssets, WebCanvas};
    use raven_hunt::sim::{FrameOutcome, GameEvent, GameLoop, GamePhase};
    use raven_hunt::{GameConfig, PlatformError};

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        visible: WebCanvas,
        collision: WebCanvas,
        audio: AudioManager,
        assets: Rc<WebAssets>,
    }

    impl Game {
        /// Hand queued simulation events to audio and the DOM
        fn dispatch_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::PlaySound(key) => self.audio.play(key),
                    GameEvent::GameOver { final_score } => show_game_over(final_score),
                    GameEvent::TargetHit { .. } | GameEvent::TargetEscaped { .. } => {}
                }
            }
        }

        fn begin(&mut self) -> bool {
            let result = if self.game.phase() == GamePhase::Over {
                self.game.restart()
            } else {
                self.game.start(&*self.assets)
            };
            match result {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Cannot start round: {e}");
                    false
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_hidden(id: &str, hidden: bool) {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            return;
        };
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }

    fn show_play_screens(start: bool, end: bool) {
        set_hidden("main_canvas", start || end);
        set_hidden("collision_canvas", start || end);
        set_hidden("startScreen", !start);
        set_hidden("endScreen", !end);
    }

    fn show_game_over(score: u64) {
        if let Some(el) = document().and_then(|d| d.query_selector("#endScreen #score").ok().flatten()) {
            el.set_text_content(Some(&score.to_string()));
        }
        show_play_screens(false, true);
    }

    fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, PlatformError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| PlatformError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PlatformError::Js(format!("#{id} is not a canvas")))
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Raven Hunt starting...");

        let window = web_sys::window().ok_or_else(|| PlatformError::Js("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PlatformError::Js("no document".to_string()))?;

        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;

        let main_canvas = canvas_by_id(&document, "main_canvas")?;
        let collision_canvas = canvas_by_id(&document, "collision_canvas")?;
        for canvas in [&main_canvas, &collision_canvas] {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let config = GameConfig::load();
        let assets = WebAssets::load(&AssetManifest::default());
        let seed = js_sys::Date::now() as u64;

        let game = Rc::new(RefCell::new(Game {
            game: GameLoop::new(config.clone(), seed, width as f32, height as f32),
            visible: WebCanvas::new(main_canvas, assets.clone())?,
            collision: WebCanvas::collision(collision_canvas, assets.clone())?,
            audio: AudioManager::new(assets.clone(), config.effective_blast_volume()),
            assets: assets.clone(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Canvases and both screens stay hidden until assets are in
        for id in ["main_canvas", "collision_canvas", "startScreen", "endScreen"] {
            set_hidden(id, true);
        }

        setup_click_handler(game.clone());
        setup_play_buttons(&document, game.clone());

        assets.on_ready(|| {
            show_play_screens(true, false);
            log::info!("Raven Hunt ready!");
        });

        Ok(())
    }

    fn setup_click_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.game.phase() != GamePhase::Playing {
                return;
            }
            let (x, y) = g
                .collision
                .client_to_canvas(event.client_x() as f64, event.client_y() as f64);
            let Game {
                game: session,
                collision,
                ..
            } = &mut *g;
            session.click(x, y, &*collision);
            g.dispatch_events();
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_play_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for screen in ["#startScreen #play-btn", "#endScreen #play-btn"] {
            let Some(btn) = document.query_selector(screen).ok().flatten() else {
                log::warn!("Missing play button {}", screen);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the button press count as a shot
                event.stop_propagation();
                let started = game.borrow_mut().begin();
                if started {
                    show_play_screens(false, false);
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let outcome = {
            let mut g = game.borrow_mut();
            let Game {
                game: game_loop,
                visible,
                collision,
                ..
            } = &mut *g;
            let outcome = game_loop.frame(time, visible, collision);
            g.dispatch_events();
            outcome
        };

        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Raven Hunt failed to start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Raven Hunt (native) starting...");
    log::info!("Native mode runs a headless auto-play round - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let config = match args.next() {
        Some(mode) => match raven_hunt::DifficultyMode::from_str(&mode) {
            Some(mode) => raven_hunt::GameConfig::from_mode(mode),
            None => {
                log::warn!("Unknown mode '{}', using default", mode);
                raven_hunt::GameConfig::default()
            }
        },
        None => raven_hunt::GameConfig::default(),
    };

    match headless::auto_play(config, seed) {
        Ok(report) => println!(
            "Round over after {:.1}s: score {} ({} shots fired)",
            report.elapsed_ms / 1000.0,
            report.score,
            report.shots
        ),
        Err(e) => {
            log::error!("Headless run failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use raven_hunt::platform::{PixelBuffer, RecordingCanvas, StaticAssets};
    use raven_hunt::sim::{FrameOutcome, GameLoop};
    use raven_hunt::{GameConfig, GameError};

    const WIDTH: u32 = 1280;
    const HEIGHT: u32 = 720;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between auto-player shots
    const SHOT_EVERY: u32 = 20;
    /// Stop after ten minutes of play even if nothing escapes
    const MAX_FRAMES: u32 = 60 * 600;

    pub struct Report {
        pub score: u64,
        pub shots: u32,
        pub elapsed_ms: f64,
    }

    /// Play one round at 60 Hz, shooting the largest raven every few frames
    pub fn auto_play(config: GameConfig, seed: u64) -> Result<Report, GameError> {
        let mut game = GameLoop::new(config, seed, WIDTH as f32, HEIGHT as f32);
        let mut visible = RecordingCanvas::new(WIDTH as f32, HEIGHT as f32);
        let mut collision = PixelBuffer::new(WIDTH, HEIGHT);
        game.start(&StaticAssets::ready())?;

        let mut time = 0.0;
        let mut shots = 0;
        for frame in 0..MAX_FRAMES {
            if game.frame(time, &mut visible, &mut collision) == FrameOutcome::Stop {
                break;
            }

            // Largest raven is drawn last, so its center is never covered
            let aim = game
                .state
                .population
                .targets
                .last()
                .map(|t| t.rect())
                .filter(|r| r.x >= 0.0 && r.right() <= WIDTH as f32);
            if let Some(rect) = aim.filter(|_| frame % SHOT_EVERY == 0) {
                shots += 1;
                game.click(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0, &collision);
            }

            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
            time += FRAME_MS;
        }

        Ok(Report {
            score: game.score(),
            shots,
            elapsed_ms: time,
        })
    }
}
