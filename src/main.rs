//! Dino Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, MouseEvent,
    };

    use dino_run::consts::*;
    use dino_run::sim::Field;
    use dino_run::{Controller, GamePhase, Presenter, Settings, Snapshot};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type Game = Rc<RefCell<Controller<CanvasPresenter>>>;

    /// Draws snapshots onto the page canvas and owns the rAF request
    struct CanvasPresenter {
        ctx: CanvasRenderingContext2d,
        player_sprite: Option<HtmlImageElement>,
        obstacle_sprite: Option<HtmlImageElement>,
        score_el: Option<Element>,
        frame_callback: FrameCallback,
        pending_frame: Option<i32>,
    }

    impl CanvasPresenter {
        /// The requested frame is now running
        fn frame_fired(&mut self) {
            self.pending_frame = None;
        }

        fn draw(&self, snap: &Snapshot) {
            let ctx = &self.ctx;
            let w = snap.field.width as f64;
            let h = snap.field.height as f64;

            ctx.clear_rect(0.0, 0.0, w, h);

            // Ground
            ctx.set_fill_style_str("#333");
            ctx.fill_rect(0.0, snap.ground_line as f64, w, 2.0);

            // Player (two-frame run cycle in the sprite sheet)
            let p = snap.player.rect;
            match &self.player_sprite {
                Some(img) => {
                    let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        img,
                        snap.player.sprite_source_x() as f64,
                        0.0,
                        PLAYER_FRAME_WIDTH as f64,
                        PLAYER_HEIGHT as f64,
                        p.left() as f64,
                        p.top() as f64,
                        p.size.x as f64,
                        p.size.y as f64,
                    );
                }
                None => ctx.fill_rect(p.left() as f64, p.top() as f64, p.size.x as f64, p.size.y as f64),
            }

            // Obstacles
            for o in &snap.obstacles {
                match &self.obstacle_sprite {
                    Some(img) => {
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            o.left() as f64,
                            o.top() as f64,
                            o.size.x as f64,
                            o.size.y as f64,
                        );
                    }
                    None => ctx.fill_rect(o.left() as f64, o.top() as f64, o.size.x as f64, o.size.y as f64),
                }
            }

            if let Some(text) = snap.overlay_text() {
                ctx.set_fill_style_str("#000");
                ctx.set_font(if snap.phase == GamePhase::GameOver {
                    "30px Arial"
                } else {
                    "24px Arial"
                });
                ctx.set_text_align("center");
                let _ = ctx.fill_text(text, w / 2.0, h / 2.0);
            }
        }
    }

    impl Presenter for CanvasPresenter {
        fn request_frame(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = self.frame_callback.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => self.pending_frame = Some(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        fn cancel_frame(&mut self) {
            if let (Some(id), Some(window)) = (self.pending_frame.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
        }

        fn present(&mut self, snapshot: &Snapshot) {
            self.draw(snapshot);
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
        }
    }

    fn image(document: &Document, id: &str) -> Option<HtmlImageElement> {
        let img = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        if img.is_none() {
            log::warn!("Sprite #{} missing, drawing boxes instead", id);
        }
        img
    }

    /// Match the canvas width to its layout box; height is fixed
    fn size_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let width = canvas.offset_width().max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(FIELD_HEIGHT as u32);
        (width as f32, FIELD_HEIGHT)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Run starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let (width, height) = size_canvas(&canvas);

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let presenter = CanvasPresenter {
            ctx,
            player_sprite: image(&document, "dinoSprite"),
            obstacle_sprite: image(&document, "cactusSprite"),
            score_el: document.get_element_by_id("scoreText"),
            frame_callback: frame_callback.clone(),
            pending_frame: None,
        };

        let game: Game = Rc::new(RefCell::new(Controller::from_settings(
            &settings,
            seed,
            Field::new(width, height),
            presenter,
        )));

        log::info!("Game initialized with seed: {}", seed);

        // Per-frame tick
        {
            let game = game.clone();
            *frame_callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let mut g = game.borrow_mut();
                g.presenter_mut().frame_fired();
                g.on_frame();
            }));
        }

        setup_keyboard(game.clone())?;
        setup_start_button(&document, game.clone())?;
        setup_resize(canvas, game)?;

        log::info!("Dino Run ready");
        Ok(())
    }

    fn setup_keyboard(game: Game) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let code = event.code();
            if game.borrow_mut().key_down(&code) && code == "Space" {
                // Keep Space from scrolling the page
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_start_button(document: &Document, game: Game) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("startButton") else {
            log::warn!("No #startButton, keyboard start only");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().start_button();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Game) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = size_canvas(&canvas);
            game.borrow_mut().resize(w, h);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_run::sim::Field;
    use dino_run::{Controller, GamePhase, Presenter, Settings, Snapshot, autopilot};

    /// Presenter that records the frame request instead of waiting for vsync
    #[derive(Default)]
    struct HeadlessHost {
        pending: bool,
        presented: u64,
    }

    impl Presenter for HeadlessHost {
        fn request_frame(&mut self) {
            self.pending = true;
        }

        fn cancel_frame(&mut self) {
            self.pending = false;
        }

        fn present(&mut self, _snapshot: &Snapshot) {
            self.presented += 1;
        }
    }

    pub struct Summary {
        pub score: u64,
        pub ticks: u64,
        pub phase: GamePhase,
    }

    /// Play one run with the autopilot until game over or `max_ticks`
    pub fn run(settings: &Settings, seed: u64, max_ticks: u64) -> Summary {
        let mut game = Controller::from_settings(settings, seed, Field::default(), HeadlessHost::default());
        game.start_button();

        let mut ticks = 0;
        while game.presenter().pending && ticks < max_ticks {
            game.presenter_mut().pending = false;
            if let Some(command) = autopilot::decide(&game.simulation().snapshot()) {
                game.handle(command);
            }
            game.on_frame();
            ticks += 1;
        }

        log::debug!("Presented {} frames", game.presenter().presented);
        Summary {
            score: game.simulation().state().score,
            ticks,
            phase: game.phase(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Run (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` to play");

    let mut args = std::env::args().skip(1);
    let settings = dino_run::Settings::load();
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(2);
        }
        None => settings.seed_or(0xD1A0),
    };
    let max_ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick limit: {}", e);
            std::process::exit(2);
        }
        None => 10_000,
    };

    let summary = headless::run(&settings, seed, max_ticks);
    log::info!(
        "Seed {}: score {} after {} ticks ({:?})",
        seed,
        summary.score,
        summary.ticks,
        summary.phase
    );
    println!("{}", summary.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
