use crate::web_renderer::{js_error, load_image};
use crate::{Game, Input, Renderer, Settings, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
}

impl GameLoop {
    fn drain_input(&mut self) -> Result<(), JsValue> {
        while let Some(input) = self.renderer.poll_input().map_err(|e| JsValue::from_str(&e.to_string()))? {
            match input {
                Input::Quit => {
                    // In web, we can't really quit, just log it
                    log::info!("Quit requested");
                }
                input => self.game.handle_input(input),
            }
        }
        Ok(())
    }

    fn update_frame(&mut self) -> Result<(), JsValue> {
        self.drain_input()?;
        self.game.update();
        self.renderer
            .render(&self.game)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Drive the game from `requestAnimationFrame`, one update and draw per frame.
fn start_animation_loop(game_loop: Rc<RefCell<GameLoop>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = game_loop.borrow_mut().update_frame() {
            log::error!("Frame failed: {:?}", e);
            return; // Stop loop on error
        }

        // Schedule next frame
        let scheduled = web_sys::window().ok_or_else(|| JsValue::from_str("no window")).and_then(|window| {
            match f.borrow().as_ref() {
                Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
                None => Err(JsValue::from_str("frame callback dropped")),
            }
        });
        if let Err(e) = scheduled {
            log::error!("Could not schedule next frame: {:?}", e);
        }
    }) as Box<dyn FnMut()>));

    let callback = g.borrow();
    let callback = callback.as_ref().ok_or("frame callback missing")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;

    log::info!("Game loop started");
    Ok(())
}

/// Entry point called from JavaScript.
///
/// `settings_json` may override any [`Settings`] field. When it names a
/// `background_image`, the game sits in the loading state until the image
/// arrives and the frame loop is only started after that. A failed load is
/// logged and the game never leaves the loading state.
#[wasm_bindgen]
pub fn start_game(canvas_id: &str, settings_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second call would find the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);

    let settings = match settings_json {
        Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Settings::default(),
    };
    let background = settings.background_image.clone();

    let mut renderer = WebRenderer::new(canvas_id)?;
    renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let game = Game::new(renderer.viewport(), settings, background.is_some());
    log::info!("Starting at {:?} in {:?}", game.viewport, game.state);
    let game_loop = Rc::new(RefCell::new(GameLoop { game, renderer }));

    let Some(src) = background else {
        return start_animation_loop(game_loop);
    };

    wasm_bindgen_futures::spawn_local(async move {
        let image = match load_image(&src).await {
            Ok(image) => image,
            Err(e) => {
                log::error!("Background image {} failed to load: {}", src, js_error(e));
                return;
            }
        };
        log::info!("Loaded background image {}", src);

        {
            let mut gl = game_loop.borrow_mut();
            gl.renderer.set_background(image);
            // Input queued while loading is dropped, apart from resizes
            if let Err(e) = gl.drain_input() {
                log::warn!("Dropping input queued while loading: {:?}", e);
            }
            gl.game.background_loaded();
        }

        if let Err(e) = start_animation_loop(game_loop) {
            log::error!("Failed to start game loop: {:?}", e);
        }
    });

    Ok(())
}
