use crate::draw::draw_frame;
use crate::entity::{Color, Direction, Rect};
use crate::game::Game;
use crate::renderer::{Input, Renderer, Surface, TextAlign, TextStyle};
use crate::world::Viewport;
use js_sys::Promise;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent};

pub(crate) fn js_error(e: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", e))
}

fn window_size(window: &web_sys::Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().ok_or("innerWidth is not a number")?;
    let height = window.inner_height()?.as_f64().ok_or("innerHeight is not a number")?;
    Ok((width, height))
}

/// Resolve once `src` has loaded. Rejects on a load error; the handlers are
/// attached before `src` is set so the event cannot be missed.
pub async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let promise = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    JsFuture::from(promise).await?;

    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}

/// Canvas 2D implementation of the drawing surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
}

impl CanvasSurface {
    fn round_rect_path(&self, rect: Rect, radius: f64) -> Result<(), JsValue> {
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(rect.x + r, rect.y);
        ctx.arc_to(rect.right(), rect.y, rect.right(), rect.bottom(), r)?;
        ctx.arc_to(rect.right(), rect.bottom(), rect.x, rect.bottom(), r)?;
        ctx.arc_to(rect.x, rect.bottom(), rect.x, rect.y, r)?;
        ctx.arc_to(rect.x, rect.y, rect.right(), rect.y, r)?;
        ctx.close_path();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self, area: Rect) -> io::Result<()> {
        self.context.clear_rect(area.x, area.y, area.width, area.height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(color.css());
        self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color) -> io::Result<()> {
        self.round_rect_path(rect, radius).map_err(js_error)?;
        self.context.set_fill_style_str(color.css());
        self.context.fill();
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()> {
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, PI * 2.0).map_err(js_error)?;
        self.context.set_fill_style_str(color.css());
        self.context.fill();
        self.context.close_path();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) -> io::Result<()> {
        let weight = if style.bold { "bold " } else { "" };
        self.context.set_font(&format!("{}{}px sans-serif", weight, style.size));
        self.context.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.context.set_text_baseline("middle");
        self.context.set_fill_style_str(style.color.css());
        self.context.fill_text(text, x, y).map_err(js_error)
    }

    fn draw_background(&mut self, area: Rect) -> io::Result<bool> {
        let Some(image) = &self.background else {
            return Ok(false);
        };
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(image, area.x, area.y, area.width, area.height)
            .map_err(js_error)?;
        Ok(true)
    }
}

pub struct WebRenderer {
    surface: CanvasSurface,
    window: web_sys::Window,

    // Filled by event listeners, drained once per frame
    pending_input: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Fill the window
        let (width, height) = window_size(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        Ok(Self {
            surface: CanvasSurface {
                canvas,
                context,
                background: None,
            },
            window,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.size()
    }

    pub fn set_background(&mut self, image: HtmlImageElement) {
        self.surface.background = Some(image);
    }

    fn setup_keyboard_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let input = match event.key().as_str() {
                "ArrowUp" => Some(Input::Direction(Direction::Up)),
                "ArrowDown" => Some(Input::Direction(Direction::Down)),
                "ArrowLeft" => Some(Input::Direction(Direction::Left)),
                "ArrowRight" => Some(Input::Direction(Direction::Right)),
                "Enter" => Some(Input::Confirm),
                _ => None,
            };

            if let Some(input) = input {
                pending_input.borrow_mut().push_back(input);
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        self.window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;

        closure.forget(); // Keep listener alive
        Ok(())
    }

    fn setup_click_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();
        let canvas = self.surface.canvas.clone();

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            // Client coordinates relative to the canvas origin
            let bounds = canvas.get_bounding_client_rect();
            pending_input.borrow_mut().push_back(Input::Click {
                x: event.client_x() as f64 - bounds.left(),
                y: event.client_y() as f64 - bounds.top(),
            });
        }) as Box<dyn FnMut(MouseEvent)>);

        self.surface
            .canvas
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize_listener(&self) -> Result<(), JsValue> {
        let pending_input = self.pending_input.clone();
        let canvas = self.surface.canvas.clone();

        let closure = Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else { return };
            match window_size(&window) {
                Ok((width, height)) => {
                    canvas.set_width(width as u32);
                    canvas.set_height(height as u32);
                    pending_input.borrow_mut().push_back(Input::Resize {
                        width: canvas.width() as f64,
                        height: canvas.height() as f64,
                    });
                }
                Err(e) => log::warn!("Could not read window size: {:?}", e),
            }
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        // Setup input listeners
        self.setup_keyboard_listener().map_err(js_error)?;
        self.setup_click_listener().map_err(js_error)?;
        self.setup_resize_listener().map_err(js_error)?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        draw_frame(game, &mut self.surface)
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
