pub mod collision;
pub mod draw;
pub mod entity;
pub mod game;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod world;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_renderer;
#[cfg(target_arch = "wasm32")]
mod web_main;

pub use entity::{Ball, Color, Direction, Platform, Position, Rect};
pub use game::{Game, GameState};
pub use menu::{MenuAction, MenuItem, TitleScreen};
pub use renderer::{Input, Renderer, Surface};
pub use settings::{Physics, Settings};
pub use world::{Viewport, World};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;

#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_main::start_game;
