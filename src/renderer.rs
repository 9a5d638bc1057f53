use crate::entity::{Color, Direction, Rect};
use crate::game::Game;
use crate::world::Viewport;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Direction(Direction),
    Confirm,
    Click { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub align: TextAlign,
    pub color: Color,
    pub bold: bool,
}

/// The drawing capabilities the game needs from a backend.
/// Coordinates are viewport pixels; text is anchored at its vertical middle.
pub trait Surface {
    fn size(&self) -> Viewport;

    fn clear(&mut self, area: Rect) -> io::Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;

    fn fill_round_rect(&mut self, rect: Rect, radius: f64, color: Color) -> io::Result<()>;

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()>;

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) -> io::Result<()>;

    /// Blit the background image over `area`. Returns false when the backend
    /// has no image, so the caller can fill instead.
    fn draw_background(&mut self, area: Rect) -> io::Result<bool>;
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
