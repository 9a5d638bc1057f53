use crate::settings::Physics;

pub const BALL_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in viewport coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed palette shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Green,
    Gray,
    Sky,
    White,
    Gold,
    Navy,
    /// Semi-opaque black used behind the menu.
    Shade,
    Bubble,
}

impl Color {
    pub fn css(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Gray => "gray",
            Color::Sky => "#87CEEB",
            Color::White => "#FFFFFF",
            Color::Gold => "#FFD700",
            Color::Navy => "#1E2A47",
            Color::Shade => "rgba(0, 0, 0, 0.5)",
            Color::Bubble => "rgba(255, 255, 255, 0.35)",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 128, 0),
            Color::Gray => (128, 128, 128),
            Color::Sky => (135, 206, 235),
            Color::White => (255, 255, 255),
            Color::Gold => (255, 215, 0),
            Color::Navy => (30, 42, 71),
            // Shade over sky
            Color::Shade => (68, 103, 118),
            Color::Bubble => (177, 223, 242),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Position,
    pub radius: f64,
    pub color: Color,
    pub velocity: (f64, f64),
    pub airborne: bool,
}

impl Ball {
    pub fn new(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self {
            position: Position::new(x, y),
            radius,
            color,
            velocity: (0.0, 0.0),
            airborne: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x - self.radius,
            self.position.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn top(&self) -> f64 {
        self.position.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.radius
    }

    /// Advance one frame: gravity, friction, integrate, then bounce off the
    /// side walls of a viewport `width` wide.
    pub fn update(&mut self, physics: &Physics, width: f64) {
        self.velocity.1 += physics.gravity;
        self.velocity.0 *= physics.friction;

        self.position.x += self.velocity.0;
        self.position.y += self.velocity.1;

        let past_right = self.position.x + self.radius > width;
        let past_left = self.position.x - self.radius < 0.0;

        if past_right || past_left {
            self.velocity.0 = -self.velocity.0;
        }
        if past_right {
            self.position.x = width - self.radius;
        }
        if past_left {
            self.position.x = self.radius;
        }
    }

    pub fn steer(&mut self, direction: Direction, physics: &Physics) {
        match direction {
            Direction::Left => self.velocity.0 = -physics.move_speed,
            Direction::Right => self.velocity.0 = physics.move_speed,
            Direction::Up => {
                if !self.airborne {
                    self.velocity.1 = physics.jump_impulse;
                    self.airborne = true;
                }
            }
            Direction::Down => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Platform {
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            position: Position::new(x, y),
            width,
            height,
            color,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}
