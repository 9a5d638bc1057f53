use crate::entity::{Color, Direction, Rect};
use crate::world::Viewport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const PANEL_WIDTH: f64 = 300.0;
pub const PANEL_MARGIN_RIGHT: f64 = 50.0;
pub const PANEL_PADDING: f64 = 30.0;
pub const ITEM_HEIGHT: f64 = 50.0;
pub const ITEM_SPACING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub action: Option<MenuAction>,
    /// Screen bounds from the most recent layout pass
    pub bounds: Option<Rect>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let action = match label.as_str() {
            "Play" => Some(MenuAction::Play),
            _ => None,
        };
        Self {
            label,
            action,
            bounds: None,
        }
    }
}

/// Decorative circle in normalised (0..1) viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct TitleScreen {
    pub title: String,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub panel: Option<Rect>,
    pub decorations: Vec<Decoration>,
}

impl TitleScreen {
    pub fn new(title: impl Into<String>, labels: &[String], decoration_seed: u64, decoration_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(decoration_seed);
        let decorations = (0..decoration_count)
            .map(|i| Decoration {
                // Keep bubbles on the left, clear of the menu panel
                x: rng.gen_range(0.05..0.55),
                y: rng.gen_range(0.35..0.95),
                radius: rng.gen_range(10.0..45.0),
                color: if i % 2 == 0 { Color::Bubble } else { Color::White },
            })
            .collect();

        Self {
            title: title.into(),
            items: labels.iter().map(|label| MenuItem::new(label.as_str())).collect(),
            selected: 0,
            panel: None,
            decorations,
        }
    }

    /// Move the selection one step, wrapping at both ends.
    pub fn navigate(&mut self, direction: Direction) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.selected = match direction {
            Direction::Up => (self.selected + len - 1) % len,
            Direction::Down => (self.selected + 1) % len,
            Direction::Left | Direction::Right => self.selected,
        };
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).and_then(|item| item.action)
    }

    /// Action of the item whose last laid-out bounds contain the point.
    pub fn action_at(&self, x: f64, y: f64) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.bounds.is_some_and(|b| b.contains(x, y)))
            .and_then(|item| item.action)
    }

    /// Compute panel and button bounds for the current viewport. The panel
    /// hangs off the right edge, centred vertically.
    pub fn layout(&mut self, viewport: Viewport) {
        let count = self.items.len() as f64;
        let panel_height = PANEL_PADDING * 2.0 + count * ITEM_HEIGHT + (count - 1.0).max(0.0) * ITEM_SPACING;
        let panel = Rect::new(
            viewport.width - PANEL_MARGIN_RIGHT - PANEL_WIDTH,
            viewport.height / 2.0 - panel_height / 2.0,
            PANEL_WIDTH,
            panel_height,
        );

        for (i, item) in self.items.iter_mut().enumerate() {
            item.bounds = Some(Rect::new(
                panel.x + PANEL_PADDING,
                panel.y + PANEL_PADDING + i as f64 * (ITEM_HEIGHT + ITEM_SPACING),
                PANEL_WIDTH - PANEL_PADDING * 2.0,
                ITEM_HEIGHT,
            ));
        }
        self.panel = Some(panel);
    }
}
