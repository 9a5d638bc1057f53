//! Backend-independent drawing of a [`Game`] onto a [`Surface`].

use crate::entity::{Ball, Color, Platform, Rect};
use crate::game::{Game, GameState};
use crate::menu::TitleScreen;
use crate::renderer::{Surface, TextAlign, TextStyle};
use crate::world::{Viewport, World};
use std::io;

const BUTTON_RADIUS: f64 = 10.0;
const PANEL_RADIUS: f64 = 16.0;

pub fn draw_frame(game: &Game, surface: &mut dyn Surface) -> io::Result<()> {
    match game.state {
        GameState::Loading => Ok(()),
        GameState::TitleScreen => draw_title_screen(&game.title, game.viewport, surface),
        GameState::Playing => {
            surface.clear(full(game.viewport))?;
            match &game.world {
                Some(world) => draw_world(world, surface),
                None => Ok(()),
            }
        }
    }
}

fn full(viewport: Viewport) -> Rect {
    Rect::new(0.0, 0.0, viewport.width, viewport.height)
}

pub fn draw_ball(ball: &Ball, surface: &mut dyn Surface) -> io::Result<()> {
    surface.fill_circle(ball.position.x, ball.position.y, ball.radius, ball.color)
}

pub fn draw_platform(platform: &Platform, surface: &mut dyn Surface) -> io::Result<()> {
    surface.fill_rect(platform.bounds(), platform.color)
}

fn draw_world(world: &World, surface: &mut dyn Surface) -> io::Result<()> {
    draw_ball(&world.ball, surface)?;
    for platform in &world.platforms {
        draw_platform(platform, surface)?;
    }
    Ok(())
}

fn draw_title_screen(title: &TitleScreen, viewport: Viewport, surface: &mut dyn Surface) -> io::Result<()> {
    let area = full(viewport);
    if !surface.draw_background(area)? {
        surface.fill_rect(area, Color::Sky)?;
    }

    for d in &title.decorations {
        surface.fill_circle(d.x * viewport.width, d.y * viewport.height, d.radius, d.color)?;
    }

    surface.fill_text(
        &title.title,
        viewport.width / 2.0,
        viewport.height * 0.2,
        TextStyle {
            size: 64.0,
            align: TextAlign::Center,
            color: Color::White,
            bold: true,
        },
    )?;

    // Not laid out yet: nothing to place the menu in
    let Some(panel) = title.panel else {
        return Ok(());
    };
    surface.fill_round_rect(panel, PANEL_RADIUS, Color::Shade)?;

    for (i, item) in title.items.iter().enumerate() {
        let Some(bounds) = item.bounds else { continue };
        let selected = i == title.selected;
        let fill = if selected { Color::Gold } else { Color::White };

        surface.fill_round_rect(bounds, BUTTON_RADIUS, fill)?;
        surface.fill_text(
            &item.label,
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height / 2.0,
            TextStyle {
                size: 24.0,
                align: TextAlign::Center,
                color: Color::Navy,
                bold: selected,
            },
        )?;
    }

    Ok(())
}
