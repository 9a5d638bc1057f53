use crate::draw::draw_frame;
use crate::entity::{Color, Direction, Rect};
use crate::game::Game;
use crate::renderer::{Input, Renderer, Surface, TextAlign, TextStyle};
use crate::world::Viewport;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    execute, queue,
    style::{self, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Viewport pixels covered by one terminal column.
pub const CELL_WIDTH: f64 = 10.0;
/// Viewport pixels covered by one terminal row.
pub const CELL_HEIGHT: f64 = 20.0;

const BLANK: Color = Color::Navy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Cell {
    const EMPTY: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: BLANK,
        bold: false,
    };
}

/// Character grid the draw calls are rasterised into. A cell is painted
/// when its centre falls inside a shape.
pub struct FrameBuffer {
    pub columns: usize,
    pub rows: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::EMPTY; columns * rows],
        }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![Cell::EMPTY; columns * rows];
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column)
    }

    fn cell_mut(&mut self, column: i64, row: i64) -> Option<&mut Cell> {
        if column < 0 || row < 0 || column as usize >= self.columns || row as usize >= self.rows {
            return None;
        }
        self.cells.get_mut(row as usize * self.columns + column as usize)
    }

    fn centre(column: i64, row: i64) -> (f64, f64) {
        (
            (column as f64 + 0.5) * CELL_WIDTH,
            (row as f64 + 0.5) * CELL_HEIGHT,
        )
    }

    /// Column/row span a rect could touch, clipped to the grid.
    fn span(&self, rect: Rect) -> (i64, i64, i64, i64) {
        let first_column = ((rect.x / CELL_WIDTH).floor() as i64).max(0);
        let last_column = ((rect.right() / CELL_WIDTH).ceil() as i64).min(self.columns as i64);
        let first_row = ((rect.y / CELL_HEIGHT).floor() as i64).max(0);
        let last_row = ((rect.bottom() / CELL_HEIGHT).ceil() as i64).min(self.rows as i64);
        (first_column, last_column, first_row, last_row)
    }

    fn paint(&mut self, column: i64, row: i64, color: Color) {
        if let Some(cell) = self.cell_mut(column, row) {
            *cell = Cell { bg: color, ..Cell::EMPTY };
        }
    }

    fn paint_where(&mut self, bounds: Rect, color: Color, inside: impl Fn(f64, f64) -> bool) {
        let (c0, c1, r0, r1) = self.span(bounds);
        for row in r0..r1 {
            for column in c0..c1 {
                let (x, y) = Self::centre(column, row);
                if inside(x, y) {
                    self.paint(column, row, color);
                }
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> Viewport {
        Viewport::new(self.columns as f64 * CELL_WIDTH, self.rows as f64 * CELL_HEIGHT)
    }

    fn clear(&mut self, area: Rect) -> io::Result<()> {
        self.paint_where(area, BLANK, |x, y| area.contains(x, y));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.paint_where(rect, color, |x, y| rect.contains(x, y));
        Ok(())
    }

    fn fill_round_rect(&mut self, rect: Rect, _radius: f64, color: Color) -> io::Result<()> {
        // Corners are smaller than a cell
        self.fill_rect(rect, color)
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()> {
        let bounds = Rect::new(x - radius, y - radius, radius * 2.0, radius * 2.0);
        self.paint_where(bounds, color, |cx, cy| {
            let (dx, dy) = (cx - x, cy - y);
            dx * dx + dy * dy <= radius * radius
        });
        // Small circles still show up as one cell
        self.paint(
            (x / CELL_WIDTH).floor() as i64,
            (y / CELL_HEIGHT).floor() as i64,
            color,
        );
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) -> io::Result<()> {
        let len = text.chars().count() as i64;
        let anchor = (x / CELL_WIDTH).floor() as i64;
        let start = match style.align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - len / 2,
            TextAlign::Right => anchor - len,
        };
        let row = (y / CELL_HEIGHT).floor() as i64;

        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i64, row) {
                cell.ch = ch;
                cell.fg = style.color;
                cell.bold = style.bold;
            }
        }
        Ok(())
    }

    fn draw_background(&mut self, _area: Rect) -> io::Result<bool> {
        Ok(false)
    }
}

fn term_color(color: Color) -> style::Color {
    let (r, g, b) = color.rgb();
    style::Color::Rgb { r, g, b }
}

pub struct CliRenderer {
    buffer: FrameBuffer,
    last_render: Instant,
    target_frame_time: Duration,
}

impl CliRenderer {
    pub fn new() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self {
            buffer: FrameBuffer::new(columns as usize, rows as usize),
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.buffer.size()
    }

    fn flush(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(stdout, cursor::MoveTo(0, 0))?;

        let mut current: Option<Cell> = None;
        for row in 0..self.buffer.rows {
            queue!(stdout, cursor::MoveTo(0, row as u16))?;
            for column in 0..self.buffer.columns {
                let Some(&cell) = self.buffer.cell(column, row) else { continue };
                let restyle = current.map_or(true, |c| c.fg != cell.fg || c.bg != cell.bg || c.bold != cell.bold);
                if restyle {
                    queue!(
                        stdout,
                        SetAttribute(if cell.bold { style::Attribute::Bold } else { style::Attribute::NormalIntensity }),
                        SetBackgroundColor(term_color(cell.bg)),
                        SetForegroundColor(term_color(cell.fg)),
                    )?;
                    current = Some(cell);
                }
                queue!(stdout, Print(cell.ch))?;
            }
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }
        self.last_render = Instant::now();

        draw_frame(game, &mut self.buffer)?;

        let mut stdout = io::stdout();
        self.flush(&mut stdout)
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(Duration::from_millis(5))? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
                KeyCode::Enter => Some(Input::Confirm),
                KeyCode::Up => Some(Input::Direction(Direction::Up)),
                KeyCode::Down => Some(Input::Direction(Direction::Down)),
                KeyCode::Left => Some(Input::Direction(Direction::Left)),
                KeyCode::Right => Some(Input::Direction(Direction::Right)),
                _ => None,
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => Some(Input::Click {
                x: (column as f64 + 0.5) * CELL_WIDTH,
                y: (row as f64 + 0.5) * CELL_HEIGHT,
            }),
            Event::Resize(columns, rows) => {
                self.buffer.resize(columns as usize, rows as usize);
                let viewport = self.buffer.size();
                Some(Input::Resize {
                    width: viewport.width,
                    height: viewport.height,
                })
            }
            _ => None,
        };

        Ok(input)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
