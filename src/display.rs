//! Rendering layer — all terminal output lives here.
//!
//! Implements the core's `Renderer` port on top of crossterm.  Playfield
//! coordinates are scaled onto the terminal grid and anything outside it is
//! clipped; no game logic is performed.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use side_shooter::geometry::Rect;
use side_shooter::ports::{Anchor, RectStyle, Renderer, Rgb, Sprite, TextSize};

// ── Sprite art ────────────────────────────────────────────────────────────────

const PLAYER_ART: &[&str] = &[" ▄▄    ", "███▶══ ", " ▀▀    "];
const ENEMY_ART: &[&str] = &["  ▄▄▄ ", "◀▓▓▓▓ ", "  ▀▀▀ "];
const BULLET_ART: &[&str] = &["═"];

const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::DarkRed;
const C_BULLET: Color = Color::Yellow;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    field_w: i32,
    field_h: i32,
    /// Background of the current frame, reused under text and sprites.
    background: Color,
    last_tick: Instant,
}

impl<W: Write> TerminalRenderer<W> {
    /// Map a `field_w`×`field_h` playfield onto a `cols`×`rows` terminal.
    pub fn new(out: W, cols: u16, rows: u16, field_w: i32, field_h: i32) -> Self {
        TerminalRenderer {
            out,
            cols,
            rows,
            field_w,
            field_h,
            background: Color::Reset,
            last_tick: Instant::now(),
        }
    }

    fn col(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64).div_euclid(self.field_w as i64) as i32
    }

    fn row(&self, y: i32) -> i32 {
        (y as i64 * self.rows as i64).div_euclid(self.field_h as i64) as i32
    }

    fn on_screen(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    /// Print `text` from cell `(col, row)`, dropping characters off-screen.
    fn put(&mut self, col: i32, row: i32, text: &str) -> io::Result<()> {
        if row < 0 || row >= self.rows as i32 {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| {
                let c = col + *i as i32;
                c >= 0 && c < self.cols as i32
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        let start = col.max(0) as u16;
        self.out.queue(cursor::MoveTo(start, row as u16))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn put_cell(&mut self, col: i32, row: i32, ch: char) -> io::Result<()> {
        if !self.on_screen(col, row) {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(Print(ch))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn fill(&mut self, color: Rgb) -> io::Result<()> {
        self.background = to_color(color);
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) -> io::Result<()> {
        let (art, color) = match sprite {
            Sprite::Player => (PLAYER_ART, C_PLAYER),
            Sprite::Enemy => (ENEMY_ART, C_ENEMY),
            Sprite::Bullet => (BULLET_ART, C_BULLET),
        };
        let (col, row) = (self.col(x), self.row(y));
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(style::SetForegroundColor(color))?;
        for (i, line) in art.iter().enumerate() {
            self.put(col, row + i as i32, line)?;
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgb, style: RectStyle) -> io::Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let left = self.col(rect.x);
        let top = self.row(rect.y);
        let right = self.col(rect.right()).max(left + 1);
        let bottom = self.row(rect.bottom()).max(top + 1);

        match style {
            RectStyle::Filled => {
                self.out.queue(style::SetBackgroundColor(to_color(color)))?;
                let span = " ".repeat((right - left) as usize);
                for row in top..bottom {
                    self.put(left, row, &span)?;
                }
            }
            // Too thin for a box: bracket the span from outside instead.
            RectStyle::Outline if bottom - top < 3 => {
                self.out.queue(style::SetBackgroundColor(self.background))?;
                self.out.queue(style::SetForegroundColor(to_color(color)))?;
                for row in top..bottom {
                    self.put_cell(left - 1, row, '[')?;
                    self.put_cell(right, row, ']')?;
                }
            }
            RectStyle::Outline => {
                self.out.queue(style::SetBackgroundColor(self.background))?;
                self.out.queue(style::SetForegroundColor(to_color(color)))?;
                let inner = "─".repeat((right - left - 2).max(0) as usize);
                self.put(left, top, &format!("┌{}┐", inner))?;
                self.put(left, bottom - 1, &format!("└{}┘", inner))?;
                for row in top + 1..bottom - 1 {
                    self.put_cell(left, row, '│')?;
                    self.put_cell(right - 1, row, '│')?;
                }
            }
        }
        Ok(())
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) -> io::Result<()> {
        let (c0, r0) = (self.col(from.0), self.row(from.1));
        let (c1, r1) = (self.col(to.0), self.row(to.1));
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;

        let steps = (c1 - c0).abs().max((r1 - r0).abs());
        let glyph = if r0 == r1 { '─' } else if c0 == c1 { '│' } else { '·' };
        for i in 0..=steps {
            let (col, row) = if steps == 0 {
                (c0, r0)
            } else {
                (c0 + (c1 - c0) * i / steps, r0 + (r1 - r0) * i / steps)
            };
            self.put_cell(col, row, glyph)?;
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        pos: (i32, i32),
        color: Rgb,
        size: TextSize,
        anchor: Anchor,
    ) -> io::Result<()> {
        let text = match size {
            TextSize::Small => text.to_string(),
            TextSize::Large => text.chars().map(String::from).collect::<Vec<_>>().join(" "),
        };
        let len = text.chars().count() as i32;
        let (col, row) = (self.col(pos.0), self.row(pos.1));
        let col = match anchor {
            Anchor::TopLeft => col,
            Anchor::TopRight => col - len,
            Anchor::Center => col - len / 2,
        };

        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        if size == TextSize::Large {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.put(col, row, &text)?;
        if size == TextSize::Large {
            self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }

    fn tick(&mut self, target_fps: u32) -> u64 {
        let frame = Duration::from_secs(1) / target_fps.max(1);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        let total = self.last_tick.elapsed();
        self.last_tick = Instant::now();
        total.as_millis() as u64
    }
}
