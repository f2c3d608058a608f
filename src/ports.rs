//! Collaborator interfaces the core drives once per frame.  Implementations
//! own every bit of I/O: the terminal adapters live in the binary and tests
//! use scripted fakes.

use std::io;

use crate::geometry::Rect;

// ── Renderer ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    /// Playfield background.
    pub const FIELD: Rgb = Rgb(0, 150, 0);
    /// Horizon line under the HUD.
    pub const HORIZON: Rgb = Rgb(200, 0, 0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Enemy,
    Bullet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectStyle {
    Filled,
    /// Border only.
    Outline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

/// Which point of the text `(x, y)` refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    Center,
}

/// Draw surface in playfield coordinates.
pub trait Renderer {
    fn fill(&mut self, color: Rgb) -> io::Result<()>;
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) -> io::Result<()>;
    fn draw_rect(&mut self, rect: Rect, color: Rgb, style: RectStyle) -> io::Result<()>;
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) -> io::Result<()>;
    fn draw_text(
        &mut self,
        text: &str,
        pos: (i32, i32),
        color: Rgb,
        size: TextSize,
        anchor: Anchor,
    ) -> io::Result<()>;
    /// Make the frame visible.
    fn present(&mut self) -> io::Result<()>;
    /// Wait out the remainder of the frame at `target_fps` and return the
    /// milliseconds elapsed since the previous call.
    fn tick(&mut self, target_fps: u32) -> u64;
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Keys whose held state is sampled every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Up,
    Down,
}

/// Discrete key edges, delivered in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    FirePressed,
    FireReleased,
    Reload,
    Pause,
    Quit,
}

pub trait InputSource {
    /// Drain every event that arrived since the previous poll.
    fn poll(&mut self) -> Vec<InputEvent>;
    fn is_held(&self, key: HeldKey) -> bool;
}

// ── Audio ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Gunshot,
    Reload,
}

/// Fire-and-forget sound playback.
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}
