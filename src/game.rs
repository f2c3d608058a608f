//! Session state machine and the frame loop.
//!
//! A [`Session`] owns the config and world; [`run`] drives it once per frame
//! against the collaborator ports until a quit event arrives.

use std::io;

use log::{debug, info};
use rand::Rng;

use crate::clock::Clock;
use crate::combat;
use crate::config::GameConfig;
use crate::entities::{GameStatus, GameWorld};
use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::player::{self, ShotOutcome};
use crate::ports::{
    Anchor, AudioCue, HeldKey, InputEvent, InputSource, RectStyle, Renderer, Rgb, Sprite,
    TextSize,
};

/// Width of the health bar at full scale, in playfield units.
const HEALTH_BAR_WIDTH: i32 = 200;
const HEALTH_BAR_HEIGHT: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Quit,
}

/// Counters collected over a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub paused_frames: u64,
    pub waves: u32,
    pub shots: u32,
    pub score: u32,
}

/// Held-key snapshot plus the edges that arrived this frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub up: bool,
    pub down: bool,
}

impl FrameInput {
    pub fn sample(input: &mut impl InputSource) -> Self {
        FrameInput {
            events: input.poll(),
            up: input.is_held(HeldKey::Up),
            down: input.is_held(HeldKey::Down),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub world: GameWorld,
    pub summary: RunSummary,
}

impl Session {
    /// Validate `config` and spawn the opening wave.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = GameWorld::new(&config);
        combat::respawn_if_clear(&mut world, &config, rng);
        Ok(Session {
            config,
            world,
            summary: RunSummary {
                waves: 1,
                ..RunSummary::default()
            },
        })
    }

    /// Advance one frame at clock reading `now`.
    ///
    /// Events are applied first, in order.  A quit stops the frame before any
    /// simulation; while paused nothing else moves, reload timers included.
    pub fn step(
        &mut self,
        input: &FrameInput,
        now: u64,
        rng: &mut impl Rng,
        audio: &mut dyn AudioCue,
    ) -> FrameControl {
        for &event in &input.events {
            if self.handle_event(event, now, audio) == FrameControl::Quit {
                return FrameControl::Quit;
            }
        }

        if self.world.is_paused() {
            self.summary.paused_frames += 1;
            return FrameControl::Continue;
        }

        player::move_player(&mut self.world, &self.config, input.up, input.down);
        let report = combat::resolve(&mut self.world, &self.config, rng);
        if report.wave_spawned {
            self.summary.waves += 1;
        }
        player::update_reload(&mut self.world, &self.config, now);

        self.summary.frames += 1;
        self.summary.score = self.world.score;
        FrameControl::Continue
    }

    fn handle_event(&mut self, event: InputEvent, now: u64, audio: &mut dyn AudioCue) -> FrameControl {
        let paused = self.world.is_paused();
        match event {
            InputEvent::Quit => return FrameControl::Quit,
            InputEvent::Pause => self.toggle_pause(now),
            InputEvent::Reload if !paused => {
                player::request_reload(&mut self.world, &self.config, now, audio);
            }
            InputEvent::FirePressed if !paused => {
                let outcome = player::press_fire(&mut self.world, &self.config, now, audio);
                if outcome == ShotOutcome::Fired {
                    self.summary.shots += 1;
                }
            }
            InputEvent::FireReleased => player::release_fire(&mut self.world),
            InputEvent::Reload | InputEvent::FirePressed => {}
        }
        FrameControl::Continue
    }

    /// Enter or leave the paused state.  Weapon timers do not run while
    /// paused: on resume they are shifted by the time spent paused.
    pub fn toggle_pause(&mut self, now: u64) {
        self.world.status = match self.world.status {
            GameStatus::Running => GameStatus::Paused { since: now },
            GameStatus::Paused { since } => {
                self.world.weapon.shift_timers(now.saturating_sub(since));
                GameStatus::Running
            }
        };
        debug!("game {:?} at {}ms", self.world.status, now);
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Draw the current state and present it.
    pub fn render(&self, out: &mut impl Renderer) -> io::Result<()> {
        if self.world.is_paused() {
            self.render_paused(out)?;
        } else {
            self.render_running(out)?;
        }
        out.present()
    }

    fn render_paused(&self, out: &mut impl Renderer) -> io::Result<()> {
        let cfg = &self.config;
        out.fill(Rgb::FIELD)?;
        out.draw_text(
            "PAUSED",
            (cfg.width / 2, cfg.height / 2),
            Rgb::RED,
            TextSize::Large,
            Anchor::Center,
        )
    }

    fn render_running(&self, out: &mut impl Renderer) -> io::Result<()> {
        let cfg = &self.config;
        let world = &self.world;

        out.fill(Rgb::FIELD)?;
        out.draw_line((0, cfg.hud_line_y), (cfg.width, cfg.hud_line_y), Rgb::HORIZON)?;

        out.draw_sprite(Sprite::Player, world.player.x, world.player.y)?;
        for enemy in &world.enemies {
            out.draw_sprite(Sprite::Enemy, enemy.x, enemy.y)?;
        }
        for bullet in &world.bullets {
            out.draw_sprite(Sprite::Bullet, bullet.x, bullet.y)?;
        }

        // Health bar
        let frame = Rect::new(5, 5, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
        out.draw_rect(frame, Rgb::RED, RectStyle::Filled)?;
        out.draw_rect(
            Rect::new(5, 5, health_bar_width(world.player.health), HEALTH_BAR_HEIGHT),
            Rgb::GREEN,
            RectStyle::Filled,
        )?;
        out.draw_rect(frame, Rgb::BLACK, RectStyle::Outline)?;

        // Text HUD
        let ammo = format!("Ammo: {}", world.weapon.ammo);
        out.draw_text(&ammo, (300, 5), Rgb::WHITE, TextSize::Small, Anchor::TopLeft)?;
        if world.weapon.is_reloading() {
            out.draw_text("Reloading...", (420, 5), Rgb::WHITE, TextSize::Small, Anchor::TopLeft)?;
        }
        let score = format!("Score: {}", world.score);
        out.draw_text(&score, (cfg.width - 10, 5), Rgb::WHITE, TextSize::Small, Anchor::TopRight)
    }
}

/// Green portion of the health bar: two units per point, clamped to the bar.
pub fn health_bar_width(health: i32) -> i32 {
    (health * 2).clamp(0, HEALTH_BAR_WIDTH)
}

// ── Frame loop ───────────────────────────────────────────────────────────────

/// Drive `session` until a quit event.  Every frame is rendered and paced
/// through `renderer.tick`, paused or not.
pub fn run<R, I, A, C, G>(
    session: &mut Session,
    renderer: &mut R,
    input: &mut I,
    audio: &mut A,
    clock: &C,
    rng: &mut G,
) -> io::Result<RunSummary>
where
    R: Renderer,
    I: InputSource,
    A: AudioCue,
    C: Clock,
    G: Rng,
{
    info!(
        "session started: {}x{} @ {} fps, {} enemies in the first wave",
        session.config.width,
        session.config.height,
        session.config.fps,
        session.world.enemies.len()
    );

    loop {
        let now = clock.now_ms();
        let frame_input = FrameInput::sample(input);
        if session.step(&frame_input, now, rng, audio) == FrameControl::Quit {
            break;
        }
        session.render(renderer)?;
        renderer.tick(session.config.fps);
    }

    let summary = session.summary.clone();
    info!(
        "session ended: score {}, {} waves, {} shots over {} frames ({} paused)",
        summary.score, summary.waves, summary.shots, summary.frames, summary.paused_frames
    );
    Ok(summary)
}
