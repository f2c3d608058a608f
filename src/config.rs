//! Tunables for a session.  Defaults reproduce the classic 800×600 layout.

use crate::error::ConfigError;

/// Every number the simulation reads.  Times are milliseconds, distances are
/// playfield units, velocities are units per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,

    // ── Player ──
    pub player_start: (i32, i32),
    pub player_speed: i32,
    pub player_health: i32,
    pub player_size: i32,
    /// Highest point (smallest y) the player may reach.
    pub player_top: i32,

    // ── Weapon ──
    pub max_ammo: u32,
    pub shot_cooldown_ms: u64,
    pub reload_ms: u64,
    /// Bullet spawn point relative to the player's origin.
    pub muzzle_offset: (i32, i32),
    pub bullet_size: (i32, i32),
    pub bullet_speed: i32,
    pub friendly_fire_damage: i32,

    // ── Enemies / waves ──
    pub enemy_size: i32,
    pub wave_size: (u32, u32),
    pub enemy_speed: (i32, i32),
    /// Vertical spawn band is `[spawn_top, height - spawn_bottom_margin]`.
    pub spawn_top: i32,
    pub spawn_bottom_margin: i32,
    pub spawn_spacing: i32,
    pub spawn_attempts: u32,
    pub spawn_stagger: i32,
    pub vision_length: i32,
    pub despawn_x: i32,

    // ── HUD ──
    pub hud_line_y: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 600,
            fps: 60,

            player_start: (50, 150),
            player_speed: 10,
            player_health: 200,
            player_size: 120,
            player_top: 30,

            max_ammo: 10,
            shot_cooldown_ms: 250,
            reload_ms: 1000,
            muzzle_offset: (80, -10),
            bullet_size: (20, 10),
            bullet_speed: 20,
            friendly_fire_damage: 10,

            enemy_size: 120,
            wave_size: (3, 5),
            enemy_speed: (3, 7),
            spawn_top: 50,
            spawn_bottom_margin: 150,
            spawn_spacing: 180,
            spawn_attempts: 20,
            spawn_stagger: 150,
            vision_length: 800,
            despawn_x: -120,

            hud_line_y: 40,
        }
    }
}

impl GameConfig {
    /// Same tunables on a differently sized playfield.
    pub fn with_screen(width: i32, height: i32) -> Self {
        GameConfig {
            width,
            height,
            ..GameConfig::default()
        }
    }

    /// Lowest point (largest y) the player may reach.
    pub fn player_bottom(&self) -> i32 {
        self.height - self.player_size
    }

    /// Inclusive vertical band enemies are spawned in.
    pub fn spawn_band(&self) -> (i32, i32) {
        (self.spawn_top, self.height - self.spawn_bottom_margin)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.max_ammo == 0 {
            return Err(ConfigError::ZeroAmmo);
        }

        let min_height = (self.spawn_top + self.spawn_bottom_margin)
            .max(self.player_top + self.player_size);
        let min_width = self.player_start.0 + self.player_size;
        if self.width < min_width || self.height < min_height {
            return Err(ConfigError::ScreenTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }

        let (lo, hi) = self.wave_size;
        if lo == 0 || lo > hi {
            return Err(ConfigError::EmptyRange {
                what: "wave size",
                lo: lo as i32,
                hi: hi as i32,
            });
        }
        if self.far_edges().is_none() {
            return Err(ConfigError::ScreenTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        let (lo, hi) = self.enemy_speed;
        if lo <= 0 || lo > hi {
            return Err(ConfigError::EmptyRange { what: "enemy speed", lo, hi });
        }
        Ok(())
    }

    /// Largest x and y any entity edge can reach: the right edge of the last
    /// enemy in a full wave, a bullet one step past the screen, and the
    /// bottom of the lowest hitbox.  `None` if any of them overflows.
    fn far_edges(&self) -> Option<(i32, i32)> {
        let last = i32::try_from(self.wave_size.1.checked_sub(1)?).ok()?;
        let wave_edge = self
            .width
            .checked_add(last.checked_mul(self.spawn_stagger)?)?
            .checked_add(self.enemy_size)?;
        let bullet_edge = self
            .width
            .checked_add(self.bullet_speed)?
            .checked_add(self.bullet_size.0)?;
        let bottom = self
            .height
            .checked_add(self.player_size.max(self.enemy_size))?;
        Some((wave_edge.max(bullet_edge), bottom))
    }
}
