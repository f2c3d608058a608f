//! Player movement, shooting and the reload state machine.
//!
//! Time is always an explicit clock reading in milliseconds so that the
//! cooldown and reload durations hold regardless of frame rate.

use log::debug;

use crate::config::GameConfig;
use crate::entities::{Bullet, GameWorld, WeaponState};
use crate::ports::{AudioCue, Cue};

/// Result of a trigger pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    Fired,
    /// Fire is still held from an earlier press.
    Latched,
    Reloading,
    Empty,
    CoolingDown,
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Apply held up/down keys.  Both may apply in the same frame; the player
/// never leaves `[player_top, height - player_size]`.
pub fn move_player(world: &mut GameWorld, config: &GameConfig, up: bool, down: bool) {
    let player = &mut world.player;
    if up {
        player.y = (player.y - config.player_speed).max(config.player_top);
    }
    if down {
        player.y = (player.y + config.player_speed).min(config.player_bottom());
    }
}

// ── Shooting ─────────────────────────────────────────────────────────────────

/// Fire key went down.  Only the first press after a release can shoot.
pub fn press_fire(
    world: &mut GameWorld,
    config: &GameConfig,
    now: u64,
    audio: &mut dyn AudioCue,
) -> ShotOutcome {
    if world.fire_latched {
        return ShotOutcome::Latched;
    }
    world.fire_latched = true;
    fire(world, config, now, audio)
}

pub fn release_fire(world: &mut GameWorld) {
    world.fire_latched = false;
}

/// Attempt one shot.  On success a bullet appears at the muzzle, one round
/// is spent, and an empty magazine starts a reload immediately.
pub fn fire(
    world: &mut GameWorld,
    config: &GameConfig,
    now: u64,
    audio: &mut dyn AudioCue,
) -> ShotOutcome {
    let weapon = &world.weapon;
    if weapon.is_reloading() {
        return ShotOutcome::Reloading;
    }
    if weapon.ammo == 0 {
        return ShotOutcome::Empty;
    }
    if let Some(last) = weapon.last_shot {
        if now.saturating_sub(last) < config.shot_cooldown_ms {
            return ShotOutcome::CoolingDown;
        }
    }

    let (dx, dy) = config.muzzle_offset;
    world.bullets.push(Bullet {
        x: world.player.x + dx,
        y: world.player.y + dy,
    });
    world.weapon.ammo -= 1;
    world.weapon.last_shot = Some(now);
    audio.play(Cue::Gunshot);

    if world.weapon.ammo == 0 {
        begin_reload(world, now, audio);
    }
    ShotOutcome::Fired
}

// ── Reload ───────────────────────────────────────────────────────────────────

/// Manual reload.  Ignored while already reloading or with a full magazine.
pub fn request_reload(
    world: &mut GameWorld,
    config: &GameConfig,
    now: u64,
    audio: &mut dyn AudioCue,
) -> bool {
    if world.weapon.is_reloading() || world.weapon.ammo >= config.max_ammo {
        return false;
    }
    begin_reload(world, now, audio);
    true
}

fn begin_reload(world: &mut GameWorld, now: u64, audio: &mut dyn AudioCue) {
    world.weapon.state = WeaponState::Reloading { since: now };
    audio.play(Cue::Reload);
    debug!("reload started at {}ms with {} rounds left", now, world.weapon.ammo);
}

/// Finish a reload once `reload_ms` has elapsed.  The magazine is refilled
/// in one step, never partially.  Returns whether a reload completed.
pub fn update_reload(world: &mut GameWorld, config: &GameConfig, now: u64) -> bool {
    match world.weapon.state {
        WeaponState::Reloading { since } if now.saturating_sub(since) >= config.reload_ms => {
            world.weapon.ammo = config.max_ammo;
            world.weapon.state = WeaponState::Idle;
            debug!("reload finished at {}ms", now);
            true
        }
        _ => false,
    }
}
