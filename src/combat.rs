//! Per-frame enemy, bullet and collision resolution.
//!
//! Everything here mutates a [`GameWorld`] in place and is total: the only
//! randomness is the injected RNG handed to the wave spawner.

use log::trace;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::GameWorld;
use crate::spawner::spawn_wave;

/// What happened during one [`resolve`] pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Bullets that struck an enemy.
    pub hits: u32,
    /// Enemies destroyed by bullets (each one is a point).
    pub kills: u32,
    /// Enemies that walked off the left edge.
    pub escaped: u32,
    /// Hits whose bullet also overlapped the player.
    pub friendly_fire: u32,
    pub wave_spawned: bool,
}

/// Run one combat step: enemies advance, bullets resolve against enemies,
/// bullets fly, and a new wave arrives if the field is clear.
pub fn resolve(world: &mut GameWorld, config: &GameConfig, rng: &mut impl Rng) -> CombatReport {
    let mut report = CombatReport {
        escaped: advance_enemies(world, config),
        ..CombatReport::default()
    };
    resolve_bullet_hits(world, config, &mut report);
    advance_bullets(world, config);
    report.wave_spawned = respawn_if_clear(world, config, rng);
    report
}

// ── 1. Enemy advance / vision ────────────────────────────────────────────────

/// Move every enemy whose vision strip does *not* contain the player, then
/// drop enemies fully past the left edge.  Returns how many were dropped.
///
/// An enemy halts only while the player stands inside its vision strip.
pub fn advance_enemies(world: &mut GameWorld, config: &GameConfig) -> u32 {
    let player_box = world.player.hitbox(config.player_size);
    let before = world.enemies.len();

    world.enemies.retain_mut(|enemy| {
        let vision = enemy.vision(config.vision_length, config.enemy_size);
        if !vision.intersects(&player_box) {
            enemy.x -= enemy.speed;
        }
        enemy.x >= config.despawn_x
    });

    (before - world.enemies.len()) as u32
}

// ── 2. Bullet ↔ enemy ────────────────────────────────────────────────────────

/// Match bullets against enemies, last enemy first.  Each enemy consumes at
/// most one bullet per frame: the earliest-fired bullet overlapping it.
///
/// A consumed bullet that also overlaps the player damages the player too.
pub fn resolve_bullet_hits(world: &mut GameWorld, config: &GameConfig, report: &mut CombatReport) {
    let player_box = world.player.hitbox(config.player_size);

    for i in (0..world.enemies.len()).rev() {
        let enemy_box = world.enemies[i].hitbox(config.enemy_size);
        let Some(bi) = world
            .bullets
            .iter()
            .position(|b| b.hitbox(config.bullet_size).intersects(&enemy_box))
        else {
            continue;
        };

        let bullet = world.bullets.remove(bi);
        report.hits += 1;

        let enemy = &mut world.enemies[i];
        enemy.health -= 1;
        trace!("bullet hit enemy {} at ({}, {}), health now {}", i, enemy.x, enemy.y, enemy.health);
        if enemy.health <= 0 {
            world.enemies.remove(i);
            world.score += 1;
            report.kills += 1;
        }

        if bullet.hitbox(config.bullet_size).intersects(&player_box) {
            world.player.health -= config.friendly_fire_damage;
            report.friendly_fire += 1;
            trace!("bullet also struck the player, health now {}", world.player.health);
        }
    }
}

// ── Bullet flight ────────────────────────────────────────────────────────────

/// Discard bullets already at or past the right edge, then move the rest.
pub fn advance_bullets(world: &mut GameWorld, config: &GameConfig) {
    world.bullets.retain(|b| b.x < config.width);
    for bullet in &mut world.bullets {
        bullet.x += config.bullet_speed;
    }
}

// ── 3. Wave respawn ──────────────────────────────────────────────────────────

/// Spawn a new wave when no enemies remain.  Returns whether one was spawned.
pub fn respawn_if_clear(world: &mut GameWorld, config: &GameConfig, rng: &mut impl Rng) -> bool {
    if !world.enemies.is_empty() {
        return false;
    }
    world.enemies = spawn_wave(&world.enemies, config, rng);
    true
}
