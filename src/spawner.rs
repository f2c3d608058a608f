//! Wave generation.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Build a fresh batch of enemies off the right edge of the screen.
///
/// Each enemy's vertical position is redrawn while it sits within
/// `spawn_spacing` of an enemy in `existing` or one already placed by this
/// call, up to `spawn_attempts` redraws; after that the overlapping position
/// is kept.  Entry is staggered by `spawn_stagger` per index so the wave
/// arrives in single file.
pub fn spawn_wave(existing: &[Enemy], config: &GameConfig, rng: &mut impl Rng) -> Vec<Enemy> {
    let (min_count, max_count) = config.wave_size;
    let count = rng.gen_range(min_count..=max_count);
    let (top, bottom) = config.spawn_band();
    let (slow, fast) = config.enemy_speed;

    let mut wave: Vec<Enemy> = Vec::with_capacity(count as usize);
    for i in 0..count {
        let crowded = |y: i32, wave: &[Enemy]| {
            existing
                .iter()
                .chain(wave.iter())
                .any(|e| (y - e.y).abs() < config.spawn_spacing)
        };

        let mut y = rng.gen_range(top..=bottom);
        let mut attempts = 0;
        while crowded(y, &wave) && attempts < config.spawn_attempts {
            y = rng.gen_range(top..=bottom);
            attempts += 1;
        }

        let x = config.width + i as i32 * config.spawn_stagger;
        let speed = rng.gen_range(slow..=fast);
        wave.push(Enemy::new(x, y, speed));
    }

    debug!(
        "spawned wave of {}: speeds {:?}",
        wave.len(),
        wave.iter().map(|e| e.speed).collect::<Vec<_>>()
    );
    wave
}
