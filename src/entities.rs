//! All game entity types — plain data plus geometry accessors, no rules.

use crate::config::GameConfig;
use crate::geometry::Rect;

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Paused at the given clock reading (ms).
    Paused { since: u64 },
}

/// Reload state machine of the player's weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponState {
    Idle,
    /// Reload began at the given clock reading (ms).
    Reloading { since: u64 },
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Not floored at zero: friendly fire may push it negative.
    pub health: i32,
}

impl Player {
    pub fn hitbox(&self, size: i32) -> Rect {
        Rect::new(self.x, self.y, size, size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Units moved left per frame.
    pub speed: i32,
    pub health: i32,
}

impl Enemy {
    /// New enemy whose toughness follows from its speed tier.
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Enemy {
            x,
            y,
            speed,
            health: health_for_speed(speed),
        }
    }

    pub fn hitbox(&self, size: i32) -> Rect {
        Rect::new(self.x, self.y, size, size)
    }

    /// Strip of `length` units directly to the enemy's left, at its own height.
    pub fn vision(&self, length: i32, size: i32) -> Rect {
        Rect::new(self.x - length, self.y, length, size)
    }
}

/// Fast enemies are fragile, slow ones are tough.
pub fn health_for_speed(speed: i32) -> i32 {
    match speed {
        s if s >= 6 => 1,
        4 | 5 => 2,
        _ => 3,
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    pub fn hitbox(&self, (w, h): (i32, i32)) -> Rect {
        Rect::new(self.x, self.y, w, h)
    }
}

// ── Weapon ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub ammo: u32,
    pub state: WeaponState,
    /// Clock reading of the last accepted shot, `None` before the first.
    pub last_shot: Option<u64>,
}

impl Weapon {
    pub fn full(max_ammo: u32) -> Self {
        Weapon {
            ammo: max_ammo,
            state: WeaponState::Idle,
            last_shot: None,
        }
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.state, WeaponState::Reloading { .. })
    }

    /// Push every timer forward by `ms`, as if that time never passed.
    pub fn shift_timers(&mut self, ms: u64) {
        if let WeaponState::Reloading { since } = &mut self.state {
            *since += ms;
        }
        if let Some(last) = &mut self.last_shot {
            *last += ms;
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything the simulation mutates from frame to frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameWorld {
    pub player: Player,
    /// Order-preserving; each record carries all per-enemy attributes.
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub weapon: Weapon,
    pub score: u32,
    pub status: GameStatus,
    /// Set on fire press, cleared on release; holding fire never re-fires.
    pub fire_latched: bool,
}

impl GameWorld {
    /// Fresh world with no enemies yet; the first wave is spawned by the
    /// session on creation.
    pub fn new(config: &GameConfig) -> Self {
        GameWorld {
            player: Player {
                x: config.player_start.0,
                y: config.player_start.1,
                health: config.player_health,
            },
            enemies: Vec::new(),
            bullets: Vec::new(),
            weapon: Weapon::full(config.max_ammo),
            score: 0,
            status: GameStatus::Running,
            fire_latched: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.status, GameStatus::Paused { .. })
    }
}
