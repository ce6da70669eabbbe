use std::env;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_MIN_SPAWN: u32 = 2;
pub const DEFAULT_MAX_SPAWN: u32 = 5;
pub const DEFAULT_SPAWN_RETRIES: u32 = 20;

/// Spawn-kind buckets, in percent.  Light takes whatever is left.
pub const HEAVY_SPAWN_PERCENT: u32 = 10;
pub const MEDIUM_SPAWN_PERCENT: u32 = 30;

/// Chance an enemy blocked in its desired direction backs off the other way.
pub const OPPOSITE_MOVE_CHANCE: f64 = 0.7;
/// Chance a live enemy tries to fire on a logic tick (cooldown still applies).
pub const ENEMY_FIRE_CHANCE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub fps: u32,
    pub min_spawn: u32,
    pub max_spawn: u32,
    pub spawn_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            min_spawn: DEFAULT_MIN_SPAWN,
            max_spawn: DEFAULT_MAX_SPAWN,
            spawn_retries: DEFAULT_SPAWN_RETRIES,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        let mut min_spawn = read_env_u32("SPACE_INVADER_MIN_SPAWN", DEFAULT_MIN_SPAWN);
        let mut max_spawn = read_env_u32("SPACE_INVADER_MAX_SPAWN", DEFAULT_MAX_SPAWN);

        if min_spawn > max_spawn {
            tracing::warn!(
                "SPACE_INVADER_MIN_SPAWN ({}) > SPACE_INVADER_MAX_SPAWN ({}). Falling back to defaults.",
                min_spawn,
                max_spawn
            );
            min_spawn = DEFAULT_MIN_SPAWN;
            max_spawn = DEFAULT_MAX_SPAWN;
        }

        Self {
            fps: read_env_u32("SPACE_INVADER_FPS", DEFAULT_FPS).max(1),
            min_spawn,
            max_spawn,
            spawn_retries: read_env_u32("SPACE_INVADER_SPAWN_RETRIES", DEFAULT_SPAWN_RETRIES),
        }
    }
}

pub(crate) fn read_env_u32(key: &str, default: u32) -> u32 {
    match env::var(key) {
        Ok(value) => match value.parse::<u32>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Invalid {}='{}'. Using default {}.", key, value, default);
                default
            }
        },
        Err(_) => default,
    }
}
