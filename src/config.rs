//! Run configuration
//!
//! Loaded once at startup (JSON), validated, then read-only for the life of
//! a run. Missing fields fall back to defaults so tuning files can be partial.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Obstacle pool tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Fixed pool size
    pub count: usize,
    /// Smallest obstacle radius
    pub min_size: f32,
    /// Largest obstacle radius
    pub max_size: f32,
    /// How far behind the player an obstacle must fall before reuse
    pub despawn_distance: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count: 120,
            min_size: 1.0,
            max_size: 3.5,
            despawn_distance: 10.0,
        }
    }
}

/// Spawn box dimensions, centered `forward_offset` ahead of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnBoxConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub forward_offset: f32,
}

impl Default for SpawnBoxConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 40.0,
            depth: 40.0,
            forward_offset: 150.0,
        }
    }
}

/// A rate that ramps from `initial` toward `max` at `acceleration` per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    pub initial: f32,
    pub max: f32,
    pub acceleration: f32,
}

impl RateConfig {
    pub const fn new(initial: f32, max: f32, acceleration: f32) -> Self {
        Self {
            initial,
            max,
            acceleration,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        ensure_finite(field, &[self.initial, self.max, self.acceleration])?;
        if self.initial < 0.0 {
            return Err(ConfigError::invalid(field, "initial must be >= 0"));
        }
        if self.initial > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("initial {} exceeds max {}", self.initial, self.max),
            ));
        }
        if self.acceleration < 0.0 {
            return Err(ConfigError::invalid(field, "acceleration must be >= 0"));
        }
        Ok(())
    }
}

/// Player collaborator tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision sphere radius
    pub collision_radius: f32,
    /// Units per second at full command deflection
    pub steer_speed: f32,
    /// Max |x| the ship may drift to
    pub lateral_limit: f32,
    /// Max |y| the ship may drift to
    pub vertical_limit: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            collision_radius: 1.5,
            steer_speed: 25.0,
            lateral_limit: 30.0,
            vertical_limit: 20.0,
        }
    }
}

/// Ambient particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    /// Number of motes (0 = disabled)
    pub count: usize,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self { count: 200 }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub obstacles: ObstacleConfig,
    pub spawn_box: SpawnBoxConfig,
    pub closing_speed: RateConfig,
    pub spawn_rate: RateConfig,
    pub player: PlayerConfig,
    pub dust: DustConfig,
    /// Disable to let the ship fly through everything (debug)
    pub collision_enabled: bool,
    /// Seed for the run RNG
    pub seed: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            obstacles: ObstacleConfig::default(),
            spawn_box: SpawnBoxConfig::default(),
            closing_speed: RateConfig::new(30.0, 120.0, 1.5),
            spawn_rate: RateConfig::new(8.0, 40.0, 0.4),
            player: PlayerConfig::default(),
            dust: DustConfig::default(),
            collision_enabled: true,
            seed: 0x5eed_a57e,
        }
    }
}

impl RunnerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded run config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let obstacles = &self.obstacles;
        if obstacles.count == 0 {
            return Err(ConfigError::invalid("obstacles.count", "pool must hold at least one obstacle"));
        }
        ensure_finite(
            "obstacles",
            &[obstacles.min_size, obstacles.max_size, obstacles.despawn_distance],
        )?;
        if obstacles.min_size <= 0.0 {
            return Err(ConfigError::invalid("obstacles.min_size", "must be > 0"));
        }
        if obstacles.min_size > obstacles.max_size {
            return Err(ConfigError::invalid(
                "obstacles.max_size",
                format!("{} is smaller than min_size {}", obstacles.max_size, obstacles.min_size),
            ));
        }
        if obstacles.despawn_distance < 0.0 {
            return Err(ConfigError::invalid("obstacles.despawn_distance", "must be >= 0"));
        }

        let b = &self.spawn_box;
        ensure_finite("spawn_box", &[b.width, b.height, b.depth, b.forward_offset])?;
        if b.width < 0.0 || b.height < 0.0 || b.depth < 0.0 {
            return Err(ConfigError::invalid("spawn_box", "dimensions must be >= 0"));
        }

        self.closing_speed.validate("closing_speed")?;
        self.spawn_rate.validate("spawn_rate")?;

        let p = &self.player;
        ensure_finite(
            "player",
            &[p.collision_radius, p.steer_speed, p.lateral_limit, p.vertical_limit],
        )?;
        if p.collision_radius <= 0.0 {
            return Err(ConfigError::invalid("player.collision_radius", "must be > 0"));
        }
        if p.steer_speed < 0.0 || p.lateral_limit < 0.0 || p.vertical_limit < 0.0 {
            return Err(ConfigError::invalid("player", "speed and limits must be >= 0"));
        }

        Ok(())
    }
}

fn ensure_finite(field: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "values must be finite"))
    }
}
