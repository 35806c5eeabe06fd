//! Asteroid Runner - endless-runner asteroid field simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle pool, spawning, difficulty, collisions)
//! - `config`: Data-driven run tuning loaded from JSON
//! - `renderer`: GPU-ready instance export for the host renderer
//! - `scores`: In-session leaderboard of finished runs

pub mod config;
pub mod error;
pub mod renderer;
pub mod scores;
pub mod sim;

pub use config::RunnerConfig;
pub use error::ConfigError;
pub use scores::SessionScores;
pub use sim::{Run, RunPhase, TickOutcome};

use glam::Vec3;

/// Simulation constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep used by the frame driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the driver will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Where obstacles wait before their first recycle (far behind the player)
    pub const PARKED_POSITION: Vec3 = Vec3::new(0.0, 0.0, -10_000.0);
}

/// Sanitize a frame delta: negative, zero or NaN become 0.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}
