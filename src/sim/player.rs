//! Player ship
//!
//! The ship only drifts on x/y. Forward travel is implicit: the world scrolls
//! toward it. Steering is applied by collaborators (input, autopilot); the
//! run controller only reads the position.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Clamp a raw command into the unit square and unit disc.
///
/// Non-finite components are treated as no input.
pub fn clamp_command(command: Vec2) -> Vec2 {
    if !command.is_finite() {
        return Vec2::ZERO;
    }
    command.clamp(Vec2::NEG_ONE, Vec2::ONE).clamp_length_max(1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Collision sphere radius
    pub radius: f32,
    /// Host has the ship ready; an unloaded ship never collides
    pub loaded: bool,
}

impl Player {
    pub fn new(radius: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            radius,
            loaded: true,
        }
    }

    /// Position used for spawn queries: origin until the ship is loaded
    #[inline]
    pub fn effective_position(&self) -> Vec3 {
        if self.loaded { self.position } else { Vec3::ZERO }
    }

    /// Apply a command vector to x/y, clamped to `limits` (half-extents)
    pub fn steer(&mut self, command: Vec2, speed: f32, dt: f32, limits: Vec2) {
        let dt = crate::sanitize_dt(dt);
        let step = clamp_command(command) * speed * dt;
        let xy = (self.position.truncate() + step).clamp(-limits, limits);
        self.position = xy.extend(self.position.z);
    }
}
