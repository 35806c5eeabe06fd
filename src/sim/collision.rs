//! Player vs obstacle collision
//!
//! Sum-of-radii sphere test. No response, just detection: the first overlap
//! ends the run.

use glam::Vec3;

use super::pool::Obstacle;

/// True if two spheres overlap (touching does not count)
#[inline]
pub fn spheres_overlap(a: Vec3, a_radius: f32, b: Vec3, b_radius: f32) -> bool {
    crate::distance(a, b) < a_radius + b_radius
}

/// Index of the first loaded obstacle overlapping the player, if any
pub fn first_collision(player_pos: Vec3, player_radius: f32, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| o.loaded && spheres_overlap(player_pos, player_radius, o.position, o.radius))
}

/// Check whether the player hits any loaded obstacle
pub fn check_collision(player_pos: Vec3, player_radius: f32, obstacles: &[Obstacle]) -> bool {
    first_collision(player_pos, player_radius, obstacles).is_some()
}
