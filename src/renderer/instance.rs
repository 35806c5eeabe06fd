//! Per-obstacle instance data

use bytemuck::{Pod, Zeroable};

use crate::sim::{Obstacle, Run};

/// One instanced asteroid: world position and uniform scale
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObstacleInstance {
    pub position: [f32; 3],
    pub radius: f32,
}

impl ObstacleInstance {
    pub fn from_obstacle(obstacle: &Obstacle) -> Self {
        Self {
            position: obstacle.position.to_array(),
            radius: obstacle.radius,
        }
    }
}

/// Instances for every loaded obstacle, in slot order
pub fn build_instances(run: &Run) -> Vec<ObstacleInstance> {
    run.obstacles()
        .iter()
        .filter(|o| o.loaded)
        .map(ObstacleInstance::from_obstacle)
        .collect()
}

/// Raw bytes for a buffer upload
pub fn as_bytes(instances: &[ObstacleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Debug counters as a compact JSON line for the host overlay
pub fn debug_overlay_json(run: &Run) -> String {
    serde_json::to_string(&run.debug_snapshot()).unwrap_or_default()
}
