//! Render export
//!
//! The host renderer owns meshes, cameras and text. This module only turns
//! simulation state into plain GPU-ready data it can upload as-is.

pub mod instance;

pub use instance::{ObstacleInstance, as_bytes, build_instances, debug_overlay_json};
