//! Deterministic simulation module
//!
//! Everything that decides where obstacles are, when they appear and when a
//! run ends lives here:
//! - Seeded RNG only (one `Pcg32` per run)
//! - Frame-rate independent integration
//! - No rendering, input capture or asset loading

pub mod collision;
pub mod difficulty;
pub mod dust;
pub mod player;
pub mod pool;
pub mod scheduler;
pub mod spawn_region;
pub mod state;
pub mod tick;

pub use collision::{check_collision, first_collision, spheres_overlap};
pub use difficulty::{Difficulty, RampedRate};
pub use dust::DustField;
pub use player::{Player, clamp_command};
pub use pool::{Obstacle, ObstaclePool};
pub use scheduler::SpawnScheduler;
pub use spawn_region::SpawnRegion;
pub use state::{DebugSnapshot, Run, RunPhase};
pub use tick::{TickOutcome, tick};
