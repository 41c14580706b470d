//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod entities;
pub mod geometry;
pub mod parallax;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::CollisionReport;
pub use effects::{Particle, ParticleColor, ParticlePool};
pub use entities::{Coin, Obstacle, ObstacleShape};
pub use geometry::Rect;
pub use parallax::{Backdrop, GroundMark, Mountain, Star};
pub use player::{Player, Stance};
pub use spawner::Spawner;
pub use state::{GamePhase, World};
pub use tick::{TickInput, TickReport, demo_input, tick};
pub use tuning::Tuning;
