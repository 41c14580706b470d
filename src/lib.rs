//! Escape Run - an endless-runner arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, game state)
//! - `clock`: Fixed-timestep stepper and frame scheduling
//! - `game`: Session driving the simulation from frame callbacks and input
//! - `hud`: Read-only snapshots for the render/HUD collaborator
//! - `settings`: Quality presets and data-driven balance

pub mod clock;
pub mod error;
pub mod game;
pub mod hud;
pub mod settings;
pub mod sim;

pub use clock::{FixedStepper, FrameScheduler, ManualScheduler};
pub use error::ConfigError;
pub use game::Game;
pub use hud::{FrameSink, HudStats, ObstacleView, Overlay, Snapshot};
pub use settings::{QualityPreset, Settings};

/// World geometry constants
pub mod consts {
    /// Fixed simulation tick length in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Logical world dimensions
    pub const WORLD_WIDTH: f32 = 900.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    /// Y coordinate of the running surface (y grows downward)
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 60.0;

    /// Player defaults - x never changes, y tracks the feet
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 52.0;
    pub const PLAYER_SLIDE_HEIGHT: f32 = 26.0;
    /// Extra reach of the slide pose when grabbing coins
    pub const SLIDE_PICKUP_REACH: f32 = 10.0;
    /// Ticks per run-animation frame
    pub const RUN_FRAME_TICKS: u32 = 3;
    pub const MAX_LIVES: u8 = 3;

    /// Obstacles enter just past the right edge
    pub const SPAWN_X: f32 = WORLD_WIDTH + 20.0;
    pub const SPIKE_WIDTH: f32 = 35.0;
    pub const SPIKE_HEIGHT: f32 = 30.0;
    pub const BARRIER_HEIGHT: f32 = 22.0;
    /// Gap between a standing player's head and the barrier top
    pub const BARRIER_CLEARANCE: f32 = 20.0;

    pub const COIN_SIZE: f32 = 10.0;

    /// Cull lines past the left edge
    pub const OBSTACLE_CULL_X: f32 = -50.0;
    pub const COIN_CULL_X: f32 = -30.0;
}
