//! Obstacles and coins
//!
//! Entities have no identity beyond their slot in the world's pools.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Obstacle variants, each carrying only the geometry it needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleShape {
    /// Wooden crate resting on the ground
    Crate { width: f32, height: f32 },
    /// Fixed-size row of spikes on the ground
    Spike,
    /// Overhead beam on pillars; slide under it
    Barrier { width: f32 },
}

impl ObstacleShape {
    pub fn width(&self) -> f32 {
        match *self {
            ObstacleShape::Crate { width, .. } => width,
            ObstacleShape::Spike => SPIKE_WIDTH,
            ObstacleShape::Barrier { width } => width,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            ObstacleShape::Crate { height, .. } => height,
            ObstacleShape::Spike => SPIKE_HEIGHT,
            ObstacleShape::Barrier { .. } => BARRIER_HEIGHT,
        }
    }

    /// Top edge of the solid part
    pub fn top(&self) -> f32 {
        match self {
            ObstacleShape::Barrier { .. } => GROUND_Y - PLAYER_HEIGHT - BARRIER_CLEARANCE,
            _ => GROUND_Y - self.height(),
        }
    }

    pub fn is_overhead(&self) -> bool {
        matches!(self, ObstacleShape::Barrier { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub shape: ObstacleShape,
    /// Already scored or collided with
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, shape: ObstacleShape) -> Self {
        Self {
            x,
            shape,
            passed: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.shape.width()
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.shape.width()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.shape.top(), self.shape.width(), self.shape.height())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Centre
    pub pos: Vec2,
    /// Radius
    pub size: f32,
    pub collected: bool,
    /// Phase offset of the idle bob (cosmetic)
    pub bob_offset: f32,
}

impl Coin {
    pub fn new(pos: Vec2, bob_offset: f32) -> Self {
        Self {
            pos,
            size: COIN_SIZE,
            collected: false,
            bob_offset,
        }
    }
}
