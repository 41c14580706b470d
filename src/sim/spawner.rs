//! Procedural obstacle and coin spawning
//!
//! The gap between spawns shrinks as the speed multiplier grows, down to a
//! floor. This is the game's difficulty ramp.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entities::{Coin, Obstacle, ObstacleShape};
use super::tuning::Tuning;
use crate::consts::*;

/// What a single spawn produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnOutcome {
    pub obstacle: bool,
    pub coin: bool,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Ticks until the next spawn (fractional intervals carry over as-is)
    countdown: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            countdown: tuning.first_spawn_ticks,
        }
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Count down one tick and spawn when due
    pub fn update(
        &mut self,
        rng: &mut Pcg32,
        tuning: &Tuning,
        speed_multiplier: f32,
        obstacles: &mut Vec<Obstacle>,
        coins: &mut Vec<Coin>,
    ) -> SpawnOutcome {
        self.countdown -= 1.0;
        if self.countdown > 0.0 {
            return SpawnOutcome::default();
        }

        let obstacle = Obstacle::new(SPAWN_X, pick_shape(rng, tuning));
        let coin = if rng.random::<f32>() < tuning.coin_chance {
            let coin = coin_near(rng, &obstacle);
            coins.push(coin);
            true
        } else {
            false
        };
        log::debug!("spawned {:?} (coin: {coin})", obstacle.shape);
        obstacles.push(obstacle);

        self.countdown = next_interval(rng, tuning, speed_multiplier);

        SpawnOutcome {
            obstacle: true,
            coin,
        }
    }
}

/// Draw the next spawn gap in ticks
pub fn next_interval(rng: &mut Pcg32, tuning: &Tuning, speed_multiplier: f32) -> f32 {
    let factor = tuning.spawn_interval_factor(speed_multiplier);
    let range = tuning.max_spawn_interval - tuning.min_spawn_interval;
    tuning.min_spawn_interval * factor + rng.random::<f32>() * range * factor
}

/// Weighted pick between crate, spike and barrier with randomised dimensions
pub fn pick_shape(rng: &mut Pcg32, tuning: &Tuning) -> ObstacleShape {
    let total = tuning.crate_weight + tuning.spike_weight + tuning.barrier_weight;
    let roll = rng.random::<f32>() * total;

    if roll < tuning.crate_weight {
        ObstacleShape::Crate {
            width: 28.0 + rng.random::<f32>() * 15.0,
            height: 30.0 + rng.random::<f32>() * 25.0,
        }
    } else if roll < tuning.crate_weight + tuning.spike_weight {
        ObstacleShape::Spike
    } else {
        ObstacleShape::Barrier {
            width: 70.0 + rng.random::<f32>() * 40.0,
        }
    }
}

/// Coin trailing the obstacle: on the ground under barriers, in the air otherwise
fn coin_near(rng: &mut Pcg32, obstacle: &Obstacle) -> Coin {
    let x = obstacle.x + 20.0 + rng.random::<f32>() * 60.0;
    let y = if obstacle.shape.is_overhead() {
        GROUND_Y - 10.0
    } else {
        GROUND_Y - 70.0 - rng.random::<f32>() * 40.0
    };
    Coin::new(Vec2::new(x, y), rng.random::<f32>() * std::f32::consts::TAU)
}
