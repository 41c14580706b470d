//! Data-driven game balance
//!
//! Every value is per tick (60 Hz) and in world units. Loaded values pass
//! through [`Tuning::sanitized`] so a bad config can never make the
//! simulation diverge.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Upward speed applied on jump
    pub jump_impulse: f32,
    pub slide_ticks: u32,
    /// Grace period after losing a life
    pub invincibility_ticks: u32,
    pub starting_lives: u8,

    // === Speed ramp ===
    /// Scroll speed at multiplier 1.0
    pub base_speed: f32,
    /// Ticks between multiplier increments
    pub speed_ramp_interval: u64,
    pub speed_ramp_step: f32,
    pub max_speed_multiplier: f32,

    // === Spawning ===
    pub first_spawn_ticks: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    /// Lowest fraction the spawn interval may shrink to
    pub spawn_interval_floor: f32,
    /// How fast the interval shrinks per unit of multiplier
    pub spawn_interval_slope: f32,
    pub crate_weight: f32,
    pub spike_weight: f32,
    pub barrier_weight: f32,
    pub coin_chance: f32,

    // === Scoring ===
    pub points_per_tick: u64,
    pub pass_bonus: u64,
    pub coin_bonus: u64,

    // === Collision ===
    /// Inset applied to both boxes before the overlap test
    pub collision_padding: f32,
    /// Added to the coin radius for the pickup distance
    pub coin_pickup_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.65,
            jump_impulse: 13.5,
            slide_ticks: 30,
            invincibility_ticks: 90,
            starting_lives: MAX_LIVES,

            base_speed: 4.0,
            speed_ramp_interval: 300,
            speed_ramp_step: 0.08,
            max_speed_multiplier: 3.0,

            first_spawn_ticks: 100.0,
            min_spawn_interval: 70.0,
            max_spawn_interval: 130.0,
            spawn_interval_floor: 0.4,
            spawn_interval_slope: 0.3,
            crate_weight: 0.45,
            spike_weight: 0.30,
            barrier_weight: 0.25,
            coin_chance: 0.6,

            points_per_tick: 1,
            pass_bonus: 10,
            coin_bonus: 25,

            collision_padding: 4.0,
            coin_pickup_margin: 20.0,
        }
    }
}

/// Clamp a float into range, replacing NaN/inf with the fallback
fn clamp_finite(name: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    let clamped = if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    };
    if clamped != value {
        log::warn!("tuning.{name} = {value} out of range, using {clamped}");
    }
    clamped
}

impl Tuning {
    /// Clamp every value into its playable range
    pub fn sanitized(self) -> Self {
        let d = Self::default();

        let min_spawn_interval = clamp_finite(
            "min_spawn_interval",
            self.min_spawn_interval,
            1.0,
            10_000.0,
            d.min_spawn_interval,
        );
        let max_spawn_interval = clamp_finite(
            "max_spawn_interval",
            self.max_spawn_interval,
            min_spawn_interval,
            10_000.0,
            d.max_spawn_interval.max(min_spawn_interval),
        );

        let mut crate_weight = clamp_finite("crate_weight", self.crate_weight, 0.0, 1.0e6, 0.0);
        let mut spike_weight = clamp_finite("spike_weight", self.spike_weight, 0.0, 1.0e6, 0.0);
        let mut barrier_weight =
            clamp_finite("barrier_weight", self.barrier_weight, 0.0, 1.0e6, 0.0);
        if crate_weight + spike_weight + barrier_weight <= 0.0 {
            log::warn!("tuning obstacle weights sum to zero, using defaults");
            crate_weight = d.crate_weight;
            spike_weight = d.spike_weight;
            barrier_weight = d.barrier_weight;
        }

        let starting_lives = self.starting_lives.clamp(1, MAX_LIVES);
        if starting_lives != self.starting_lives {
            log::warn!(
                "tuning.starting_lives = {} out of range, using {starting_lives}",
                self.starting_lives
            );
        }

        Self {
            gravity: clamp_finite("gravity", self.gravity, 0.01, 10.0, d.gravity),
            jump_impulse: clamp_finite("jump_impulse", self.jump_impulse, 0.1, 100.0, d.jump_impulse),
            slide_ticks: self.slide_ticks.max(1),
            invincibility_ticks: self.invincibility_ticks,
            starting_lives,

            base_speed: clamp_finite("base_speed", self.base_speed, 0.1, 100.0, d.base_speed),
            speed_ramp_interval: self.speed_ramp_interval.max(1),
            speed_ramp_step: clamp_finite(
                "speed_ramp_step",
                self.speed_ramp_step,
                0.0,
                2.0,
                d.speed_ramp_step,
            ),
            max_speed_multiplier: clamp_finite(
                "max_speed_multiplier",
                self.max_speed_multiplier,
                1.0,
                3.0,
                d.max_speed_multiplier,
            ),

            first_spawn_ticks: clamp_finite(
                "first_spawn_ticks",
                self.first_spawn_ticks,
                1.0,
                10_000.0,
                d.first_spawn_ticks,
            ),
            min_spawn_interval,
            max_spawn_interval,
            spawn_interval_floor: clamp_finite(
                "spawn_interval_floor",
                self.spawn_interval_floor,
                0.05,
                1.0,
                d.spawn_interval_floor,
            ),
            spawn_interval_slope: clamp_finite(
                "spawn_interval_slope",
                self.spawn_interval_slope,
                0.0,
                10.0,
                d.spawn_interval_slope,
            ),
            crate_weight,
            spike_weight,
            barrier_weight,
            coin_chance: clamp_finite("coin_chance", self.coin_chance, 0.0, 1.0, d.coin_chance),

            points_per_tick: self.points_per_tick,
            pass_bonus: self.pass_bonus,
            coin_bonus: self.coin_bonus,

            collision_padding: clamp_finite(
                "collision_padding",
                self.collision_padding,
                0.0,
                16.0,
                d.collision_padding,
            ),
            coin_pickup_margin: clamp_finite(
                "coin_pickup_margin",
                self.coin_pickup_margin,
                0.0,
                200.0,
                d.coin_pickup_margin,
            ),
        }
    }

    /// Spawn interval scale for a speed multiplier (1.0 at base speed)
    pub fn spawn_interval_factor(&self, speed_multiplier: f32) -> f32 {
        (1.0 - (speed_multiplier - 1.0) * self.spawn_interval_slope).max(self.spawn_interval_floor)
    }
}
