//! Particle effects
//!
//! Purely cosmetic: particles never affect gameplay, but they are simulated
//! on the fixed tick so bursts look identical at any frame rate.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Downward acceleration applied to every particle
pub const PARTICLE_GRAVITY: f32 = 0.1;
/// Nominal lifetime used for fading
pub const PARTICLE_MAX_LIFE: f32 = 40.0;

/// Colour tag for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleColor {
    /// Kicked-up ground dust
    Dust,
    /// Player got hit
    Damage,
    /// Coin sparkle
    Gold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// 1.0 when fresh, 0.0 when expired (drives alpha and shrink)
    pub fn life_ratio(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Bounded particle pool
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit a burst at `at`. Oldest particles make room when the pool is full.
    pub fn emit(&mut self, rng: &mut Pcg32, at: Vec2, count: usize, color: ParticleColor) {
        if self.capacity == 0 {
            return;
        }
        for _ in 0..count {
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 5.0,
                    (rng.random::<f32>() - 1.0) * 4.0,
                ),
                life: 20.0 + rng.random::<f32>() * 20.0,
                max_life: PARTICLE_MAX_LIFE,
                size: 2.0 + rng.random::<f32>() * 3.0,
                color,
            });
        }
        if self.particles.len() > self.capacity {
            let excess = self.particles.len() - self.capacity;
            self.particles.drain(..excess);
        }
    }

    /// Ballistic step; expired particles are removed
    pub fn update(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
