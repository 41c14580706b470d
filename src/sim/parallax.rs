//! Scrolling backdrop layers
//!
//! Cosmetic only. Each layer scrolls at a fixed fraction of the game speed
//! and recycles elements that leave the left edge.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_Y, WORLD_WIDTH};

const STAR_COUNT: usize = 60;
const FAR_MOUNTAIN_COUNT: usize = 8;
const NEAR_MOUNTAIN_COUNT: usize = 10;
const GROUND_MARK_COUNT: usize = 20;

/// Layer speeds as a fraction of game speed
const STAR_FACTOR: f32 = 0.3;
const FAR_MOUNTAIN_FACTOR: f32 = 0.15;
const NEAR_MOUNTAIN_FACTOR: f32 = 0.35;

/// Stars stay clear of the mountain band
const STAR_CEILING: f32 = GROUND_Y - 40.0;
const STAR_RESPAWN_JITTER: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Twinkle phase offset
    pub twinkle: f32,
    /// Own drift speed, scaled by the speed multiplier
    pub speed: f32,
}

/// Triangle silhouette standing on the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Texture streak on the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundMark {
    pub x: f32,
    pub width: f32,
}

/// Size ranges for one mountain layer
#[derive(Debug, Clone, Copy)]
struct MountainLayer {
    spacing: f32,
    min_width: f32,
    width_range: f32,
    min_height: f32,
    height_range: f32,
    respawn_jitter: f32,
}

const FAR_LAYER: MountainLayer = MountainLayer {
    spacing: 160.0,
    min_width: 120.0,
    width_range: 100.0,
    min_height: 60.0,
    height_range: 80.0,
    respawn_jitter: 100.0,
};

const NEAR_LAYER: MountainLayer = MountainLayer {
    spacing: 120.0,
    min_width: 80.0,
    width_range: 80.0,
    min_height: 40.0,
    height_range: 50.0,
    respawn_jitter: 80.0,
};

impl MountainLayer {
    fn generate(&self, rng: &mut Pcg32, count: usize) -> Vec<Mountain> {
        (0..count)
            .map(|i| Mountain {
                x: i as f32 * self.spacing - self.spacing / 2.0,
                width: self.min_width + rng.random::<f32>() * self.width_range,
                height: self.min_height + rng.random::<f32>() * self.height_range,
            })
            .collect()
    }

    fn scroll(&self, rng: &mut Pcg32, mountains: &mut [Mountain], dx: f32) {
        for m in mountains.iter_mut() {
            m.x -= dx;
            if m.x + m.width < -20.0 {
                m.x = WORLD_WIDTH + rng.random::<f32>() * self.respawn_jitter;
                m.width = self.min_width + rng.random::<f32>() * self.width_range;
                m.height = self.min_height + rng.random::<f32>() * self.height_range;
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backdrop {
    pub stars: Vec<Star>,
    pub far_mountains: Vec<Mountain>,
    pub near_mountains: Vec<Mountain>,
    pub ground_marks: Vec<GroundMark>,
}

impl Backdrop {
    /// Fresh randomised layers
    pub fn generate(rng: &mut Pcg32) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random::<f32>() * WORLD_WIDTH,
                y: rng.random::<f32>() * STAR_CEILING,
                size: 0.5 + rng.random::<f32>() * 1.5,
                twinkle: rng.random::<f32>() * std::f32::consts::TAU,
                speed: 0.2 + rng.random::<f32>() * 0.5,
            })
            .collect();

        let ground_marks = (0..GROUND_MARK_COUNT)
            .map(|i| GroundMark {
                x: i as f32 * 60.0 + rng.random::<f32>() * 30.0,
                width: 15.0 + rng.random::<f32>() * 40.0,
            })
            .collect();

        Self {
            stars,
            far_mountains: FAR_LAYER.generate(rng, FAR_MOUNTAIN_COUNT),
            near_mountains: NEAR_LAYER.generate(rng, NEAR_MOUNTAIN_COUNT),
            ground_marks,
        }
    }

    /// Scroll every layer for one tick at the given game speed
    pub fn update(&mut self, rng: &mut Pcg32, game_speed: f32, speed_multiplier: f32) {
        for star in self.stars.iter_mut() {
            star.x -= star.speed * speed_multiplier * STAR_FACTOR;
            if star.x < -5.0 {
                star.x = WORLD_WIDTH + 5.0 + rng.random::<f32>() * STAR_RESPAWN_JITTER;
                star.y = rng.random::<f32>() * STAR_CEILING;
                star.size = 0.5 + rng.random::<f32>() * 1.5;
            }
        }

        FAR_LAYER.scroll(rng, &mut self.far_mountains, game_speed * FAR_MOUNTAIN_FACTOR);
        NEAR_LAYER.scroll(rng, &mut self.near_mountains, game_speed * NEAR_MOUNTAIN_FACTOR);

        for mark in self.ground_marks.iter_mut() {
            mark.x -= game_speed;
            if mark.x + mark.width < 0.0 {
                mark.x = WORLD_WIDTH + rng.random::<f32>() * 30.0;
                mark.width = 15.0 + rng.random::<f32>() * 40.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_layer_counts() {
        let mut rng = Pcg32::seed_from_u64(5);
        let backdrop = Backdrop::generate(&mut rng);
        assert_eq!(backdrop.stars.len(), STAR_COUNT);
        assert_eq!(backdrop.far_mountains.len(), FAR_MOUNTAIN_COUNT);
        assert_eq!(backdrop.near_mountains.len(), NEAR_MOUNTAIN_COUNT);
        assert_eq!(backdrop.ground_marks.len(), GROUND_MARK_COUNT);
        assert!(backdrop.stars.iter().all(|s| s.y < STAR_CEILING));
    }

    #[test]
    fn test_layers_scroll_at_depth_fractions() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut backdrop = Backdrop::generate(&mut rng);
        // Move everything well inside the screen so nothing wraps
        for m in backdrop.far_mountains.iter_mut().chain(backdrop.near_mountains.iter_mut()) {
            m.x = 400.0;
        }
        for g in backdrop.ground_marks.iter_mut() {
            g.x = 400.0;
        }

        backdrop.update(&mut rng, 4.0, 1.0);
        assert!((backdrop.far_mountains[0].x - (400.0 - 0.6)).abs() < 1e-4);
        assert!((backdrop.near_mountains[0].x - (400.0 - 1.4)).abs() < 1e-4);
        assert!((backdrop.ground_marks[0].x - 396.0).abs() < 1e-4);
    }

    #[test]
    fn test_elements_wrap_to_right_edge() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut backdrop = Backdrop::generate(&mut rng);
        backdrop.stars[0].x = -4.99;
        backdrop.stars[0].y = -1.0;
        backdrop.stars[0].size = 10.0;
        backdrop.far_mountains[0].x = -1000.0;
        backdrop.ground_marks[0].x = -100.0;

        backdrop.update(&mut rng, 4.0, 1.0);

        let star = &backdrop.stars[0];
        assert!(star.x >= WORLD_WIDTH + 5.0 && star.x <= WORLD_WIDTH + 25.0);
        assert!(star.y >= 0.0 && star.y <= STAR_CEILING);
        assert!(star.size >= 0.5 && star.size <= 2.0);
        let m = &backdrop.far_mountains[0];
        assert!(m.x >= WORLD_WIDTH && m.x <= WORLD_WIDTH + 100.0);
        assert!(m.width >= 120.0 && m.width <= 220.0);
        let g = &backdrop.ground_marks[0];
        assert!(g.x >= WORLD_WIDTH && g.x <= WORLD_WIDTH + 30.0);
        assert!(g.width >= 15.0 && g.width <= 55.0);
    }
}
