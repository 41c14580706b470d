//! Collision resolution between the player and the entity pools
//!
//! Two deliberately different tests: obstacles use a padded box overlap,
//! coins use a centre-distance threshold.

use super::effects::ParticleColor;
use super::state::World;

/// Damage particles per hit
const HIT_BURST: usize = 15;
/// Sparkles per collected coin
const COIN_BURST: usize = 8;

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Lives lost
    pub hits: u32,
    /// Obstacles scored for being cleared
    pub cleared: u32,
    pub coins: u32,
}

/// Resolve collisions against the first `obstacle_limit` obstacles and
/// `coin_limit` coins. Entities past the limits were spawned this tick and
/// are not checked until the next one.
///
/// Ends the run as soon as the last life is lost.
pub fn resolve(world: &mut World, obstacle_limit: usize, coin_limit: usize) -> CollisionReport {
    let mut report = CollisionReport::default();
    let padding = world.tuning.collision_padding;
    let hitbox = world.player.hitbox();
    let obstacle_limit = obstacle_limit.min(world.obstacles.len());
    let mut out_of_lives = false;

    for obstacle in world.obstacles[..obstacle_limit].iter_mut() {
        if obstacle.passed {
            continue;
        }

        if !world.player.is_invincible() && hitbox.overlaps_padded(&obstacle.rect(), padding) {
            world.lives = world.lives.saturating_sub(1);
            report.hits += 1;
            world
                .particles
                .emit(&mut world.rng, hitbox.center(), HIT_BURST, ParticleColor::Damage);
            log::debug!(
                "hit {:?} at tick {}, {} lives left",
                obstacle.shape,
                world.tick_count,
                world.lives
            );

            obstacle.passed = true;
            if world.lives == 0 {
                out_of_lives = true;
                break;
            }

            world.player.invincible_ticks = world.tuning.invincibility_ticks;
        }

        // Cleared: trailing edge is behind the player
        if !obstacle.passed && obstacle.right() < world.player.x {
            obstacle.passed = true;
            world.score += world.tuning.pass_bonus;
            report.cleared += 1;
        }
    }

    if out_of_lives {
        world.end_run();
        return report;
    }

    let pickup = world.player.pickup_box().center();
    let margin = world.tuning.coin_pickup_margin;
    let coin_limit = coin_limit.min(world.coins.len());

    for coin in world.coins[..coin_limit].iter_mut() {
        if coin.collected {
            continue;
        }
        if coin.pos.distance(pickup) < coin.size + margin {
            coin.collected = true;
            world.coin_count += 1;
            world.score += world.tuning.coin_bonus;
            report.coins += 1;
            world
                .particles
                .emit(&mut world.rng, coin.pos, COIN_BURST, ParticleColor::Gold);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::entities::{Coin, Obstacle, ObstacleShape};
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn running_world() -> World {
        let mut world = World::new(77, &Settings::default());
        world.start();
        world
    }

    fn crate_at(x: f32) -> Obstacle {
        Obstacle::new(
            x,
            ObstacleShape::Crate {
                width: 30.0,
                height: 40.0,
            },
        )
    }

    fn resolve_all(world: &mut World) -> CollisionReport {
        let (o, c) = (world.obstacles.len(), world.coins.len());
        resolve(world, o, c)
    }

    #[test]
    fn test_hit_costs_a_life_and_grants_invincibility() {
        let mut world = running_world();
        world.obstacles.push(crate_at(PLAYER_X + 10.0));

        let report = resolve_all(&mut world);
        assert_eq!(report.hits, 1);
        assert_eq!(world.lives, 2);
        assert_eq!(world.player.invincible_ticks, 90);
        assert!(world.obstacles[0].passed);
        assert_eq!(world.particles.len(), HIT_BURST);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_overlapping_obstacles_cost_one_life() {
        let mut world = running_world();
        world.obstacles.push(crate_at(PLAYER_X));
        world.obstacles.push(crate_at(PLAYER_X + 12.0));
        world.obstacles.push(Obstacle::new(PLAYER_X + 5.0, ObstacleShape::Spike));

        let report = resolve_all(&mut world);
        assert_eq!(report.hits, 1);
        assert_eq!(world.lives, 2);
        // The shielded ones stay live so they can still be cleared later
        assert!(!world.obstacles[1].passed);
        assert!(!world.obstacles[2].passed);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut world = running_world();
        world.lives = 1;
        world.obstacles.push(crate_at(PLAYER_X));

        resolve_all(&mut world);
        assert_eq!(world.lives, 0);
        assert_eq!(world.phase, GamePhase::GameOver);
        assert!(world.obstacles[0].passed);
    }

    #[test]
    fn test_cleared_obstacle_scores_once() {
        let mut world = running_world();
        world.obstacles.push(crate_at(PLAYER_X - 31.0));

        let report = resolve_all(&mut world);
        assert_eq!(report.cleared, 1);
        assert_eq!(world.score, 10);

        let report = resolve_all(&mut world);
        assert_eq!(report.cleared, 0);
        assert_eq!(world.score, 10);
    }

    #[test]
    fn test_shielded_overlap_scores_when_cleared() {
        let mut world = running_world();
        world.player.invincible_ticks = 50;
        world.obstacles.push(crate_at(PLAYER_X));

        let report = resolve_all(&mut world);
        assert_eq!(report.hits, 0);
        assert_eq!(world.lives, 3);
        assert!(!world.obstacles[0].passed);

        world.obstacles[0].x = PLAYER_X - 40.0;
        let report = resolve_all(&mut world);
        assert_eq!(report.cleared, 1);
        assert_eq!(world.score, 10);
    }

    #[test]
    fn test_standing_player_clears_barrier_height() {
        let mut world = running_world();
        world
            .obstacles
            .push(Obstacle::new(PLAYER_X, ObstacleShape::Barrier { width: 80.0 }));
        assert_eq!(resolve_all(&mut world).hits, 0);

        // Mid-jump the head rises into it
        world.player.y = GROUND_Y - 40.0;
        assert_eq!(resolve_all(&mut world).hits, 1);
    }

    #[test]
    fn test_limit_skips_fresh_spawns() {
        let mut world = running_world();
        world.obstacles.push(crate_at(PLAYER_X));
        let report = resolve(&mut world, 0, 0);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(world.lives, 3);
    }

    #[test]
    fn test_coin_pickup_by_distance() {
        let mut world = running_world();
        let center = world.player.pickup_box().center();
        world.coins.push(Coin::new(center + Vec2::new(29.0, 0.0), 0.0));
        world.coins.push(Coin::new(center + Vec2::new(31.0, 0.0), 0.0));

        let report = resolve_all(&mut world);
        assert_eq!(report.coins, 1);
        assert!(world.coins[0].collected);
        assert!(!world.coins[1].collected);
        assert_eq!(world.coin_count, 1);
        assert_eq!(world.score, 25);
        assert_eq!(world.particles.len(), COIN_BURST);
    }
}
