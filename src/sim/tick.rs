//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one 1/60 s step. Subsystems run in
//! a fixed order: player, spawner, collisions, pools.

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::effects::ParticleColor;
use super::entities::ObstacleShape;
use super::state::{GamePhase, World};
use crate::consts::*;

/// Dust puffed up on take-off and touch-down
const JUMP_DUST: usize = 5;
/// Ticks between running dust puffs
const RUN_DUST_TICKS: u64 = 4;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub slide: bool,
    /// Demo mode - the autopilot decides jump/slide
    pub demo: bool,
}

/// Summary of one tick, mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when the world was not running and nothing happened
    pub advanced: bool,
    pub spawned: bool,
    pub collisions: CollisionReport,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    if world.phase != GamePhase::Running {
        return report;
    }
    report.advanced = true;

    let input = if input.demo { demo_input(world) } else { *input };

    world.tick_count += 1;
    world.score += world.tuning.points_per_tick;

    // Speed ramp
    if world.tick_count % world.tuning.speed_ramp_interval == 0 {
        let ramped = (world.speed_multiplier + world.tuning.speed_ramp_step)
            .min(world.tuning.max_speed_multiplier);
        if ramped != world.speed_multiplier {
            world.speed_multiplier = ramped;
            log::debug!("speed x{:.2} at tick {}", ramped, world.tick_count);
        }
    }

    update_player(world, &input);

    // Anything spawned below sits out this tick's collision pass
    let obstacle_limit = world.obstacles.len();
    let coin_limit = world.coins.len();
    let spawn = world.spawner.update(
        &mut world.rng,
        &world.tuning,
        world.speed_multiplier,
        &mut world.obstacles,
        &mut world.coins,
    );
    report.spawned = spawn.obstacle;

    report.collisions = collision::resolve(world, obstacle_limit, coin_limit);
    if world.phase == GamePhase::GameOver {
        return report;
    }

    advance_pools(world);

    report
}

fn update_player(world: &mut World, input: &TickInput) {
    let feet = Vec2::new(world.player.x + PLAYER_WIDTH / 2.0, GROUND_Y);

    if input.jump && world.player.jump(&world.tuning) {
        world
            .particles
            .emit(&mut world.rng, feet, JUMP_DUST, ParticleColor::Dust);
    } else if input.slide {
        world.player.slide(&world.tuning);
    }

    let step = world.player.update(&world.tuning);
    if step.landed {
        world
            .particles
            .emit(&mut world.rng, feet, JUMP_DUST, ParticleColor::Dust);
    }

    if !world.player.is_jumping()
        && !world.player.is_sliding()
        && world.tick_count % RUN_DUST_TICKS == 0
    {
        let heel = Vec2::new(world.player.x, GROUND_Y);
        world.particles.emit(&mut world.rng, heel, 1, ParticleColor::Dust);
    }
}

/// Scroll and cull every pool
fn advance_pools(world: &mut World) {
    let speed = world.game_speed();

    for obstacle in world.obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    world.obstacles.retain(|o| o.right() > OBSTACLE_CULL_X);

    for coin in world.coins.iter_mut() {
        coin.pos.x -= speed;
    }
    world
        .coins
        .retain(|c| !c.collected && c.pos.x > COIN_CULL_X);

    world.particles.update();

    if world.parallax {
        world
            .backdrop
            .update(&mut world.rng, speed, world.speed_multiplier);
    }
}

/// Autopilot: jump ground obstacles, slide under barriers
pub fn demo_input(world: &World) -> TickInput {
    let speed = world.game_speed();
    let front = world.player.x + PLAYER_WIDTH;

    let next = world
        .obstacles
        .iter()
        .filter(|o| !o.passed && o.right() >= world.player.x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let Some(obstacle) = next else {
        return TickInput::default();
    };
    let gap = obstacle.x - front;

    match obstacle.shape {
        ObstacleShape::Barrier { .. } => TickInput {
            slide: gap < speed * 12.0,
            ..TickInput::default()
        },
        ObstacleShape::Crate { .. } | ObstacleShape::Spike => TickInput {
            jump: gap > 0.0 && gap < speed * 8.0,
            ..TickInput::default()
        },
    }
}
