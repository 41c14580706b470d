//! Read-only views for the render/HUD collaborator
//!
//! A [`Snapshot`] borrows the world, so it cannot outlive the next tick.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Backdrop, Coin, GamePhase, Obstacle, ObstacleShape, ParticleColor, Rect, World};

/// Numbers shown in the HUD bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudStats {
    pub score: u64,
    pub coins: u32,
    pub lives: u8,
    pub speed_multiplier: f32,
}

impl HudStats {
    pub fn from_world(world: &World) -> Self {
        Self {
            score: world.score,
            coins: world.coin_count,
            lives: world.lives,
            speed_multiplier: world.speed_multiplier,
        }
    }

    /// e.g. "1.1x"
    pub fn speed_label(&self) -> String {
        format!("{:.1}x", self.speed_multiplier)
    }
}

/// Full-screen overlay the renderer should draw on top of the world
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    /// Waiting for the first input
    Title,
    Paused,
    GameOver { final_score: u64, message: &'static str },
}

impl Overlay {
    pub fn for_world(world: &World) -> Option<Self> {
        match world.phase {
            GamePhase::Idle => Some(Overlay::Title),
            GamePhase::Running => None,
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::GameOver => Some(Overlay::GameOver {
                final_score: world.score,
                message: game_over_message(world.score),
            }),
        }
    }
}

/// Encouragement tiered by final score
pub fn game_over_message(score: u64) -> &'static str {
    match score {
        s if s > 5000 => "Legendary run! You are a true escape artist!",
        s if s > 2000 => "Incredible! You survived the ancient ruins!",
        s if s > 1000 => "Amazing run! The temple fears you!",
        s if s > 500 => "Great run! You're getting the hang of it!",
        _ => "Great effort! Keep practicing.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub hitbox: Rect,
    pub jumping: bool,
    pub sliding: bool,
    pub invincible: bool,
    /// Draw dimmed this frame (invincibility blink)
    pub dimmed: bool,
    pub run_frame: u32,
}

/// Obstacle with its resolved bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub shape: ObstacleShape,
    pub rect: Rect,
    pub passed: bool,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            shape: obstacle.shape,
            rect: obstacle.rect(),
            passed: obstacle.passed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: ParticleColor,
    /// Remaining life ratio, 0..=1
    pub alpha: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub phase: GamePhase,
    pub hud: HudStats,
    pub speed_label: String,
    pub overlay: Option<Overlay>,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub coins: &'a [Coin],
    pub particles: Vec<ParticleView>,
    /// None when parallax is disabled
    pub backdrop: Option<&'a Backdrop>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(world: &'a World) -> Self {
        let hud = HudStats::from_world(world);
        let player = &world.player;

        Self {
            tick: world.tick_count,
            phase: world.phase,
            speed_label: hud.speed_label(),
            hud,
            overlay: Overlay::for_world(world),
            player: PlayerView {
                hitbox: player.hitbox(),
                jumping: player.is_jumping(),
                sliding: player.is_sliding(),
                invincible: player.is_invincible(),
                dimmed: player.is_invincible() && (player.invincible_ticks / 3) % 2 == 0,
                run_frame: player.run_frame,
            },
            obstacles: world.obstacles.iter().map(ObstacleView::from).collect(),
            coins: &world.coins,
            particles: world
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: p.life_ratio(),
                })
                .collect(),
            backdrop: world.parallax.then_some(&world.backdrop),
        }
    }
}

/// Render/HUD collaborator
pub trait FrameSink {
    /// Called after every simulated tick
    fn hud(&mut self, _stats: &HudStats) {}

    /// Called once per presented frame, including frozen ones
    fn frame(&mut self, snapshot: &Snapshot<'_>);
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _snapshot: &Snapshot<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_speed_label_one_decimal() {
        let mut stats = HudStats {
            score: 0,
            coins: 0,
            lives: 3,
            speed_multiplier: 1.0,
        };
        assert_eq!(stats.speed_label(), "1.0x");
        stats.speed_multiplier = 1.08;
        assert_eq!(stats.speed_label(), "1.1x");
        stats.speed_multiplier = 3.0;
        assert_eq!(stats.speed_label(), "3.0x");
    }

    #[test]
    fn test_overlay_by_phase() {
        let mut world = World::new(1, &Settings::default());
        assert_eq!(Overlay::for_world(&world), Some(Overlay::Title));
        world.start();
        assert_eq!(Overlay::for_world(&world), None);
        world.pause();
        assert_eq!(Overlay::for_world(&world), Some(Overlay::Paused));
    }

    #[test]
    fn test_game_over_tiers() {
        assert_eq!(game_over_message(0), "Great effort! Keep practicing.");
        assert_eq!(game_over_message(501), "Great run! You're getting the hang of it!");
        assert_eq!(game_over_message(2000), "Amazing run! The temple fears you!");
        assert_eq!(game_over_message(9999), "Legendary run! You are a true escape artist!");
    }

    #[test]
    fn test_snapshot_reflects_world() {
        let mut world = World::new(4, &Settings::default());
        world.start();
        tick(
            &mut world,
            &TickInput {
                slide: true,
                ..Default::default()
            },
        );
        world.player.invincible_ticks = 30;

        let snapshot = Snapshot::capture(&world);
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.hud.score, 1);
        assert_eq!(snapshot.hud.lives, 3);
        assert_eq!(snapshot.speed_label, "1.0x");
        assert!(snapshot.player.sliding);
        assert!(!snapshot.player.jumping);
        assert_eq!(snapshot.player.hitbox.size.y, 26.0);
        assert!(snapshot.player.dimmed);
        assert!(snapshot.backdrop.is_some());
        assert!(snapshot.particles.iter().all(|p| p.alpha > 0.0 && p.alpha <= 1.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = World::new(4, &Settings::default());
        world.start();
        world.obstacles.push(Obstacle::new(300.0, ObstacleShape::Spike));
        world
            .obstacles
            .push(Obstacle::new(400.0, ObstacleShape::Barrier { width: 80.0 }));
        world.end_run();
        let json = serde_json::to_value(Snapshot::capture(&world)).unwrap();
        assert_eq!(json["phase"], "GameOver");
        assert_eq!(json["overlay"]["kind"], "game_over");
        assert_eq!(json["hud"]["lives"], 3);
        assert_eq!(json["speed_label"], "1.0x");

        let spike = &json["obstacles"][0];
        assert_eq!(spike["shape"]["kind"], "spike");
        assert_eq!(spike["rect"]["pos"], serde_json::json!([300.0, 310.0]));
        assert_eq!(spike["rect"]["size"], serde_json::json!([35.0, 30.0]));

        let barrier = &json["obstacles"][1];
        assert_eq!(barrier["shape"]["kind"], "barrier");
        assert_eq!(barrier["rect"]["pos"], serde_json::json!([400.0, 268.0]));
        assert_eq!(barrier["rect"]["size"], serde_json::json!([80.0, 22.0]));
        assert_eq!(barrier["passed"], false);
    }
}
