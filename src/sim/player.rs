//! Player controller
//!
//! The runner never moves horizontally; the world scrolls past it. Only the
//! vertical axis is simulated.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::tuning::Tuning;
use crate::consts::*;

/// What the player's body is doing
///
/// Jumping and sliding are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    /// On the ground, running
    #[default]
    Grounded,
    /// In the air after a jump
    Airborne,
    /// Ducking along the ground
    Sliding { ticks_left: u32 },
}

/// Result of advancing the player one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStep {
    /// Touched down this tick
    pub landed: bool,
    /// Slide ended this tick
    pub stood_up: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Feet position
    pub y: f32,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub stance: Stance,
    /// Ticks of damage immunity remaining
    pub invincible_ticks: u32,
    /// Animation frame counter (cosmetic)
    pub run_frame: u32,
    run_timer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            vel_y: 0.0,
            stance: Stance::Grounded,
            invincible_ticks: 0,
            run_frame: 0,
            run_timer: 0,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.stance == Stance::Airborne
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.stance, Stance::Sliding { .. })
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Height of the active pose
    pub fn height(&self) -> f32 {
        if self.is_sliding() {
            PLAYER_SLIDE_HEIGHT
        } else {
            PLAYER_HEIGHT
        }
    }

    /// Damage hitbox for the current pose
    pub fn hitbox(&self) -> Rect {
        let top = if self.is_sliding() {
            GROUND_Y - PLAYER_SLIDE_HEIGHT
        } else {
            self.y - PLAYER_HEIGHT
        };
        Rect::new(self.x, top, PLAYER_WIDTH, self.height())
    }

    /// Coin pickup box; the slide pose reaches a little further forward
    pub fn pickup_box(&self) -> Rect {
        let mut rect = self.hitbox();
        if self.is_sliding() {
            rect.size.x += SLIDE_PICKUP_REACH;
        }
        rect
    }

    /// Start a jump. Returns false if already airborne or sliding.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.stance != Stance::Grounded {
            return false;
        }
        self.stance = Stance::Airborne;
        self.vel_y = -tuning.jump_impulse;
        true
    }

    /// Start a slide. Returns false if already airborne or sliding.
    pub fn slide(&mut self, tuning: &Tuning) -> bool {
        if self.stance != Stance::Grounded {
            return false;
        }
        self.stance = Stance::Sliding {
            ticks_left: tuning.slide_ticks,
        };
        true
    }

    /// Advance physics and timers by one tick
    pub fn update(&mut self, tuning: &Tuning) -> PlayerStep {
        let mut step = PlayerStep::default();

        match self.stance {
            Stance::Airborne => {
                self.vel_y += tuning.gravity;
                self.y += self.vel_y;
                if self.y >= GROUND_Y {
                    self.y = GROUND_Y;
                    self.vel_y = 0.0;
                    self.stance = Stance::Grounded;
                    step.landed = true;
                }
            }
            Stance::Sliding { ticks_left } => {
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left == 0 {
                    self.stance = Stance::Grounded;
                    step.stood_up = true;
                } else {
                    self.stance = Stance::Sliding { ticks_left };
                }
            }
            Stance::Grounded => {}
        }

        self.run_timer += 1;
        if self.run_timer >= RUN_FRAME_TICKS {
            self.run_timer = 0;
            self.run_frame = self.run_frame.wrapping_add(1);
        }

        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_arc_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        assert!(player.jump(&tuning));
        assert!(player.is_jumping());
        assert_eq!(player.vel_y, -13.5);

        let mut peak = GROUND_Y;
        let mut ticks = 0;
        loop {
            ticks += 1;
            let step = player.update(&tuning);
            peak = peak.min(player.y);
            if step.landed {
                break;
            }
            assert!(ticks < 100, "never landed");
        }
        assert_eq!(player.y, GROUND_Y);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.is_jumping());
        // Roughly v^2 / 2g above the ground
        assert!(GROUND_Y - peak > 120.0);
    }

    #[test]
    fn test_no_double_jump_or_slide_in_air() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        assert!(player.jump(&tuning));
        player.update(&tuning);
        let vel = player.vel_y;
        assert!(!player.jump(&tuning));
        assert!(!player.slide(&tuning));
        assert_eq!(player.vel_y, vel);
        assert!(!player.is_sliding());
    }

    #[test]
    fn test_slide_lasts_configured_ticks() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        assert!(player.slide(&tuning));
        assert_eq!(player.height(), PLAYER_SLIDE_HEIGHT);
        assert!(!player.jump(&tuning));

        for _ in 0..29 {
            assert!(!player.update(&tuning).stood_up);
            assert!(player.is_sliding());
        }
        assert!(player.update(&tuning).stood_up);
        assert!(!player.is_sliding());
        assert_eq!(player.height(), PLAYER_HEIGHT);
    }

    #[test]
    fn test_hitbox_follows_pose() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        assert_eq!(player.hitbox(), Rect::new(100.0, 288.0, 36.0, 52.0));

        player.slide(&tuning);
        assert_eq!(player.hitbox(), Rect::new(100.0, 314.0, 36.0, 26.0));
        assert_eq!(player.pickup_box().size.x, 46.0);
    }

    #[test]
    fn test_run_frame_every_three_ticks() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        for _ in 0..9 {
            player.update(&tuning);
        }
        assert_eq!(player.run_frame, 3);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.invincible_ticks = 2;
        player.update(&tuning);
        assert!(player.is_invincible());
        player.update(&tuning);
        assert!(!player.is_invincible());
        player.update(&tuning);
        assert_eq!(player.invincible_ticks, 0);
    }
}
