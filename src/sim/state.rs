//! World state and the game phase machine
//!
//! The world owns every pool; nothing outside the tick pipeline and the
//! phase transitions below mutates it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::ParticlePool;
use super::entities::{Coin, Obstacle};
use super::parallax::Backdrop;
use super::player::Player;
use super::spawner::Spawner;
use super::tuning::Tuning;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; resumes where it left off
    Paused,
    /// Out of lives; frozen until restart
    GameOver,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Sanitized balance values
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Ticks simulated since the last reset
    pub tick_count: u64,
    pub score: u64,
    /// Coins collected this run
    pub coin_count: u32,
    pub lives: u8,
    /// 1.0 ..= tuning.max_speed_multiplier
    pub speed_multiplier: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    /// Scrolling scenery (not gameplay-affecting)
    pub backdrop: Backdrop,
    pub spawner: Spawner,
    /// Whether the backdrop is simulated at all
    pub parallax: bool,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create an idle world with the given seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let tuning = settings.tuning.clone().sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::generate(&mut rng);

        Self {
            seed,
            phase: GamePhase::Idle,
            tick_count: 0,
            score: 0,
            coin_count: 0,
            lives: tuning.starting_lives,
            speed_multiplier: 1.0,
            player: Player::new(),
            obstacles: Vec::with_capacity(16),
            coins: Vec::with_capacity(16),
            particles: ParticlePool::new(settings.max_particles()),
            backdrop,
            spawner: Spawner::new(&tuning),
            parallax: settings.parallax_enabled(),
            tuning,
            rng,
        }
    }

    /// Current scroll speed in units per tick
    pub fn game_speed(&self) -> f32 {
        self.tuning.base_speed * self.speed_multiplier
    }

    /// Back to a fresh run. Leaves the phase alone and keeps the RNG stream
    /// running so consecutive runs differ.
    pub fn reset(&mut self) {
        self.tick_count = 0;
        self.score = 0;
        self.coin_count = 0;
        self.lives = self.tuning.starting_lives;
        self.speed_multiplier = 1.0;
        self.player = Player::new();
        self.obstacles.clear();
        self.coins.clear();
        self.particles.clear();
        self.backdrop = Backdrop::generate(&mut self.rng);
        self.spawner = Spawner::new(&self.tuning);
    }

    /// Idle -> Running with a fresh run
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {})", self.seed);
        true
    }

    /// GameOver -> Running with a fresh run
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset();
        self.phase = GamePhase::Running;
        log::info!("Run restarted");
        true
    }

    /// Running -> Paused; no-op otherwise
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Paused;
        log::info!("Paused at tick {}", self.tick_count);
        true
    }

    /// Paused -> Running; no-op otherwise
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Resumed at tick {}", self.tick_count);
        true
    }

    /// Running <-> Paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Running -> GameOver once lives are gone
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: score {}, coins {}",
            self.tick_count,
            self.score,
            self.coin_count
        );
    }
}
