//! Escape Run entry point
//!
//! Headless demo: the autopilot plays one run against a simulated 60 Hz
//! display with frame jitter, then the final snapshot is printed as JSON.
//!
//! Usage: `escape-run [settings.json]` (seed from `ESCAPE_RUN_SEED`)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use escape_run::hud::{FrameSink, HudStats, Snapshot};
    use escape_run::sim::GamePhase;
    use escape_run::{Game, Settings};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Nominal display refresh interval
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Logs HUD changes the way a status bar would show them
    #[derive(Default)]
    struct LogSink {
        last_lives: Option<u8>,
        frames: u32,
    }

    impl FrameSink for LogSink {
        fn hud(&mut self, stats: &HudStats) {
            if self.last_lives != Some(stats.lives) {
                log::info!(
                    "score {} coins {} lives {} speed {}",
                    stats.score,
                    stats.coins,
                    stats.lives,
                    stats.speed_label()
                );
                self.last_lives = Some(stats.lives);
            }
        }

        fn frame(&mut self, snapshot: &Snapshot<'_>) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!(
                    "frame {}: tick {} obstacles {} coins {} particles {}",
                    self.frames,
                    snapshot.tick,
                    snapshot.obstacles.len(),
                    snapshot.coins.len(),
                    snapshot.particles.len()
                );
            }
        }
    }

    fn load_settings() -> Settings {
        match std::env::args().nth(1) {
            Some(path) => Settings::load(&path).unwrap_or_else(|e| {
                log::warn!("Falling back to default settings: {}", e);
                Settings::default()
            }),
            None => Settings::default(),
        }
    }

    fn session_seed() -> u64 {
        if let Some(seed) = std::env::var("ESCAPE_RUN_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            return seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Escape Run (headless) starting...");

        let settings = load_settings();
        let seed = session_seed();
        log::info!(
            "Game initialized with seed: {} (quality {})",
            seed,
            settings.quality.as_str()
        );

        let mut game = Game::headless(seed, &settings);
        game.set_demo(true);
        game.start();

        // Display timing noise is independent of the simulation stream
        let mut jitter = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
        let mut sink = LogSink::default();
        let mut now = 0.0;
        let mut frames = 0;

        while frames < MAX_FRAMES && game.scheduler_mut().take_pending() {
            now += FRAME_MS * (0.5 + jitter.random::<f64>());
            game.on_frame(now, &mut sink);
            frames += 1;
        }

        let world = game.world();
        match world.phase {
            GamePhase::GameOver => log::info!(
                "Run over after {} ticks: score {}, {} coins",
                world.tick_count,
                world.score,
                world.coin_count
            ),
            _ => log::info!("Stopped after {} frames, still running", frames),
        }

        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
