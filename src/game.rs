//! Game session
//!
//! Owns the world, the fixed stepper and the frame scheduler, and turns host
//! events (input actions, frame callbacks) into ticks. Actions are buffered
//! and applied at the start of the next tick so only the tick pipeline ever
//! mutates the world.

use crate::clock::{FixedStepper, FrameScheduler, ManualScheduler};
use crate::hud::{FrameSink, HudStats, Snapshot};
use crate::settings::Settings;
use crate::sim::{GamePhase, TickInput, World, tick};

pub struct Game<S: FrameScheduler = ManualScheduler> {
    world: World,
    stepper: FixedStepper,
    scheduler: S,
    /// One-shot actions waiting for the next tick
    input: TickInput,
    demo: bool,
}

impl Game<ManualScheduler> {
    /// Session with a hand-driven scheduler
    pub fn headless(seed: u64, settings: &Settings) -> Self {
        Self::new(World::new(seed, settings), ManualScheduler::new())
    }
}

impl<S: FrameScheduler> Game<S> {
    pub fn new(world: World, scheduler: S) -> Self {
        Self {
            world,
            stepper: FixedStepper::default(),
            scheduler,
            input: TickInput::default(),
            demo: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.world)
    }

    pub fn hud(&self) -> HudStats {
        HudStats::from_world(&self.world)
    }

    /// Let the autopilot play
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if !self.world.start() {
            return false;
        }
        self.begin_running();
        true
    }

    /// GameOver -> Running
    pub fn restart(&mut self) -> bool {
        if !self.world.restart() {
            return false;
        }
        self.begin_running();
        true
    }

    /// Running -> Paused; pending frames and actions are dropped
    pub fn pause(&mut self) -> bool {
        if !self.world.pause() {
            return false;
        }
        self.scheduler.cancel_frame();
        self.input = TickInput::default();
        true
    }

    /// Paused -> Running without catching up on the paused time
    pub fn resume(&mut self) -> bool {
        if !self.world.resume() {
            return false;
        }
        self.begin_running();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.world.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Queue a jump for the next tick (ignored unless running)
    pub fn request_jump(&mut self) {
        if self.world.phase == GamePhase::Running {
            self.input.jump = true;
        }
    }

    /// Queue a slide for the next tick (ignored unless running)
    pub fn request_slide(&mut self) {
        if self.world.phase == GamePhase::Running {
            self.input.slide = true;
        }
    }

    /// Host frame callback. Runs every tick owed since the previous frame,
    /// presents the result and schedules the next frame while running.
    ///
    /// Returns the number of ticks simulated.
    pub fn on_frame(&mut self, timestamp_ms: f64, sink: &mut impl FrameSink) -> u32 {
        if self.world.phase != GamePhase::Running {
            return 0;
        }

        self.stepper.advance(timestamp_ms);

        let mut ticks = 0;
        while self.world.phase == GamePhase::Running && self.stepper.next_tick() {
            let input = TickInput {
                demo: self.demo,
                ..self.input
            };
            tick(&mut self.world, &input);
            // Clear one-shot inputs after processing
            self.input = TickInput::default();
            ticks += 1;
            sink.hud(&HudStats::from_world(&self.world));
        }

        if self.world.phase == GamePhase::GameOver {
            self.scheduler.cancel_frame();
            self.stepper.reset();
        }

        sink.frame(&Snapshot::capture(&self.world));

        if self.world.phase == GamePhase::Running {
            self.scheduler.request_frame();
        }
        ticks
    }

    /// Present the current state without simulating (e.g. the paused frame)
    pub fn render(&self, sink: &mut impl FrameSink) {
        sink.frame(&Snapshot::capture(&self.world));
    }

    fn begin_running(&mut self) {
        self.stepper.reset();
        self.input = TickInput::default();
        self.scheduler.request_frame();
    }
}
