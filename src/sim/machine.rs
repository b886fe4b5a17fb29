//! Game modes and the per-frame driver
//!
//! [`Game`] owns the world and the mode, takes normalized [`Command`]s and
//! advances the simulation once per display frame.

use super::state::{Coin, Field, GameEvent, Gate, Mode, Player, Shake, ShieldToken, World};
use super::tick::{TickInput, TickOutcome, tick};
use crate::best_score::BestScore;
use crate::persistence::KeyValueStore;
use crate::tuning::Tuning;

/// Input commands, independent of the device that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PressThrust,
    ReleaseThrust,
    TogglePause,
    Restart,
    Start,
    NavigateToMenu,
}

/// Final numbers of the last finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub coins: u32,
    pub best: u64,
    pub new_best: bool,
}

/// Read-only view handed to the presentation layer each frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub field: Field,
    /// Entity sizes for drawing
    pub tuning: &'a Tuning,
    pub player: &'a Player,
    pub gates: &'a [Gate],
    pub coins: &'a [Coin],
    pub shields: &'a [ShieldToken],
    pub events: &'a [GameEvent],
    pub score: u64,
    pub coins_taken: u32,
    pub best: u64,
    /// Heat gauge in `[0, 1]`
    pub heat: f32,
    pub thrusting: bool,
    pub shake: Shake,
    pub elapsed: f32,
    pub speed: f32,
}

/// A game session: one world, one best score, many runs
pub struct Game<S: KeyValueStore> {
    world: World,
    mode: Mode,
    thrust_held: bool,
    best: BestScore<S>,
    last_run: Option<RunSummary>,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(store: S, tuning: Tuning, field: Field, seed: u64) -> Self {
        let best = BestScore::load(store);
        log::info!("game ready (seed {}, best {})", seed, best.get());
        Self {
            world: World::new(tuning, field, seed),
            mode: Mode::Menu,
            thrust_held: false,
            best,
            last_run: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn best(&self) -> u64 {
        self.best.get()
    }

    pub fn thrust_held(&self) -> bool {
        self.thrust_held
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Apply one command. Commands that don't match a valid transition are ignored.
    pub fn apply(&mut self, command: Command) {
        match (command, self.mode) {
            (Command::PressThrust, _) => self.thrust_held = true,
            (Command::ReleaseThrust, _) => self.thrust_held = false,

            (Command::Start, Mode::Menu | Mode::GameOver) => self.begin_run(),
            (Command::Restart, Mode::Playing | Mode::GameOver) => self.begin_run(),

            (Command::TogglePause, Mode::Playing) => self.set_mode(Mode::Paused),
            (Command::TogglePause, Mode::Paused) => self.set_mode(Mode::Playing),

            (Command::NavigateToMenu, Mode::Menu) => {}
            (Command::NavigateToMenu, _) => self.set_mode(Mode::Menu),

            (command, mode) => log::trace!("ignored {:?} in {:?}", command, mode),
        }
    }

    /// Advance one display frame. Only `Playing` moves the world.
    pub fn frame(&mut self, raw_dt: f32) -> TickOutcome {
        let dt = clamp_frame_dt(raw_dt, self.world.tuning.max_frame_dt);
        self.world.events.clear();
        self.world.shake.decay(dt);
        if self.mode != Mode::Playing {
            return TickOutcome::Alive;
        }

        let input = TickInput {
            thrust: self.thrust_held,
        };
        let outcome = tick(&mut self.world, input, dt);
        if outcome == TickOutcome::Crashed {
            self.end_run();
        }
        outcome
    }

    /// Re-derive the field from the display surface
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
        log::debug!("field resized to {}x{}", width, height);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let world = &self.world;
        Snapshot {
            mode: self.mode,
            field: world.field,
            tuning: &world.tuning,
            player: &world.player,
            gates: &world.gates,
            coins: &world.coins,
            shields: &world.shields,
            events: &world.events,
            score: world.score,
            coins_taken: world.coins_taken,
            best: self.best.get(),
            heat: world.heat_fraction(),
            thrusting: self.thrust_held && !world.player.overheated,
            shake: world.shake,
            elapsed: world.time,
            speed: world.speed,
        }
    }

    fn begin_run(&mut self) {
        self.world.reset();
        self.set_mode(Mode::Playing);
        log::info!("run started");
    }

    fn end_run(&mut self) {
        let score = self.world.score;
        let new_best = self.best.record(score);
        if new_best {
            self.world.events.push(GameEvent::NewBest { score });
            log::info!("new best score: {}", score);
        }
        self.last_run = Some(RunSummary {
            score,
            coins: self.world.coins_taken,
            best: self.best.get(),
            new_best,
        });
        self.set_mode(Mode::GameOver);
    }

    fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }
}

/// Clamp a raw frame delta into `[0, max]`. Non-finite deltas become zero.
pub fn clamp_frame_dt(raw_dt: f32, max: f32) -> f32 {
    if raw_dt.is_finite() {
        raw_dt.min(max).max(0.0)
    } else {
        0.0
    }
}
