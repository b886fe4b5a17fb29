//! World state and core simulation types
//!
//! Everything a run owns lives in [`World`]. Presentation only ever sees
//! it through a shared borrow.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use crate::tuning::Tuning;

/// Which overlay is up and whether the simulation advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Title screen
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run suspended, still rendered
    Paused,
    /// Run ended by a crash
    GameOver,
}

/// Play field size in logical pixels, re-derived from the display surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(360.0, 640.0)
    }
}

/// The jetpack pilot. Horizontal position is fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub vel_y: f32,
    /// Jetpack heat in `[0, heat_max]`
    pub heat: f32,
    /// Heat saturated while thrust is held
    pub overheated: bool,
    pub shield: bool,
    /// Seconds of shield left
    pub shield_timer: f32,
}

impl Player {
    /// Fresh pilot at the reset position for `field`
    pub fn spawn(field: Field, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                (field.width * tuning.player_x_fraction).floor(),
                field.height / 2.0,
            ),
            vel_y: 0.0,
            heat: 0.0,
            overheated: false,
            shield: false,
            shield_timer: 0.0,
        }
    }

    pub fn grant_shield(&mut self, duration: f32) {
        self.shield = true;
        self.shield_timer = duration;
    }

    pub fn clear_shield(&mut self) {
        self.shield = false;
        self.shield_timer = 0.0;
    }
}

/// A pass-through obstacle: solid above and below a vertical gap.
///
/// The gap never changes after construction; the gate only moves left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    x: f32,
    gap_y: f32,
    gap_h: f32,
    scored: bool,
}

impl Gate {
    pub fn new(x: f32, gap_y: f32, gap_h: f32) -> Self {
        debug_assert!(gap_h > 0.0, "gate gap must be positive");
        Self {
            x,
            gap_y,
            gap_h: gap_h.max(0.0),
            scored: false,
        }
    }

    /// Left edge
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Vertical center of the gap
    pub fn gap_y(&self) -> f32 {
        self.gap_y
    }

    pub fn gap_h(&self) -> f32 {
        self.gap_h
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_y - self.gap_h / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_h / 2.0
    }

    pub fn scored(&self) -> bool {
        self.scored
    }

    /// Move left by `dx` (never right)
    pub fn scroll(&mut self, dx: f32) {
        self.x -= dx.max(0.0);
    }

    /// Flag the gate as passed. Returns true only the first time.
    pub fn mark_scored(&mut self) -> bool {
        let first = !self.scored;
        self.scored = true;
        first
    }
}

/// Bonus coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Visual spin phase (radians)
    pub spin: f32,
}

/// Shield token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldToken {
    pub pos: Vec2,
    pub vel_y: f32,
}

/// Something that happened during the last simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GatePassed { score: u64 },
    CoinCollected { pos: Vec2 },
    ShieldCollected { pos: Vec2 },
    /// A shielded hit: shield consumed, run continues
    ShieldNudge,
    Crash { score: u64 },
    NewBest { score: u64 },
}

/// Camera shake request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Shake {
    pub magnitude: f32,
    /// Seconds left
    pub remaining: f32,
}

impl Shake {
    pub fn trigger(&mut self, magnitude: f32, seconds: f32) {
        self.magnitude = magnitude;
        self.remaining = seconds;
    }

    pub fn decay(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    /// Current magnitude, zero once expired
    pub fn current(&self) -> f32 {
        if self.remaining > 0.0 { self.magnitude } else { 0.0 }
    }
}

/// Shake on a fatal hit
pub const CRASH_SHAKE: (f32, f32) = (7.0, 0.32);
/// Shake when a shield absorbs a hit
pub const NUDGE_SHAKE: (f32, f32) = (3.0, 0.18);

/// All run-scoped state
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub field: Field,
    pub rng: GameRng,
    /// Seconds survived
    pub time: f32,
    /// Scroll speed, px/s
    pub speed: f32,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    pub score: u64,
    pub coins_taken: u32,
    /// Safe gates left in the run-in
    pub safe_gates: u32,
    /// Gap center of the last spawned gate
    pub last_gap_y: f32,
    /// Current left edge of the last spawned gate (scrolls with the world)
    pub last_gate_x: Option<f32>,
    pub player: Player,
    pub gates: Vec<Gate>,
    pub coins: Vec<Coin>,
    pub shields: Vec<ShieldToken>,
    pub shake: Shake,
    /// Events from the last step (cleared at the start of each step)
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn new(mut tuning: Tuning, field: Field, seed: u64) -> Self {
        tuning.sanitize();
        let player = Player::spawn(field, &tuning);
        let mut world = Self {
            speed: tuning.start_speed,
            safe_gates: tuning.safe_gates,
            last_gap_y: field.height * 0.5,
            tuning,
            field,
            rng: GameRng::new(seed),
            time: 0.0,
            spawn_timer: 0.0,
            score: 0,
            coins_taken: 0,
            last_gate_x: None,
            player,
            gates: Vec::new(),
            coins: Vec::new(),
            shields: Vec::new(),
            shake: Shake::default(),
            events: Vec::new(),
        };
        world.reset();
        world
    }

    /// Back to the start of a run. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.speed = self.tuning.start_speed;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.coins_taken = 0;
        self.safe_gates = self.tuning.safe_gates;
        self.last_gap_y = self.field.height * 0.5;
        self.last_gate_x = None;
        self.player = Player::spawn(self.field, &self.tuning);
        self.gates.clear();
        self.coins.clear();
        self.shields.clear();
        self.shake = Shake::default();
        self.events.clear();
    }

    /// Adopt a new display size. Takes effect on the next spawn.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Field::new(width, height);
    }

    /// Heat as a fraction of the maximum (HUD gauge)
    pub fn heat_fraction(&self) -> f32 {
        self.player.heat / self.tuning.heat_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn_position() {
        let player = Player::spawn(Field::new(360.0, 640.0), &Tuning::default());
        assert_eq!(player.pos, Vec2::new(86.0, 320.0));
        assert_eq!(player.heat, 0.0);
        assert!(!player.shield);
    }

    #[test]
    fn test_gate_scores_once() {
        let mut gate = Gate::new(100.0, 300.0, 200.0);
        assert!(gate.mark_scored());
        assert!(!gate.mark_scored());
        assert!(gate.scored());
    }

    #[test]
    fn test_gate_never_scrolls_right() {
        let mut gate = Gate::new(100.0, 300.0, 200.0);
        gate.scroll(-50.0);
        assert_eq!(gate.x(), 100.0);
        gate.scroll(25.0);
        assert_eq!(gate.x(), 75.0);
        assert_eq!(gate.gap_top(), 200.0);
        assert_eq!(gate.gap_bottom(), 400.0);
    }

    #[test]
    fn test_shake_expires() {
        let mut shake = Shake::default();
        shake.trigger(NUDGE_SHAKE.0, NUDGE_SHAKE.1);
        assert_eq!(shake.current(), 3.0);
        shake.decay(0.1);
        assert_eq!(shake.current(), 3.0);
        shake.decay(0.1);
        assert_eq!(shake.current(), 0.0);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut world = World::new(Tuning::default(), Field::default(), 5);
        world.score = 12;
        world.speed = 400.0;
        world.gates.push(Gate::new(10.0, 300.0, 200.0));
        world.player.grant_shield(6.0);
        world.safe_gates = 0;

        world.reset();
        assert_eq!(world.score, 0);
        assert_eq!(world.speed, world.tuning.start_speed);
        assert!(world.gates.is_empty());
        assert!(!world.player.shield);
        assert_eq!(world.safe_gates, world.tuning.safe_gates);
        assert_eq!(world.last_gate_x, None);
    }
}
