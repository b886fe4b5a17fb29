//! Jet Gates - an endless side-scrolling jetpack arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game modes)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `best_score`: Best score record on top of a key-value store
//! - `persistence`: Key-value stores (memory, JSON file, LocalStorage)
//! - `platform`: Host shell and raw input mapping

pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Largest frame delta fed to the simulation (long gaps, tab backgrounding)
    pub const MAX_FRAME_DT: f32 = 1.0 / 24.0;

    /// Downward acceleration, px/s²
    pub const GRAVITY: f32 = 1000.0;
    /// Upward acceleration while thrust is held, px/s²
    pub const THRUST: f32 = -2200.0;
    /// Player x as a fraction of field width
    pub const PLAYER_X_FRACTION: f32 = 0.24;
    /// Player collision box
    pub const PLAYER_BOX_W: f32 = 36.0;
    pub const PLAYER_BOX_H: f32 = 28.0;
    /// Added to a pickup radius for the proximity check
    pub const PLAYER_PICKUP_RADIUS: f32 = 22.0;
    /// Floor and ceiling inset from the field edges
    pub const BOUNDARY_INSET: f32 = 6.0;

    /// Jetpack heat
    pub const HEAT_MAX: f32 = 100.0;
    /// Heat gained per second while thrusting
    pub const HEAT_INC: f32 = 32.0;
    /// Heat lost per second otherwise
    pub const HEAT_DEC: f32 = 34.0;

    /// Scroll speed, px/s
    pub const START_SPEED: f32 = 180.0;
    pub const MAX_SPEED: f32 = 420.0;
    /// Scroll speed gain, px/s per second
    pub const SPEED_ACCEL: f32 = 3.5;

    /// Gate geometry
    pub const GATE_W: f32 = 78.0;
    /// Gap height at max speed / start speed
    pub const GATE_GAP_MIN: f32 = 160.0;
    pub const GATE_GAP_MAX: f32 = 260.0;
    /// Seconds between spawns
    pub const GATE_INTERVAL: f32 = 1.55;
    /// Wide centered gates at the start of every run
    pub const SAFE_GATES: u32 = 3;
    /// Spawn x offset past the right edge of the field
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Pickups
    pub const COIN_R: f32 = 10.0;
    pub const SHIELD_R: f32 = 12.0;
    pub const COIN_CHANCE: f64 = 0.5;
    pub const SHIELD_CHANCE: f64 = 0.1;
    pub const COIN_BONUS: u64 = 3;
    /// Shield lifetime in seconds
    pub const SHIELD_DURATION: f32 = 6.0;
    /// Extra clearance between a pickup and the gap edges
    pub const PICKUP_GAP_MARGIN: f32 = 8.0;
    /// Distance outside the field before a pickup is dropped
    pub const PICKUP_PRUNE_MARGIN: f32 = 40.0;
    /// Coin spin, radians per second
    pub const COIN_SPIN_RATE: f32 = 6.0;
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike [`f32::clamp`] this never panics; callers guarantee `lo <= hi`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
