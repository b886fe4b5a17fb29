//! Data-driven game balance
//!
//! Every gameplay number lives here so balance can be tweaked from a JSON
//! file without a rebuild. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The run-in never gets shorter than this
const MIN_SAFE_GATES: u32 = 3;

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub thrust: f32,
    pub player_x_fraction: f32,
    pub player_box_w: f32,
    pub player_box_h: f32,
    pub player_pickup_radius: f32,
    pub boundary_inset: f32,

    pub heat_max: f32,
    pub heat_inc: f32,
    pub heat_dec: f32,

    pub start_speed: f32,
    pub max_speed: f32,
    pub speed_accel: f32,

    pub gate_w: f32,
    pub gate_gap_min: f32,
    pub gate_gap_max: f32,
    pub gate_interval: f32,
    pub safe_gates: u32,
    pub spawn_margin: f32,

    pub coin_r: f32,
    pub shield_r: f32,
    pub coin_chance: f64,
    pub shield_chance: f64,
    pub coin_bonus: u64,
    pub shield_duration: f32,
    pub pickup_gap_margin: f32,
    pub pickup_prune_margin: f32,
    pub coin_spin_rate: f32,

    /// Frame delta cap (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            thrust: THRUST,
            player_x_fraction: PLAYER_X_FRACTION,
            player_box_w: PLAYER_BOX_W,
            player_box_h: PLAYER_BOX_H,
            player_pickup_radius: PLAYER_PICKUP_RADIUS,
            boundary_inset: BOUNDARY_INSET,

            heat_max: HEAT_MAX,
            heat_inc: HEAT_INC,
            heat_dec: HEAT_DEC,

            start_speed: START_SPEED,
            max_speed: MAX_SPEED,
            speed_accel: SPEED_ACCEL,

            gate_w: GATE_W,
            gate_gap_min: GATE_GAP_MIN,
            gate_gap_max: GATE_GAP_MAX,
            gate_interval: GATE_INTERVAL,
            safe_gates: SAFE_GATES,
            spawn_margin: SPAWN_MARGIN,

            coin_r: COIN_R,
            shield_r: SHIELD_R,
            coin_chance: COIN_CHANCE,
            shield_chance: SHIELD_CHANCE,
            coin_bonus: COIN_BONUS,
            shield_duration: SHIELD_DURATION,
            pickup_gap_margin: PICKUP_GAP_MARGIN,
            pickup_prune_margin: PICKUP_PRUNE_MARGIN,
            coin_spin_rate: COIN_SPIN_RATE,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Unknown fields are ignored, missing ones default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would break simulation invariants
    pub(crate) fn sanitize(&mut self) {
        if self.max_speed < self.start_speed {
            self.max_speed = self.start_speed;
        }
        if self.gate_gap_max < self.gate_gap_min {
            std::mem::swap(&mut self.gate_gap_max, &mut self.gate_gap_min);
        }
        self.heat_max = self.heat_max.max(1.0);
        self.safe_gates = self.safe_gates.max(MIN_SAFE_GATES);
        self.gate_interval = self.gate_interval.max(0.05);
        self.max_frame_dt = self.max_frame_dt.max(0.001);
        self.coin_chance = self.coin_chance.clamp(0.0, 1.0);
        self.shield_chance = self.shield_chance.clamp(0.0, 1.0);
    }

    /// Speed progress from 0 (start speed) to 1 (max speed)
    pub fn speed_progress(&self, speed: f32) -> f32 {
        let span = self.max_speed - self.start_speed + 0.0001;
        crate::clamp((speed - self.start_speed) / span, 0.0, 1.0)
    }
}
