//! Collision tests
//!
//! The player is a fixed-size box for solid geometry and a point with a
//! generous radius for pickups.

use glam::Vec2;

use super::state::{Field, Gate, Player};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Overlap test. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x > other.x + other.w
            || self.x + self.w < other.x
            || self.y > other.y + other.h
            || self.y + self.h < other.y)
    }
}

/// Player hit box
pub fn player_box(player: &Player, tuning: &Tuning) -> Rect {
    Rect::centered(player.pos, tuning.player_box_w, tuning.player_box_h)
}

/// The two solid blocks of a gate: above the gap and below it
pub fn gate_blocks(gate: &Gate, gate_w: f32, field: Field) -> [Rect; 2] {
    let top = Rect::new(gate.x(), 0.0, gate_w, gate.gap_top());
    let bottom_y = gate.gap_bottom();
    let bottom = Rect::new(gate.x(), bottom_y, gate_w, field.height - bottom_y);
    [top, bottom]
}

/// True if the player box touches either solid block of the gate
pub fn player_hits_gate(player: &Player, gate: &Gate, tuning: &Tuning, field: Field) -> bool {
    let hit_box = player_box(player, tuning);
    gate_blocks(gate, tuning.gate_w, field)
        .iter()
        .any(|block| hit_box.overlaps(block))
}

/// Proximity check between the player and a round pickup
pub fn player_touches_pickup(player: &Player, center: Vec2, radius: f32, tuning: &Tuning) -> bool {
    let reach = radius + tuning.player_pickup_radius;
    player.pos.distance_squared(center) <= reach * reach
}
