//! Gate and pickup placement
//!
//! Each spawn keeps the course playable: the next gap is never smaller
//! than a floor, never further than a fixed vertical shift from the last
//! one, and never closer than a minimum horizontal gap. All limits are
//! derived from the current field size.

use glam::Vec2;

use super::state::{Coin, Field, Gate, ShieldToken, World};
use crate::{clamp, lerp};

/// Absolute floor for a gap height (px), raised by `GAP_FLOOR_FRACTION`
const GAP_FLOOR: f32 = 180.0;
const GAP_FLOOR_FRACTION: f32 = 0.24;
/// Gap height ceiling after the run-in
const GAP_CEILING: f32 = 240.0;
const GAP_CEILING_FRACTION: f32 = 0.28;
/// Largest vertical jump between consecutive gap centers
const MAX_SHIFT: f32 = 90.0;
const MAX_SHIFT_FRACTION: f32 = 0.22;
/// Clear space between consecutive gates
const MIN_X_GAP: f32 = 140.0;
const MIN_X_GAP_FRACTION: f32 = 0.18;
/// Run-in gap height band
const SAFE_GAP: f32 = 260.0;
const SAFE_GAP_FRACTION: f32 = 0.3;
const SAFE_GAP_CAP: f32 = 340.0;
/// Run-in gap center jitter around mid-field
const SAFE_JITTER: f32 = 20.0;
/// Initial pickup offset from the gap center, as a fraction of the gap
const PICKUP_SPREAD: f32 = 0.25;
/// Vertical drift speed limits (px/s)
const COIN_DRIFT: f32 = 10.0;
const SHIELD_DRIFT: f32 = 8.0;

/// Placement limits for one field size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnLimits {
    /// Smallest allowed gap height
    pub min_gap: f32,
    /// Largest gap height after the run-in
    pub gap_ceiling: f32,
    /// Largest `|b.gap_y - a.gap_y|` between consecutive gates
    pub max_shift: f32,
    /// Smallest clear space between consecutive gates
    pub min_x_gap: f32,
    /// Gap height of run-in gates
    pub safe_gap: f32,
}

impl SpawnLimits {
    pub fn for_field(field: Field) -> Self {
        let min_gap = GAP_FLOOR.max(field.height * GAP_FLOOR_FRACTION);
        Self {
            min_gap,
            gap_ceiling: GAP_CEILING.max(field.height * GAP_CEILING_FRACTION),
            max_shift: MAX_SHIFT.max(field.height * MAX_SHIFT_FRACTION),
            min_x_gap: MIN_X_GAP.max(field.width * MIN_X_GAP_FRACTION),
            safe_gap: SAFE_GAP
                .max(field.height * SAFE_GAP_FRACTION)
                .min(SAFE_GAP_CAP)
                .max(min_gap),
        }
    }
}

/// Append one gate (maybe with a coin and/or shield token) to the world
pub fn spawn_one_gate(world: &mut World) {
    let field = world.field;
    let limits = SpawnLimits::for_field(field);
    let tuning = world.tuning.clone();

    let (gap_h, target) = if world.safe_gates > 0 {
        world.safe_gates -= 1;
        let jitter = world.rng.range(-SAFE_JITTER, SAFE_JITTER);
        (limits.safe_gap, field.height * 0.5 + jitter)
    } else {
        let progress = tuning.speed_progress(world.speed);
        let gap_h = clamp(
            lerp(tuning.gate_gap_max, tuning.gate_gap_min, progress),
            limits.min_gap,
            limits.gap_ceiling,
        );
        let target = world
            .rng
            .range(gap_h * 0.5, field.height - gap_h * 0.5);
        (gap_h, target)
    };

    // The slope bound wins over everything else
    let gap_y = clamp(
        target,
        world.last_gap_y - limits.max_shift,
        world.last_gap_y + limits.max_shift,
    );
    world.last_gap_y = gap_y;

    let candidate_x = field.width + tuning.spawn_margin;
    let x = match world.last_gate_x {
        Some(last_x) => candidate_x.max(last_x + tuning.gate_w + limits.min_x_gap),
        None => candidate_x,
    };
    world.last_gate_x = Some(x);

    let gate = Gate::new(x, gap_y, gap_h);
    let center_x = x + tuning.gate_w / 2.0;

    if world.rng.chance(tuning.coin_chance) {
        let y = pickup_y(world, &gate, tuning.coin_r);
        let vel_y = world.rng.range(-COIN_DRIFT, COIN_DRIFT);
        let spin = world.rng.range(0.0, std::f32::consts::PI);
        world.coins.push(Coin {
            pos: Vec2::new(center_x, y),
            vel_y,
            spin,
        });
    }
    if world.rng.chance(tuning.shield_chance) {
        let y = pickup_y(world, &gate, tuning.shield_r);
        let vel_y = world.rng.range(-SHIELD_DRIFT, SHIELD_DRIFT);
        world.shields.push(ShieldToken {
            pos: Vec2::new(center_x, y),
            vel_y,
        });
    }

    log::trace!(
        "spawned gate x={:.1} gap_y={:.1} gap_h={:.1} (safe left: {})",
        x,
        gap_y,
        gap_h,
        world.safe_gates
    );
    world.gates.push(gate);
}

/// Random height inside the gap, kept `radius + margin` clear of both edges
fn pickup_y(world: &mut World, gate: &Gate, radius: f32) -> f32 {
    let spread = gate.gap_h() * PICKUP_SPREAD;
    let y = gate.gap_y() + world.rng.range(-spread, spread);
    let inset = radius + world.tuning.pickup_gap_margin;
    let lo = gate.gap_top() + inset;
    let hi = gate.gap_bottom() - inset;
    if lo > hi {
        gate.gap_y()
    } else {
        clamp(y, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn check_invariants(world: &World) -> Result<(), String> {
        let limits = SpawnLimits::for_field(world.field);
        let gate_w = world.tuning.gate_w;
        for (i, pair) in world.gates.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            let x_gap = b.x() - (a.x() + gate_w);
            if x_gap < limits.min_x_gap - 0.01 {
                return Err(format!("x gap {} at {}", x_gap, i + 1));
            }
            if b.gap_h() < limits.min_gap - 0.01 {
                return Err(format!("gap height {} at {}", b.gap_h(), i + 1));
            }
            let shift = (b.gap_y() - a.gap_y()).abs();
            if shift > limits.max_shift + 0.01 {
                return Err(format!("slope {} at {}", shift, i + 1));
            }
        }
        Ok(())
    }

    #[test]
    fn test_twenty_gates_hold_invariants() {
        let mut world = World::new(Tuning::default(), Field::new(360.0, 640.0), 2024);
        for _ in 0..20 {
            spawn_one_gate(&mut world);
        }
        assert_eq!(world.gates.len(), 20);
        assert_eq!(check_invariants(&world), Ok(()));
    }

    #[test]
    fn test_safe_gates_are_wide_and_centered() {
        let mut world = World::new(Tuning::default(), Field::new(360.0, 640.0), 9);
        let limits = SpawnLimits::for_field(world.field);
        for _ in 0..3 {
            spawn_one_gate(&mut world);
        }
        assert_eq!(world.safe_gates, 0);
        for gate in &world.gates {
            assert_eq!(gate.gap_h(), limits.safe_gap);
            assert!((gate.gap_y() - 320.0).abs() <= SAFE_JITTER);
        }
    }

    #[test]
    fn test_first_gate_spawns_just_off_screen() {
        let mut world = World::new(Tuning::default(), Field::new(360.0, 640.0), 1);
        spawn_one_gate(&mut world);
        assert_eq!(world.gates[0].x(), 370.0);
        assert_eq!(world.last_gate_x, Some(370.0));
    }

    #[test]
    fn test_pickups_stay_inside_gap() {
        let mut tuning = Tuning::default();
        tuning.coin_chance = 1.0;
        tuning.shield_chance = 1.0;
        let mut world = World::new(tuning, Field::new(360.0, 640.0), 77);
        for _ in 0..30 {
            spawn_one_gate(&mut world);
        }
        assert_eq!(world.coins.len(), 30);
        assert_eq!(world.shields.len(), 30);
        for (gate, coin) in world.gates.iter().zip(&world.coins) {
            assert!(coin.pos.y - world.tuning.coin_r > gate.gap_top());
            assert!(coin.pos.y + world.tuning.coin_r < gate.gap_bottom());
            assert_eq!(coin.pos.x, gate.x() + world.tuning.gate_w / 2.0);
        }
        for (gate, token) in world.gates.iter().zip(&world.shields) {
            assert!(token.pos.y - world.tuning.shield_r > gate.gap_top());
            assert!(token.pos.y + world.tuning.shield_r < gate.gap_bottom());
        }
    }

    #[test]
    fn test_resize_mid_run_keeps_slope_bound() {
        let mut world = World::new(Tuning::default(), Field::new(360.0, 640.0), 3);
        for _ in 0..6 {
            spawn_one_gate(&mut world);
        }
        let before = world.last_gap_y;
        world.resize(1200.0, 300.0);
        spawn_one_gate(&mut world);
        let limits = SpawnLimits::for_field(world.field);
        let gate = world.gates.last().unwrap();
        assert!((gate.gap_y() - before).abs() <= limits.max_shift + 0.01);
        assert!(gate.gap_h() >= limits.min_gap);
    }

    #[test]
    fn test_gap_shrinks_with_speed() {
        let mut world = World::new(Tuning::default(), Field::new(360.0, 640.0), 3);
        world.safe_gates = 0;
        spawn_one_gate(&mut world);
        let slow = world.gates[0].gap_h();
        world.speed = world.tuning.max_speed;
        spawn_one_gate(&mut world);
        let fast = world.gates[1].gap_h();
        assert!(fast <= slow);
        assert!(fast >= SpawnLimits::for_field(world.field).min_gap);
    }

    proptest! {
        #[test]
        fn spawned_gates_hold_invariants(
            seed in any::<u64>(),
            width in 200.0f32..2000.0,
            height in 200.0f32..2000.0,
            speed in 180.0f32..420.0,
            count in 2usize..40,
        ) {
            let mut world = World::new(Tuning::default(), Field::new(width, height), seed);
            world.speed = speed;
            for _ in 0..count {
                spawn_one_gate(&mut world);
            }
            prop_assert_eq!(check_invariants(&world), Ok(()));
        }
    }
}
