//! Simulation step
//!
//! Advances the world by one clamped frame delta: scroll speed, spawning,
//! jetpack physics, boundaries, scrolling, scoring, collisions, pruning.

use super::collision::{gate_blocks, player_hits_gate, player_touches_pickup};
use super::spawner::spawn_one_gate;
use super::state::{CRASH_SHAKE, GameEvent, NUDGE_SHAKE, Player, World};
use crate::clamp;
use crate::tuning::Tuning;

/// Input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thrust is held this step
    pub thrust: bool,
}

/// What the step did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    /// Fatal collision; the run is over
    Crashed,
}

/// Advance the world by `dt` seconds.
///
/// `dt` is expected to be clamped by the caller already.
pub fn tick(world: &mut World, input: TickInput, dt: f32) -> TickOutcome {
    world.events.clear();
    world.time += dt;

    let tuning = &world.tuning;
    world.speed = (world.speed + tuning.speed_accel * dt).min(tuning.max_speed);

    world.spawn_timer -= dt;
    if world.spawn_timer <= 0.0 {
        world.spawn_timer = world.tuning.gate_interval;
        spawn_one_gate(world);
    }

    integrate_player(&mut world.player, &world.tuning, input.thrust, dt);

    // Floor is fatal, ceiling only stops the climb
    let floor = world.field.height - world.tuning.boundary_inset;
    let ceiling = world.tuning.boundary_inset;
    if world.player.pos.y > floor {
        world.player.pos.y = floor;
        return crash(world);
    }
    if world.player.pos.y < ceiling {
        world.player.pos.y = ceiling;
        world.player.vel_y = world.player.vel_y.max(0.0);
    }

    scroll(world, dt);

    if resolve_gates(world) == TickOutcome::Crashed {
        return crash(world);
    }
    collect_pickups(world);

    let player = &mut world.player;
    if player.shield {
        player.shield_timer -= dt;
        if player.shield_timer <= 0.0 {
            player.clear_shield();
        }
    }

    let cutoff = -(world.tuning.gate_w + 10.0);
    world.gates.retain(|g| g.x() > cutoff);

    TickOutcome::Alive
}

/// Heat, thrust, gravity. Semi-implicit Euler: velocity first, then position.
pub fn integrate_player(player: &mut Player, tuning: &Tuning, thrust: bool, dt: f32) {
    if thrust && !player.overheated {
        player.vel_y += tuning.thrust * dt;
        player.heat += tuning.heat_inc * dt;
    } else {
        player.heat -= tuning.heat_dec * dt;
    }
    player.heat = clamp(player.heat, 0.0, tuning.heat_max);
    player.overheated = thrust && player.heat >= tuning.heat_max - 0.001;

    player.vel_y += tuning.gravity * dt;
    player.pos.y += player.vel_y * dt;
}

/// Move everything left by the scroll distance; pickups also drift
fn scroll(world: &mut World, dt: f32) {
    let dx = world.speed * dt;
    for gate in &mut world.gates {
        gate.scroll(dx);
    }
    if let Some(x) = world.last_gate_x.as_mut() {
        *x -= dx;
    }
    let spin_rate = world.tuning.coin_spin_rate;
    for coin in &mut world.coins {
        coin.pos.x -= dx;
        coin.pos.y += coin.vel_y * dt;
        coin.spin += spin_rate * dt;
    }
    for token in &mut world.shields {
        token.pos.x -= dx;
        token.pos.y += token.vel_y * dt;
    }
}

/// Score passed gates and resolve gate hits
fn resolve_gates(world: &mut World) -> TickOutcome {
    let gate_w = world.tuning.gate_w;
    let field = world.field;
    for gate in &mut world.gates {
        if gate.x() + gate_w < world.player.pos.x && gate.mark_scored() {
            world.score += 1;
            world.events.push(GameEvent::GatePassed { score: world.score });
        }

        if !player_hits_gate(&world.player, gate, &world.tuning, field) {
            continue;
        }
        if !world.player.shield {
            return TickOutcome::Crashed;
        }

        // Shield soaks the hit and nudges the pilot back into the gap
        world.player.clear_shield();
        let half_h = world.tuning.player_box_h / 2.0 + 1.0;
        let [top, bottom] = gate_blocks(gate, gate_w, field);
        let lo = top.y + top.h + half_h;
        let hi = bottom.y - half_h;
        if lo <= hi {
            world.player.pos.y = clamp(world.player.pos.y, lo, hi);
        }
        world.player.vel_y = 0.0;
        world.shake.trigger(NUDGE_SHAKE.0, NUDGE_SHAKE.1);
        world.events.push(GameEvent::ShieldNudge);
        log::debug!("shield absorbed a gate hit");
    }
    TickOutcome::Alive
}

fn collect_pickups(world: &mut World) {
    let tuning = &world.tuning;
    let player = &mut world.player;
    let margin = tuning.pickup_prune_margin;
    let height = world.field.height;
    let in_bounds = |x: f32, y: f32| x > -margin && y > -margin && y < height + margin;

    let events = &mut world.events;
    let score = &mut world.score;
    let coins_taken = &mut world.coins_taken;
    world.coins.retain(|coin| {
        if player_touches_pickup(player, coin.pos, tuning.coin_r, tuning) {
            *coins_taken += 1;
            *score += tuning.coin_bonus;
            events.push(GameEvent::CoinCollected { pos: coin.pos });
            return false;
        }
        in_bounds(coin.pos.x, coin.pos.y)
    });

    world.shields.retain(|token| {
        if player_touches_pickup(player, token.pos, tuning.shield_r, tuning) {
            player.grant_shield(tuning.shield_duration);
            events.push(GameEvent::ShieldCollected { pos: token.pos });
            return false;
        }
        in_bounds(token.pos.x, token.pos.y)
    });
}

fn crash(world: &mut World) -> TickOutcome {
    world.shake.trigger(CRASH_SHAKE.0, CRASH_SHAKE.1);
    world.events.push(GameEvent::Crash { score: world.score });
    log::info!(
        "crash after {:.1}s: score {} ({} coins)",
        world.time,
        world.score,
        world.coins_taken
    );
    TickOutcome::Crashed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::sim::state::{Coin, Field, Gate, ShieldToken};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(Tuning::default(), Field::new(360.0, 640.0), 4242)
    }

    /// Keep the spawner quiet so tests control every entity
    fn quiet_world() -> World {
        let mut w = world();
        w.spawn_timer = 1000.0;
        w
    }

    #[test]
    fn test_first_tick_spawns_gate() {
        let mut w = world();
        tick(&mut w, TickInput::default(), DT);
        assert_eq!(w.gates.len(), 1);
        assert!((w.spawn_timer - w.tuning.gate_interval).abs() < 1e-6);
    }

    #[test]
    fn test_speed_increases_to_cap() {
        let mut w = quiet_world();
        let start = w.speed;
        tick(&mut w, TickInput { thrust: true }, DT);
        assert!(w.speed > start);
        w.speed = w.tuning.max_speed - 0.001;
        w.player.pos.y = 320.0;
        tick(&mut w, TickInput { thrust: true }, DT);
        assert_eq!(w.speed, w.tuning.max_speed);
    }

    #[test]
    fn test_thrust_lifts_and_heats() {
        let mut w = quiet_world();
        let y0 = w.player.pos.y;
        tick(&mut w, TickInput { thrust: true }, DT);
        assert!(w.player.vel_y < 0.0);
        assert!(w.player.pos.y < y0);
        assert!(w.player.heat > 0.0);
    }

    #[test]
    fn test_floor_crash() {
        let mut w = quiet_world();
        w.player.pos.y = w.field.height - 7.0;
        w.player.vel_y = 300.0;
        assert_eq!(tick(&mut w, TickInput::default(), DT), TickOutcome::Crashed);
        assert_eq!(w.player.pos.y, w.field.height - w.tuning.boundary_inset);
        assert!(w.events.contains(&GameEvent::Crash { score: 0 }));
        assert!(w.shake.current() > 0.0);
    }

    #[test]
    fn test_ceiling_clips_velocity() {
        let mut w = quiet_world();
        w.player.pos.y = 7.0;
        w.player.vel_y = -900.0;
        assert_eq!(tick(&mut w, TickInput { thrust: true }, DT), TickOutcome::Alive);
        assert_eq!(w.player.pos.y, w.tuning.boundary_inset);
        assert!(w.player.vel_y >= 0.0);
    }

    #[test]
    fn test_gate_scored_exactly_once() {
        let mut w = quiet_world();
        // Trailing edge just ahead of the player, gap around the player
        let x = w.player.pos.x - w.tuning.gate_w + 1.0;
        w.gates.push(Gate::new(x, w.player.pos.y, 300.0));
        w.last_gate_x = Some(x);
        w.player.vel_y = 0.0;

        tick(&mut w, TickInput { thrust: true }, DT);
        assert_eq!(w.score, 1);
        assert!(w.gates[0].scored());
        assert!(w.events.contains(&GameEvent::GatePassed { score: 1 }));

        tick(&mut w, TickInput { thrust: true }, DT);
        assert_eq!(w.score, 1);
    }

    #[test]
    fn test_unshielded_gate_hit_crashes() {
        let mut w = quiet_world();
        w.gates.push(Gate::new(w.player.pos.x - 10.0, 100.0, 100.0));
        assert_eq!(tick(&mut w, TickInput::default(), DT), TickOutcome::Crashed);
    }

    #[test]
    fn test_shield_absorbs_gate_hit() {
        let mut w = quiet_world();
        w.player.grant_shield(6.0);
        let gate_y = 150.0;
        w.gates.push(Gate::new(w.player.pos.x - 10.0, gate_y, 200.0));

        assert_eq!(tick(&mut w, TickInput::default(), DT), TickOutcome::Alive);
        assert!(!w.player.shield);
        assert_eq!(w.player.shield_timer, 0.0);
        assert!(w.events.contains(&GameEvent::ShieldNudge));
        assert!(w.shake.current() > 0.0);
        // Nudged into the gap, so the next step is survivable
        assert!(w.player.pos.y < gate_y + 100.0);
        assert_eq!(tick(&mut w, TickInput::default(), DT), TickOutcome::Alive);
    }

    #[test]
    fn test_coin_collected() {
        let mut w = quiet_world();
        let pos = w.player.pos + Vec2::new(5.0, 0.0);
        w.coins.push(Coin { pos, vel_y: 0.0, spin: 0.0 });

        tick(&mut w, TickInput { thrust: true }, DT);
        assert_eq!(w.coins_taken, 1);
        assert_eq!(w.score, w.tuning.coin_bonus);
        assert!(w.coins.is_empty());
    }

    #[test]
    fn test_shield_token_collected_and_expires() {
        let mut w = quiet_world();
        let pos = w.player.pos;
        w.shields.push(ShieldToken { pos, vel_y: 0.0 });

        tick(&mut w, TickInput { thrust: true }, DT);
        assert!(w.player.shield);
        assert!(w.shields.is_empty());
        assert!(w.player.shield_timer <= w.tuning.shield_duration);

        w.player.shield_timer = DT / 2.0;
        w.player.pos.y = 320.0;
        w.player.vel_y = 0.0;
        tick(&mut w, TickInput { thrust: true }, DT);
        assert!(!w.player.shield);
    }

    #[test]
    fn test_offscreen_entities_pruned() {
        let mut w = quiet_world();
        w.coins.push(Coin {
            pos: Vec2::new(-39.0, 300.0),
            vel_y: 0.0,
            spin: 0.0,
        });
        w.shields.push(ShieldToken {
            pos: Vec2::new(200.0, 700.0),
            vel_y: 0.0,
        });
        w.gates.push(Gate::new(-w.tuning.gate_w - 9.0, 300.0, 200.0));

        tick(&mut w, TickInput { thrust: true }, DT);
        assert!(w.coins.is_empty());
        assert!(w.shields.is_empty());
        assert!(w.gates.is_empty());
    }

    #[test]
    fn test_overheat_cuts_thrust() {
        let mut w = quiet_world();
        w.player.heat = w.tuning.heat_max;
        w.player.pos.y = 320.0;
        tick(&mut w, TickInput { thrust: true }, DT);
        // Saturated heat: this step still thrusts, then flags overheat
        assert!(w.player.overheated);

        let before = w.player.vel_y;
        w.player.pos.y = 320.0;
        tick(&mut w, TickInput { thrust: true }, DT);
        // No thrust while overheated: only gravity acts
        assert!(w.player.vel_y > before);
        assert!(!w.player.overheated);

        tick(&mut w, TickInput::default(), DT);
        assert!(!w.player.overheated);
    }

    proptest! {
        #[test]
        fn heat_stays_in_range(inputs in proptest::collection::vec((any::<bool>(), 0.0f32..MAX_FRAME_DT), 1..400)) {
            let tuning = Tuning::default();
            let mut player = Player::spawn(Field::default(), &tuning);
            for (thrust, dt) in inputs {
                integrate_player(&mut player, &tuning, thrust, dt);
                prop_assert!(player.heat >= 0.0 && player.heat <= tuning.heat_max);
                if player.overheated {
                    prop_assert!(thrust);
                    prop_assert!(player.heat >= tuning.heat_max - 0.001);
                }
            }
        }
    }
}
