//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One clamped step per display frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod machine;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, gate_blocks, player_box, player_hits_gate, player_touches_pickup};
pub use machine::{Command, Game, RunSummary, Snapshot, clamp_frame_dt};
pub use rng::GameRng;
pub use spawner::{SpawnLimits, spawn_one_gate};
pub use state::{Coin, Field, GameEvent, Gate, Mode, Player, Shake, ShieldToken, World};
pub use tick::{TickInput, TickOutcome, integrate_player, tick};
