//! Raw device input to game commands
//!
//! Key auto-repeat is dropped here so a held key never re-triggers a
//! start, pause or restart.

use crate::sim::{Command, Mode};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    P,
    R,
    Escape,
    Other,
}

/// One device event as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    /// Mouse button, touch or pen went down
    PointerDown,
    /// Pointer released, cancelled or left the surface
    PointerUp,
}

/// Commands for a raw event, given the current mode.
///
/// Thrust input outside a run also starts one.
pub fn map_input(input: RawInput, mode: Mode) -> Vec<Command> {
    let start_then_thrust = || {
        let mut commands = Vec::with_capacity(2);
        if matches!(mode, Mode::Menu | Mode::GameOver) {
            commands.push(Command::Start);
        }
        commands.push(Command::PressThrust);
        commands
    };

    match input {
        RawInput::KeyDown { repeat: true, .. } => Vec::new(),
        RawInput::KeyDown { key, .. } => match key {
            Key::Space => start_then_thrust(),
            Key::P => vec![Command::TogglePause],
            Key::R => vec![Command::Restart],
            Key::Escape => vec![Command::NavigateToMenu],
            Key::Other => Vec::new(),
        },
        RawInput::KeyUp { key: Key::Space } => vec![Command::ReleaseThrust],
        RawInput::KeyUp { .. } => Vec::new(),
        RawInput::PointerDown => start_then_thrust(),
        RawInput::PointerUp => vec![Command::ReleaseThrust],
    }
}
