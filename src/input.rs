//! Input adapter
//!
//! Maps browser key names (`KeyboardEvent.key`) and pointer presses to the
//! logical signals the simulation consumes.

use crate::sim::{GameMode, InputSignal};

/// Key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

fn is_jump_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar" | "ArrowUp" | "w" | "W")
}

fn is_duck_key(key: &str) -> bool {
    matches!(key, "ArrowDown" | "s" | "S")
}

/// Signal for a key event, if any.
///
/// The jump key doubles as start on the menu and game over screens.
pub fn signal_for_key(key: &str, phase: KeyPhase, mode: GameMode) -> Option<InputSignal> {
    if is_duck_key(key) {
        return Some(match phase {
            KeyPhase::Down => InputSignal::DuckPressed,
            KeyPhase::Up => InputSignal::DuckReleased,
        });
    }
    if phase == KeyPhase::Up {
        return None;
    }

    if is_jump_key(key) {
        return match mode {
            GameMode::Playing => Some(InputSignal::Jump),
            GameMode::Menu | GameMode::GameOver => Some(InputSignal::Start),
            GameMode::Paused => None,
        };
    }
    match key {
        "Escape" | "p" | "P" => Some(InputSignal::PauseToggle),
        "Enter" | "r" | "R" => Some(InputSignal::Start),
        _ => None,
    }
}

/// Signal for a click or tap on the game surface
pub fn signal_for_pointer(mode: GameMode) -> InputSignal {
    match mode {
        GameMode::Playing => InputSignal::Jump,
        GameMode::Paused => InputSignal::PauseToggle,
        GameMode::Menu | GameMode::GameOver => InputSignal::Start,
    }
}

/// Host-level toggle, not a game signal
pub fn is_mute_key(key: &str) -> bool {
    matches!(key, "m" | "M")
}

/// Keys whose default browser action (scrolling) must be suppressed
pub fn captures_key(key: &str) -> bool {
    is_jump_key(key) || matches!(key, "ArrowDown")
}
