//! Game mode transitions
//!
//! Menu -> Playing -> (Paused <-> Playing) -> GameOver -> Playing | Menu.
//! Anything else is ignored; input races are expected and never fatal.

use serde::{Deserialize, Serialize};

use super::collision::end_run;
use super::config::RunnerConfig;
use super::physics;
use super::state::{GameEvent, GameMode, GameState};

/// The logical inputs the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSignal {
    Jump,
    DuckPressed,
    DuckReleased,
    PauseToggle,
    /// Start from the menu or restart after game over
    Start,
}

/// What an input did to the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// A fresh run began; the frame clock must be re-armed
    Started,
    Paused,
    /// Back to playing; the frame clock must be re-armed
    Resumed,
}

impl Transition {
    pub fn rearms_clock(&self) -> bool {
        matches!(self, Transition::Started | Transition::Resumed)
    }
}

/// Apply one input signal
pub fn apply_input(state: &mut GameState, config: &RunnerConfig, signal: InputSignal) -> Transition {
    match (state.mode, signal) {
        (GameMode::Menu | GameMode::GameOver, InputSignal::Start) => {
            state.reset(config, GameMode::Playing);
            log::info!("Run started (high score {})", state.high_score);
            Transition::Started
        }
        (GameMode::Playing, InputSignal::PauseToggle) => {
            state.mode = GameMode::Paused;
            log::info!("Paused at distance {:.0}", state.distance);
            Transition::Paused
        }
        (GameMode::Paused, InputSignal::PauseToggle) => {
            state.mode = GameMode::Playing;
            log::info!("Resumed");
            Transition::Resumed
        }
        (GameMode::Playing, InputSignal::Jump) => {
            if physics::jump(&mut state.player, config) {
                state.events.push(GameEvent::Jump);
            }
            Transition::None
        }
        (GameMode::Playing, InputSignal::DuckPressed) => {
            physics::set_duck(&mut state.player, true);
            Transition::None
        }
        // Key-up can arrive while paused; don't leave the duck stuck
        (GameMode::Playing | GameMode::Paused, InputSignal::DuckReleased) => {
            physics::set_duck(&mut state.player, false);
            Transition::None
        }
        _ => Transition::None,
    }
}

/// Leave a finished or paused run for the menu.
///
/// An abandoned paused run still counts toward the high score.
pub fn return_to_menu(state: &mut GameState, config: &RunnerConfig) -> bool {
    match state.mode {
        GameMode::Paused => {
            end_run(state);
            state.reset(config, GameMode::Menu);
            true
        }
        GameMode::GameOver => {
            state.reset(config, GameMode::Menu);
            true
        }
        GameMode::Menu | GameMode::Playing => false,
    }
}

/// Drop whatever run is in progress because the host is going away.
///
/// Unlike [`return_to_menu`] this also ends a live run, folding its score
/// into the high score. Returns true when a run was ended.
pub fn abandon_run(state: &mut GameState, config: &RunnerConfig) -> bool {
    match state.mode {
        GameMode::Playing | GameMode::Paused => {
            log::info!("Run abandoned at score {}", state.score);
            end_run(state);
            state.reset(config, GameMode::Menu);
            true
        }
        GameMode::Menu | GameMode::GameOver => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Posture;

    fn setup() -> (GameState, RunnerConfig) {
        let config = RunnerConfig::default();
        (GameState::new(5, 0, &config), config)
    }

    #[test]
    fn test_start_from_menu() {
        let (mut state, config) = setup();
        assert_eq!(
            apply_input(&mut state, &config, InputSignal::Start),
            Transition::Started
        );
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_pause_in_menu_is_noop() {
        let (mut state, config) = setup();
        assert_eq!(
            apply_input(&mut state, &config, InputSignal::PauseToggle),
            Transition::None
        );
        assert_eq!(state.mode, GameMode::Menu);
    }

    #[test]
    fn test_jump_in_menu_is_noop() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Jump);
        assert_eq!(state.player.posture, Posture::Standing);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pause_resume_cycle() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        let paused = apply_input(&mut state, &config, InputSignal::PauseToggle);
        assert_eq!(paused, Transition::Paused);
        assert!(!paused.rearms_clock());
        assert_eq!(state.mode, GameMode::Paused);

        // Start while paused does nothing
        apply_input(&mut state, &config, InputSignal::Start);
        assert_eq!(state.mode, GameMode::Paused);

        let resumed = apply_input(&mut state, &config, InputSignal::PauseToggle);
        assert_eq!(resumed, Transition::Resumed);
        assert!(resumed.rearms_clock());
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_start_while_playing_does_not_reset() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        state.score = 77;
        assert_eq!(
            apply_input(&mut state, &config, InputSignal::Start),
            Transition::None
        );
        assert_eq!(state.score, 77);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        state.score = 90;
        state.mode = GameMode::GameOver;
        state.finalize_high_score();

        assert_eq!(
            apply_input(&mut state, &config, InputSignal::Start),
            Transition::Started
        );
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 90);
    }

    #[test]
    fn test_jump_emits_event_once() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        apply_input(&mut state, &config, InputSignal::Jump);
        apply_input(&mut state, &config, InputSignal::Jump);
        assert_eq!(state.drain_events(), vec![GameEvent::Jump]);
    }

    #[test]
    fn test_duck_release_while_paused() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        apply_input(&mut state, &config, InputSignal::DuckPressed);
        assert_eq!(state.player.posture, Posture::Ducking);
        apply_input(&mut state, &config, InputSignal::PauseToggle);
        apply_input(&mut state, &config, InputSignal::DuckReleased);
        assert_eq!(state.player.posture, Posture::Standing);
        assert!(!state.player.duck_held);
    }

    #[test]
    fn test_return_to_menu_from_pause_keeps_score() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        state.score = 40;
        apply_input(&mut state, &config, InputSignal::PauseToggle);

        assert!(return_to_menu(&mut state, &config));
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.high_score, 40);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::RunEnded { score: 40, .. })
        ));
    }

    #[test]
    fn test_return_to_menu_rejected_while_playing() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        assert!(!return_to_menu(&mut state, &config));
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_abandon_live_run_keeps_score() {
        let (mut state, config) = setup();
        apply_input(&mut state, &config, InputSignal::Start);
        state.score = 500;

        assert!(abandon_run(&mut state, &config));
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.high_score, 500);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::RunEnded {
                score: 500,
                new_high_score: true,
                ..
            })
        ));
    }

    #[test]
    fn test_abandon_without_run_is_noop() {
        let (mut state, config) = setup();
        assert!(!abandon_run(&mut state, &config));
        assert!(state.events.is_empty());
    }
}
