//! Synthwave Runner - the endless runner behind the portfolio's 404 page
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, spawning, collisions, state machine)
//! - `game`: Host-agnostic driver tying the clock, simulation and high score together
//! - `snapshot`: Read-only render data
//! - `input`: Keyboard/pointer mapping to logical signals
//! - `persistence` / `highscores` / `settings`: Key-value storage and what lives in it
//! - `audio`: Sound cues (Web Audio on wasm32)
//! - `autopilot`: Scripted player for headless native runs
//! - `renderer`: Screen layout and Canvas 2D drawing (wasm32)

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use highscores::HighScoreStore;
pub use settings::Settings;
pub use snapshot::RenderSnapshot;

/// Frame clock constants
pub mod consts {
    /// One reference frame at 60 fps
    pub const TARGET_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest delta fed to physics; longer frames are clamped
    pub const MAX_FRAME_MS: f32 = 50.0;
}
