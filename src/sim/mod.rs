//! Runner simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through [`FrameStep`]
//! - Seeded RNG only
//! - Entity lists kept in spawn order
//! - No rendering, storage or platform dependencies

pub mod buffs;
pub mod clock;
pub mod collision;
pub mod config;
pub mod machine;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use buffs::{ActiveBuffs, Buff};
pub use clock::{FrameStep, SimClock};
pub use collision::Aabb;
pub use config::{ConfigError, RunnerConfig};
pub use machine::{InputSignal, Transition, abandon_run, apply_input, return_to_menu};
pub use state::{
    COLLECTIBLE_SIZE, Collectible, GameEvent, GameMode, GameState, Obstacle, ObstacleKind,
    POWER_UP_SIZE, Player, Posture, PowerUp, PowerUpKind,
};
pub use tick::tick;
