//! Runner state, entities and events
//!
//! Everything a run mutates lives in [`GameState`]. Coordinates are world
//! pixels with y measured upward from the ground line.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::buffs::ActiveBuffs;
use super::config::RunnerConfig;

/// Which part of the game loop is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for start input
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run frozen by the player or by the page losing focus
    Paused,
    /// Run ended on a fatal collision
    GameOver,
}

/// Player movement state (mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Posture {
    #[default]
    Standing,
    Jumping,
    Ducking,
}

/// The runner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    /// Height of the feet above the ground (0 = grounded)
    pub offset: f32,
    /// Vertical velocity, screen convention (negative = rising)
    pub velocity: f32,
    pub posture: Posture,
    /// Duck input is held; applied again on landing
    pub duck_held: bool,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall and thin, jump it
    Cactus,
    /// Low and wide, jump it
    Rock,
    /// Flies at head height, duck under it
    Bird,
}

impl ObstacleKind {
    /// Width and height in world pixels
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Cactus => Vec2::new(20.0, 45.0),
            ObstacleKind::Rock => Vec2::new(35.0, 25.0),
            ObstacleKind::Bird => Vec2::new(40.0, 20.0),
        }
    }

    /// Height of the bottom edge above the ground
    pub fn elevation(&self) -> f32 {
        match self {
            ObstacleKind::Bird => 30.0,
            _ => 0.0,
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge (x) and bottom edge (y)
    pub pos: Vec2,
    pub size: Vec2,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Immunity to obstacles
    Shield,
    /// Wider pickup radius
    Magnet,
    /// Flat score bonus
    Star,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Magnet, PowerUpKind::Star];
}

/// Edge length of a power-up's square sprite
pub const POWER_UP_SIZE: f32 = 30.0;
/// Edge length of a collectible's square sprite
pub const COLLECTIBLE_SIZE: f32 = 20.0;

/// A floating power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Left edge (x) and bottom edge (y)
    pub pos: Vec2,
    pub collected: bool,
}

impl PowerUp {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(POWER_UP_SIZE / 2.0)
    }
}

/// A floating score token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Left edge (x) and bottom edge (y)
    pub pos: Vec2,
    pub collected: bool,
    pub value: u32,
}

impl Collectible {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(COLLECTIBLE_SIZE / 2.0)
    }
}

/// Things that happened during a frame, for sound and UI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump left the ground
    Jump,
    /// A collectible was picked up
    Collect { value: u32 },
    /// A power-up was picked up
    PowerUp(PowerUpKind),
    /// Fatal obstacle collision
    Hit,
    /// The run is over and its score has been folded into the high score
    RunEnded {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

/// Complete state of the runner
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub score: u64,
    /// Fractional passive score not yet moved into `score`
    pub score_carry: f32,
    pub high_score: u64,
    /// Distance travelled this run
    pub distance: f32,
    /// World pixels scrolled per normalized step
    pub speed: f32,
    pub player: Player,
    /// Ordered by spawn time (oldest first)
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub collectibles: Vec<Collectible>,
    pub buffs: ActiveBuffs,
    /// Events not yet drained by the host
    pub events: Vec<GameEvent>,
    /// Simulated frames this run
    pub ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a state on the menu screen
    pub fn new(seed: u64, high_score: u64, config: &RunnerConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Menu,
            score: 0,
            score_carry: 0.0,
            high_score,
            distance: 0.0,
            speed: config.base_speed,
            player: Player::default(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            collectibles: Vec::new(),
            buffs: ActiveBuffs::default(),
            events: Vec::new(),
            ticks: 0,
            next_id: 1,
        }
    }

    /// Discard the run and enter `mode` with fresh counters.
    ///
    /// Only the high score and the RNG stream survive.
    pub fn reset(&mut self, config: &RunnerConfig, mode: GameMode) {
        self.mode = mode;
        self.score = 0;
        self.score_carry = 0.0;
        self.distance = 0.0;
        self.speed = config.base_speed;
        self.player = Player::default();
        self.obstacles.clear();
        self.power_ups.clear();
        self.collectibles.clear();
        self.buffs = ActiveBuffs::default();
        self.ticks = 0;
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fold the current score into the high score.
    ///
    /// Returns true when the high score improved.
    pub fn finalize_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Move pending events out
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
