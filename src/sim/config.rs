//! Tuning for the runner
//!
//! Every rate here is expressed per normalized step (one 60 fps frame), every
//! duration in real milliseconds, every length in world pixels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`RunnerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse runner config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid runner config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning shared by every host (dedicated route, 404 page)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    // === World ===
    /// Visible world width; new entities appear at this x
    pub world_width: f32,
    /// Entities whose left edge passes this x are dropped
    pub despawn_x: f32,
    /// Converts scrolled pixels into displayed distance
    pub distance_per_pixel: f32,

    // === Player ===
    /// Fixed left edge of the player
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Collision height while ducking
    pub duck_height: f32,
    /// Downward acceleration (screen convention, positive = down)
    pub gravity: f32,
    /// Velocity applied on jump (screen convention, negative = up)
    pub jump_force: f32,

    // === Speed ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per unit of distance travelled
    pub speed_ramp: f32,

    // === Spawning ===
    /// Minimum gap between obstacles at base speed
    pub spawn_gap: f32,
    /// Fraction of `spawn_gap` removed at max speed
    pub spawn_gap_shrink: f32,
    pub obstacle_chance: f32,
    pub power_up_chance: f32,
    pub collectible_chance: f32,
    /// Distance before birds join the obstacle pool
    pub bird_min_distance: f32,
    /// Height range (bottom edge above ground) for floating pickups
    pub pickup_min_height: f32,
    pub pickup_max_height: f32,

    // === Collision & scoring ===
    /// Hitbox inset applied on each axis to both player and obstacle
    pub collision_buffer: f32,
    pub pickup_radius: f32,
    pub magnet_bonus_radius: f32,
    /// Score per pixel scrolled
    pub passive_score_rate: f32,
    pub collectible_value: u32,
    pub star_value: u32,

    // === Buffs ===
    pub shield_duration_ms: f32,
    pub magnet_duration_ms: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::arcade()
    }
}

impl RunnerConfig {
    /// Tuning for the dedicated game route
    pub fn arcade() -> Self {
        Self {
            world_width: 800.0,
            despawn_x: -100.0,
            distance_per_pixel: 0.1,

            player_x: 60.0,
            player_width: 40.0,
            player_height: 50.0,
            duck_height: 25.0,
            gravity: 0.6,
            jump_force: -12.0,

            base_speed: 6.0,
            max_speed: 12.0,
            speed_ramp: 0.002,

            spawn_gap: 600.0,
            spawn_gap_shrink: 0.2,
            obstacle_chance: 0.02,
            power_up_chance: 0.002,
            collectible_chance: 0.008,
            bird_min_distance: 500.0,
            pickup_min_height: 20.0,
            pickup_max_height: 110.0,

            collision_buffer: 5.0,
            pickup_radius: 30.0,
            magnet_bonus_radius: 70.0,
            passive_score_rate: 0.01,
            collectible_value: 10,
            star_value: 50,

            shield_duration_ms: 5000.0,
            magnet_duration_ms: 8000.0,
        }
    }

    /// Smaller, slightly gentler tuning for the 404 page canvas
    pub fn compact() -> Self {
        Self {
            world_width: 600.0,
            player_x: 40.0,
            player_width: 30.0,
            player_height: 40.0,
            duck_height: 20.0,
            gravity: 0.55,
            jump_force: -11.0,
            base_speed: 5.0,
            max_speed: 10.0,
            spawn_gap: 480.0,
            pickup_max_height: 95.0,
            collision_buffer: 4.0,
            pickup_radius: 25.0,
            magnet_bonus_radius: 60.0,
            ..Self::arcade()
        }
    }

    /// Parse and validate a JSON config; missing fields take arcade values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the relationships the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.world_width <= self.player_x + self.player_width {
            return invalid("world_width", "must extend past the player");
        }
        if self.despawn_x >= 0.0 {
            return invalid("despawn_x", "must be negative");
        }
        if self.distance_per_pixel <= 0.0 {
            return invalid("distance_per_pixel", "must be positive");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity", "must be positive");
        }
        if self.jump_force >= 0.0 {
            return invalid("jump_force", "must be negative (upward)");
        }
        if self.duck_height <= 0.0 || self.duck_height > self.player_height {
            return invalid("duck_height", "must be within (0, player_height]");
        }
        if self.base_speed <= 0.0 {
            return invalid("base_speed", "must be positive");
        }
        if self.max_speed < self.base_speed {
            return invalid("max_speed", "must be at least base_speed");
        }
        if self.speed_ramp < 0.0 {
            return invalid("speed_ramp", "must not be negative");
        }
        if !(0.0..1.0).contains(&self.spawn_gap_shrink) {
            return invalid("spawn_gap_shrink", "must be within [0, 1)");
        }
        for (field, chance) in [
            ("obstacle_chance", self.obstacle_chance),
            ("power_up_chance", self.power_up_chance),
            ("collectible_chance", self.collectible_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid(field, "must be a probability");
            }
        }
        if self.pickup_min_height > self.pickup_max_height {
            return invalid("pickup_min_height", "must not exceed pickup_max_height");
        }
        if self.shield_duration_ms <= 0.0 || self.magnet_duration_ms <= 0.0 {
            return invalid("shield_duration_ms", "buff durations must be positive");
        }
        Ok(())
    }

    /// Minimum gap to the previous obstacle at the given speed
    pub fn min_spawn_gap(&self, speed: f32) -> f32 {
        let span = self.max_speed - self.base_speed;
        let t = if span > 0.0 {
            ((speed - self.base_speed) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.spawn_gap * (1.0 - self.spawn_gap_shrink * t)
    }
}
