//! Collision detection and scoring
//!
//! Obstacles use buffered axis-aligned boxes so near misses stay near misses.
//! Pickups use a center-distance test, widened while the magnet is active.

use glam::Vec2;

use super::config::RunnerConfig;
use super::state::{GameEvent, GameMode, GameState, Obstacle, PowerUpKind};

/// Axis-aligned box in world space (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its bottom-left corner and size
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Inset every edge by `buffer`, collapsing to the center if too small
    pub fn shrink(&self, buffer: f32) -> Self {
        let center = self.center();
        let min = (self.min + Vec2::splat(buffer)).min(center);
        let max = (self.max - Vec2::splat(buffer)).max(center);
        Self { min, max }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Obstacle {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Check the player against every obstacle.
///
/// A hit without a shield ends the run. Returns true on that transition.
pub fn check_obstacles(state: &mut GameState, config: &RunnerConfig) -> bool {
    if state.mode != GameMode::Playing || state.buffs.shield.active {
        return false;
    }

    let player_box = state.player.hitbox(config).shrink(config.collision_buffer);
    let hit = state
        .obstacles
        .iter()
        .find(|o| player_box.overlaps(&o.hitbox().shrink(config.collision_buffer)));

    let Some(obstacle) = hit else {
        return false;
    };
    log::info!(
        "Hit {:?} #{} at distance {:.0}, score {}",
        obstacle.kind,
        obstacle.id,
        state.distance,
        state.score
    );

    state.mode = GameMode::GameOver;
    state.events.push(GameEvent::Hit);
    end_run(state);
    true
}

/// Fold the score into the high score and announce the end of the run
pub fn end_run(state: &mut GameState) {
    let new_high_score = state.finalize_high_score();
    if new_high_score {
        log::info!("New high score: {}", state.high_score);
    }
    state.events.push(GameEvent::RunEnded {
        score: state.score,
        high_score: state.high_score,
        new_high_score,
    });
}

/// Effective pickup radius given the active buffs
pub fn pickup_radius(state: &GameState, config: &RunnerConfig) -> f32 {
    if state.buffs.magnet.active {
        config.pickup_radius + config.magnet_bonus_radius
    } else {
        config.pickup_radius
    }
}

/// Collect every power-up and collectible within reach
pub fn collect_pickups(state: &mut GameState, config: &RunnerConfig) {
    let center = state.player.center(config);
    let radius = pickup_radius(state, config);

    for power_up in state.power_ups.iter_mut() {
        if power_up.collected || power_up.center().distance(center) > radius {
            continue;
        }
        power_up.collected = true;
        match power_up.kind {
            PowerUpKind::Star => state.score += u64::from(config.star_value),
            kind => {
                if let Some(buff) = state.buffs.get_mut(kind) {
                    buff.activate(buff_duration(config, kind));
                    log::debug!("{:?} active for {}ms", kind, buff.remaining_ms);
                }
            }
        }
        state.events.push(GameEvent::PowerUp(power_up.kind));
    }

    for collectible in state.collectibles.iter_mut() {
        if collectible.collected || collectible.center().distance(center) > radius {
            continue;
        }
        collectible.collected = true;
        state.score += u64::from(collectible.value);
        state.events.push(GameEvent::Collect {
            value: collectible.value,
        });
    }
}

fn buff_duration(config: &RunnerConfig, kind: PowerUpKind) -> f32 {
    match kind {
        PowerUpKind::Shield => config.shield_duration_ms,
        PowerUpKind::Magnet => config.magnet_duration_ms,
        PowerUpKind::Star => 0.0,
    }
}

/// Survival score, proportional to distance scrolled this step
pub fn accrue_passive_score(state: &mut GameState, config: &RunnerConfig, step: f32) {
    state.score_carry += state.speed * step * config.passive_score_rate;
    let whole = state.score_carry.floor();
    if whole >= 1.0 {
        state.score += whole as u64;
        state.score_carry -= whole;
    }
}
