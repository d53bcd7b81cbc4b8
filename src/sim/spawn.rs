//! World generation: scrolling, pruning and procedural spawning
//!
//! All spawn chances are per normalized step, so spawn rates follow the
//! frame clock rather than the display refresh rate.

use glam::Vec2;
use rand::Rng;

use super::config::RunnerConfig;
use super::state::{Collectible, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};

const EARLY_OBSTACLES: [ObstacleKind; 2] = [ObstacleKind::Cactus, ObstacleKind::Rock];
const ALL_OBSTACLES: [ObstacleKind; 3] =
    [ObstacleKind::Cactus, ObstacleKind::Rock, ObstacleKind::Bird];

/// Scroll every entity, drop what left the screen and ramp up the speed
pub fn advance_world(state: &mut GameState, config: &RunnerConfig, step: f32) {
    let dx = state.speed * step;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= dx;
    }
    for power_up in state.power_ups.iter_mut() {
        power_up.pos.x -= dx;
    }
    for collectible in state.collectibles.iter_mut() {
        collectible.pos.x -= dx;
    }

    let cutoff = config.despawn_x;
    state.obstacles.retain(|o| o.pos.x >= cutoff);
    state.power_ups.retain(|p| !p.collected && p.pos.x >= cutoff);
    state.collectibles.retain(|c| !c.collected && c.pos.x >= cutoff);

    state.distance += dx * config.distance_per_pixel;
    let ramped = config.base_speed + state.distance * config.speed_ramp;
    state.speed = ramped.max(state.speed).min(config.max_speed);
}

/// Obstacle kinds available at the current distance
pub fn obstacle_pool(distance: f32, config: &RunnerConfig) -> &'static [ObstacleKind] {
    if distance >= config.bird_min_distance {
        &ALL_OBSTACLES
    } else {
        &EARLY_OBSTACLES
    }
}

/// Whether the newest obstacle has moved far enough from the spawn edge
pub fn spawn_gate_open(state: &GameState, config: &RunnerConfig) -> bool {
    state.obstacles.last().is_none_or(|last| {
        config.world_width - last.pos.x >= config.min_spawn_gap(state.speed)
    })
}

/// Roll for new obstacles, power-ups and collectibles at the spawn edge
pub fn spawn_entities(state: &mut GameState, config: &RunnerConfig, step: f32) {
    if step <= 0.0 {
        return;
    }

    // Draw every roll up front so the RNG stream does not depend on the gate
    let obstacle_roll: f32 = state.rng.random();
    let power_up_roll: f32 = state.rng.random();
    let collectible_roll: f32 = state.rng.random();

    if spawn_gate_open(state, config) && obstacle_roll < config.obstacle_chance * step {
        let pool = obstacle_pool(state.distance, config);
        let kind = pool[state.rng.random_range(0..pool.len())];
        let id = state.next_entity_id();
        log::debug!("Spawn {:?} #{} at distance {:.0}", kind, id, state.distance);
        state.obstacles.push(Obstacle {
            id,
            kind,
            pos: Vec2::new(config.world_width, kind.elevation()),
            size: kind.size(),
        });
    }

    if power_up_roll < config.power_up_chance * step {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        let height = pickup_height(state, config);
        let id = state.next_entity_id();
        log::debug!("Spawn {:?} power-up #{} at height {:.0}", kind, id, height);
        state.power_ups.push(PowerUp {
            id,
            kind,
            pos: Vec2::new(config.world_width, height),
            collected: false,
        });
    }

    if collectible_roll < config.collectible_chance * step {
        let height = pickup_height(state, config);
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: Vec2::new(config.world_width, height),
            collected: false,
            value: config.collectible_value,
        });
    }
}

fn pickup_height(state: &mut GameState, config: &RunnerConfig) -> f32 {
    state
        .rng
        .random_range(config.pickup_min_height..=config.pickup_max_height)
}
