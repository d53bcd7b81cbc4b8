//! Render data export
//!
//! A snapshot is a plain copy of what any renderer (canvas, DOM, terminal)
//! needs to draw one frame. It never aliases the live simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{
    COLLECTIBLE_SIZE, GameMode, GameState, ObstacleKind, POWER_UP_SIZE, Posture, PowerUpKind,
    RunnerConfig,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Left edge and bottom edge (height above ground)
    pub pos: Vec2,
    pub size: Vec2,
    pub posture: Posture,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectibleView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

/// Remaining buff time in milliseconds (0 when inactive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BuffView {
    pub shield_ms: f32,
    pub magnet_ms: f32,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub mode: GameMode,
    pub score: u64,
    pub high_score: u64,
    pub distance: f32,
    /// World pixels scrolled this run, for parallax
    pub scroll_px: f32,
    pub speed: f32,
    pub world_width: f32,
    pub player: PlayerView,
    pub buffs: BuffView,
    pub obstacles: Vec<ObstacleView>,
    pub power_ups: Vec<PowerUpView>,
    pub collectibles: Vec<CollectibleView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, config: &RunnerConfig) -> Self {
        let hitbox = state.player.hitbox(config);
        Self {
            mode: state.mode,
            score: state.score,
            high_score: state.high_score,
            distance: state.distance,
            scroll_px: if config.distance_per_pixel > 0.0 {
                state.distance / config.distance_per_pixel
            } else {
                0.0
            },
            speed: state.speed,
            world_width: config.world_width,
            player: PlayerView {
                pos: hitbox.min,
                size: hitbox.size(),
                posture: state.player.posture,
            },
            buffs: BuffView {
                shield_ms: remaining(state.buffs.shield.active, state.buffs.shield.remaining_ms),
                magnet_ms: remaining(state.buffs.magnet.active, state.buffs.magnet.remaining_ms),
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    pos: o.pos,
                    size: o.size,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.pos,
                    size: POWER_UP_SIZE,
                    collected: p.collected,
                })
                .collect(),
            collectibles: state
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    pos: c.pos,
                    size: COLLECTIBLE_SIZE,
                    collected: c.collected,
                })
                .collect(),
        }
    }

    /// JSON form for JavaScript-side renderers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn remaining(active: bool, remaining_ms: f32) -> f32 {
    if active { remaining_ms } else { 0.0 }
}
