//! World-to-screen mapping, palette and HUD text
//!
//! World space has y pointing up from the ground line; the canvas has y
//! pointing down from the top. Everything here is plain math so it can be
//! checked without a browser.

use glam::Vec2;

use crate::sim::{GameMode, ObstacleKind, PowerUpKind};
use crate::snapshot::RenderSnapshot;

/// Fraction of the canvas height above the ground line
pub const HORIZON: f64 = 0.72;
/// World pixels between the scrolling grid's vertical lines
pub const GRID_SPACING: f32 = 80.0;

pub mod palette {
    pub const SKY_TOP: &str = "#0b0221";
    pub const SKY_BOTTOM: &str = "#3d0a4f";
    pub const SUN: &str = "#ff9e3d";
    pub const FLOOR: &str = "#120327";
    pub const GRID: &str = "#ff2bd6";
    pub const GROUND: &str = "#00f0ff";
    pub const PLAYER: &str = "#00f0ff";
    pub const SHIELD: &str = "#7dfc9a";
    pub const CACTUS: &str = "#ff2bd6";
    pub const ROCK: &str = "#b967ff";
    pub const BIRD: &str = "#fffb96";
    pub const COLLECTIBLE: &str = "#ffd319";
    pub const HUD: &str = "#f6f1ff";
    pub const OVERLAY: &str = "rgba(11, 2, 33, 0.6)";
}

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ScreenRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Scale and ground placement for one canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Canvas pixels per world pixel
    pub scale: f64,
    /// Canvas y of the ground line
    pub ground_y: f64,
}

impl Viewport {
    /// Fit `world_width` across the canvas
    pub fn fit(width: f64, height: f64, world_width: f32) -> Self {
        let scale = if world_width > 0.0 {
            width / world_width as f64
        } else {
            1.0
        };
        Self {
            width,
            height,
            scale,
            ground_y: height * HORIZON,
        }
    }

    /// Map a world box (bottom-left corner and size) to the canvas
    pub fn rect(&self, pos: Vec2, size: Vec2) -> ScreenRect {
        let w = size.x as f64 * self.scale;
        let h = size.y as f64 * self.scale;
        ScreenRect {
            x: pos.x as f64 * self.scale,
            y: self.ground_y - pos.y as f64 * self.scale - h,
            w,
            h,
        }
    }

    /// Map a square world box of side `size`
    pub fn square(&self, pos: Vec2, size: f32) -> ScreenRect {
        self.rect(pos, Vec2::splat(size))
    }

    /// Canvas x of the first grid line, scrolled by `distance_px`
    pub fn grid_offset(&self, distance_px: f32) -> f64 {
        let phase = distance_px.rem_euclid(GRID_SPACING);
        -(phase as f64) * self.scale
    }
}

pub fn obstacle_color(kind: ObstacleKind) -> &'static str {
    match kind {
        ObstacleKind::Cactus => palette::CACTUS,
        ObstacleKind::Rock => palette::ROCK,
        ObstacleKind::Bird => palette::BIRD,
    }
}

pub fn power_up_style(kind: PowerUpKind) -> (&'static str, &'static str) {
    match kind {
        PowerUpKind::Shield => (palette::SHIELD, "S"),
        PowerUpKind::Magnet => ("#ff6b6b", "M"),
        PowerUpKind::Star => (palette::COLLECTIBLE, "\u{2605}"),
    }
}

/// HUD lines for the top-left corner
pub fn hud_lines(snapshot: &RenderSnapshot, fps: Option<u32>) -> Vec<String> {
    let mut lines = vec![
        format!("SCORE {:06}", snapshot.score),
        format!("HI    {:06}", snapshot.high_score),
        format!("DIST  {:.0}m", snapshot.distance),
    ];
    if snapshot.buffs.shield_ms > 0.0 {
        lines.push(format!("SHIELD {:.1}s", snapshot.buffs.shield_ms / 1000.0));
    }
    if snapshot.buffs.magnet_ms > 0.0 {
        lines.push(format!("MAGNET {:.1}s", snapshot.buffs.magnet_ms / 1000.0));
    }
    if let Some(fps) = fps {
        lines.push(format!("FPS {}", fps));
    }
    lines
}

/// Centered overlay text for the current mode, empty while playing
pub fn overlay_lines(snapshot: &RenderSnapshot) -> Vec<String> {
    match snapshot.mode {
        GameMode::Playing => Vec::new(),
        GameMode::Menu => vec![
            "SYNTHWAVE RUNNER".to_string(),
            "SPACE OR TAP TO RUN".to_string(),
            "DOWN TO DUCK".to_string(),
        ],
        GameMode::Paused => vec!["PAUSED".to_string(), "ESC TO RESUME".to_string()],
        GameMode::GameOver => {
            let mut lines = vec!["GAME OVER".to_string(), format!("SCORE {}", snapshot.score)];
            if snapshot.score > 0 && snapshot.score == snapshot.high_score {
                lines.push("NEW HIGH SCORE".to_string());
            }
            lines.push("SPACE TO RETRY".to_string());
            lines
        }
    }
}
