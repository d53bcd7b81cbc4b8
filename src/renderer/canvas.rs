//! Canvas 2D painter

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layout::{self, ScreenRect, Viewport, palette};
use crate::sim::ObstacleKind;
use crate::snapshot::RenderSnapshot;

/// Draws snapshots onto one canvas element
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let size = (canvas.width(), canvas.height());
        log::info!("Canvas renderer ready ({}x{})", size.0, size.1);
        Ok(Self { canvas, ctx, size })
    }

    /// Match the backing store to the element's CSS size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size {
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.size = (width, height);
        log::debug!("Canvas resized to {}x{}", width, height);
    }

    pub fn render(&mut self, snapshot: &RenderSnapshot, fps: Option<u32>) {
        let (w, h) = self.size;
        let view = Viewport::fit(w as f64, h as f64, snapshot.world_width);

        self.draw_backdrop(&view, snapshot.scroll_px);
        for collectible in snapshot.collectibles.iter().filter(|c| !c.collected) {
            let rect = view.square(collectible.pos, collectible.size);
            self.draw_diamond(&rect, palette::COLLECTIBLE);
        }
        for power_up in snapshot.power_ups.iter().filter(|p| !p.collected) {
            let rect = view.square(power_up.pos, power_up.size);
            let (color, glyph) = layout::power_up_style(power_up.kind);
            self.draw_badge(&rect, color, glyph);
        }
        for obstacle in &snapshot.obstacles {
            let rect = view.rect(obstacle.pos, obstacle.size);
            self.draw_obstacle(&rect, obstacle.kind);
        }
        self.draw_player(&view, snapshot);
        self.draw_hud(&layout::hud_lines(snapshot, fps), &view);
        self.draw_overlay(&layout::overlay_lines(snapshot), &view);
    }

    fn draw_backdrop(&self, view: &Viewport, scroll_px: f32) {
        let ctx = &self.ctx;
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, view.ground_y);
        sky.add_color_stop(0.0, palette::SKY_TOP).ok();
        sky.add_color_stop(1.0, palette::SKY_BOTTOM).ok();
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, view.width, view.ground_y);

        // Sun with horizontal cut-outs
        let radius = view.height * 0.22;
        let cx = view.width * 0.5;
        ctx.set_fill_style_str(palette::SUN);
        ctx.begin_path();
        ctx.arc(cx, view.ground_y, radius, PI, 2.0 * PI).ok();
        ctx.fill();
        ctx.set_fill_style_str(palette::SKY_BOTTOM);
        for i in 1..5 {
            let band = radius * 0.06 * i as f64;
            ctx.fill_rect(cx - radius, view.ground_y - radius * 0.18 * i as f64, 2.0 * radius, band);
        }

        ctx.set_fill_style_str(palette::FLOOR);
        ctx.fill_rect(0.0, view.ground_y, view.width, view.height - view.ground_y);

        ctx.set_stroke_style_str(palette::GRID);
        ctx.set_line_width(1.0);
        let spacing = layout::GRID_SPACING as f64 * view.scale;
        let vanish_x = view.width * 0.5;
        let mut x = view.grid_offset(scroll_px);
        while x <= view.width + spacing {
            // Lines converge toward the sun
            ctx.begin_path();
            ctx.move_to(vanish_x + (x - vanish_x) * 0.4, view.ground_y);
            ctx.line_to(vanish_x + (x - vanish_x) * 2.5, view.height);
            ctx.stroke();
            x += spacing;
        }
        let depth = view.height - view.ground_y;
        for i in 1..6 {
            let t = (i as f64 / 6.0).powi(2);
            let y = view.ground_y + depth * t;
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(view.width, y);
            ctx.stroke();
        }

        ctx.set_stroke_style_str(palette::GROUND);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(0.0, view.ground_y);
        ctx.line_to(view.width, view.ground_y);
        ctx.stroke();
    }

    fn draw_player(&self, view: &Viewport, snapshot: &RenderSnapshot) {
        let ctx = &self.ctx;
        let rect = view.rect(snapshot.player.pos, snapshot.player.size);
        let shielded = snapshot.buffs.shield_ms > 0.0;

        ctx.set_shadow_blur(if shielded { 24.0 } else { 12.0 });
        ctx.set_shadow_color(if shielded { palette::SHIELD } else { palette::PLAYER });
        ctx.set_fill_style_str(palette::PLAYER);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        ctx.set_shadow_blur(0.0);

        if shielded {
            let (cx, cy) = rect.center();
            ctx.set_stroke_style_str(palette::SHIELD);
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.arc(cx, cy, rect.w.max(rect.h) * 0.8, 0.0, 2.0 * PI).ok();
            ctx.stroke();
        }
    }

    fn draw_obstacle(&self, rect: &ScreenRect, kind: ObstacleKind) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(layout::obstacle_color(kind));
        match kind {
            ObstacleKind::Cactus => {
                ctx.fill_rect(rect.x + rect.w * 0.3, rect.y, rect.w * 0.4, rect.h);
                ctx.fill_rect(rect.x, rect.y + rect.h * 0.3, rect.w, rect.h * 0.15);
            }
            ObstacleKind::Rock => {
                ctx.begin_path();
                ctx.move_to(rect.x, rect.bottom());
                ctx.line_to(rect.x + rect.w * 0.35, rect.y);
                ctx.line_to(rect.x + rect.w * 0.75, rect.y + rect.h * 0.2);
                ctx.line_to(rect.x + rect.w, rect.bottom());
                ctx.close_path();
                ctx.fill();
            }
            ObstacleKind::Bird => {
                let (cx, cy) = rect.center();
                ctx.begin_path();
                ctx.move_to(rect.x, rect.y);
                ctx.line_to(cx, cy);
                ctx.line_to(rect.x + rect.w, rect.y);
                ctx.line_to(cx, rect.bottom());
                ctx.close_path();
                ctx.fill();
            }
        }
    }

    fn draw_diamond(&self, rect: &ScreenRect, color: &str) {
        let ctx = &self.ctx;
        let (cx, cy) = rect.center();
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(cx, rect.y);
        ctx.line_to(rect.x + rect.w, cy);
        ctx.line_to(cx, rect.bottom());
        ctx.line_to(rect.x, cy);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_badge(&self, rect: &ScreenRect, color: &str, glyph: &str) {
        let ctx = &self.ctx;
        let (cx, cy) = rect.center();
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.arc(cx, cy, rect.w / 2.0, 0.0, 2.0 * PI).ok();
        ctx.stroke();

        ctx.set_fill_style_str(color);
        ctx.set_font(&format!("bold {}px monospace", (rect.h * 0.6).round()));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(glyph, cx, cy).ok();
    }

    fn draw_hud(&self, lines: &[String], view: &Viewport) {
        let ctx = &self.ctx;
        let size = (view.height * 0.045).max(12.0).round();
        ctx.set_fill_style_str(palette::HUD);
        ctx.set_font(&format!("{}px monospace", size));
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        for (i, line) in lines.iter().enumerate() {
            ctx.fill_text(line, 12.0, 12.0 + i as f64 * size * 1.2).ok();
        }
    }

    fn draw_overlay(&self, lines: &[String], view: &Viewport) {
        if lines.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_fill_style_str(palette::OVERLAY);
        ctx.fill_rect(0.0, 0.0, view.width, view.height);

        let title = (view.height * 0.09).round();
        let body = (view.height * 0.045).round();
        let mut y = view.height * 0.35;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for (i, line) in lines.iter().enumerate() {
            let size = if i == 0 { title } else { body };
            ctx.set_font(&format!("bold {}px monospace", size));
            ctx.set_fill_style_str(if i == 0 { palette::GRID } else { palette::HUD });
            ctx.fill_text(line, view.width * 0.5, y).ok();
            y += size * 1.5;
        }
    }
}
