//! Scripted player for headless runs
//!
//! Reads the same snapshot a renderer gets and answers with at most one input
//! signal per frame: jump over ground obstacles, duck under birds.

use crate::consts::TARGET_FRAME_MS;
use crate::game::Game;
use crate::sim::{GameEvent, GameMode, InputSignal, ObstacleKind, Posture};
use crate::snapshot::{ObstacleView, RenderSnapshot};

/// Jump once a ground obstacle is this many frames of travel away
const JUMP_LEAD_FRAMES: f32 = 8.0;
/// Start ducking once a bird is this many frames of travel away
const DUCK_LEAD_FRAMES: f32 = 12.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    ducking: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal to send before the next frame, if any
    pub fn decide(&mut self, snapshot: &RenderSnapshot) -> Option<InputSignal> {
        if snapshot.mode != GameMode::Playing {
            self.ducking = false;
            return None;
        }

        let player = &snapshot.player;
        let left = player.pos.x;
        let right = player.pos.x + player.size.x;
        let next = snapshot
            .obstacles
            .iter()
            .filter(|o| o.pos.x + o.size.x >= left)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        let gap = |o: &ObstacleView| o.pos.x - right;

        let bird_close = next.is_some_and(|o| {
            o.kind == ObstacleKind::Bird && gap(o) <= snapshot.speed * DUCK_LEAD_FRAMES
        });
        if bird_close {
            if !self.ducking {
                self.ducking = true;
                return Some(InputSignal::DuckPressed);
            }
            return None;
        }
        if self.ducking {
            self.ducking = false;
            return Some(InputSignal::DuckReleased);
        }

        let grounded = player.pos.y <= 0.0 && player.posture != Posture::Jumping;
        let ground_close = next.is_some_and(|o| {
            o.kind != ObstacleKind::Bird && gap(o) <= snapshot.speed * JUMP_LEAD_FRAMES
        });
        (grounded && ground_close).then_some(InputSignal::Jump)
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u32,
    pub score: u64,
    pub high_score: u64,
    pub distance: f32,
    pub jumps: u32,
    pub collected: u32,
    pub power_ups: u32,
    pub crashed: bool,
}

/// Start a run and let the autopilot play it at a simulated 60 fps for up to
/// `seconds`, stopping early on a crash.
pub fn run_headless(game: &mut Game, seconds: f32) -> RunSummary {
    let mut pilot = Autopilot::new();
    let mut summary = RunSummary::default();
    let frames = (seconds.max(0.0) * 1000.0 / TARGET_FRAME_MS).round() as u32;

    game.handle_input(InputSignal::Start);
    let mut now = 0.0_f64;
    // Arms the clock
    game.frame(now);

    while summary.frames < frames {
        if let Some(signal) = pilot.decide(&game.snapshot()) {
            game.handle_input(signal);
        }
        now += TARGET_FRAME_MS as f64;
        for event in game.frame(now) {
            match event {
                GameEvent::Jump => summary.jumps += 1,
                GameEvent::Collect { .. } => summary.collected += 1,
                GameEvent::PowerUp(_) => summary.power_ups += 1,
                GameEvent::Hit => summary.crashed = true,
                GameEvent::RunEnded { .. } => {}
            }
        }
        summary.frames += 1;
        if game.mode() != GameMode::Playing {
            break;
        }
    }

    let state = game.state();
    summary.seed = state.seed;
    summary.score = state.score;
    summary.high_score = state.high_score;
    summary.distance = state.distance;
    summary
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::highscores::HighScoreStore;
    use crate::sim::{FrameStep, GameState, Obstacle, RunnerConfig, apply_input, tick};

    fn quiet_config() -> RunnerConfig {
        RunnerConfig {
            obstacle_chance: 0.0,
            power_up_chance: 0.0,
            collectible_chance: 0.0,
            ..RunnerConfig::default()
        }
    }

    /// Let the autopilot face one obstacle placed 300px ahead of the player
    fn clear_single(kind: ObstacleKind) -> (GameState, u32) {
        let config = quiet_config();
        let mut state = GameState::new(2, 0, &config);
        apply_input(&mut state, &config, InputSignal::Start);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind,
            pos: Vec2::new(400.0, kind.elevation()),
            size: kind.size(),
        });

        let mut pilot = Autopilot::new();
        let mut signals = 0;
        for _ in 0..200 {
            let snapshot = RenderSnapshot::capture(&state, &config);
            if let Some(signal) = pilot.decide(&snapshot) {
                apply_input(&mut state, &config, signal);
                signals += 1;
            }
            tick(&mut state, &config, FrameStep::from_ms(TARGET_FRAME_MS));
        }
        (state, signals)
    }

    #[test]
    fn test_jumps_over_cactus() {
        let (state, signals) = clear_single(ObstacleKind::Cactus);
        assert_eq!(state.mode, GameMode::Playing);
        assert!(state.obstacles.iter().all(|o| o.pos.x < 0.0));
        assert_eq!(signals, 1);
    }

    #[test]
    fn test_ducks_under_bird() {
        let (state, signals) = clear_single(ObstacleKind::Bird);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.player.posture, Posture::Standing);
        // Press then release
        assert_eq!(signals, 2);
    }

    #[test]
    fn test_idle_outside_playing() {
        let config = RunnerConfig::default();
        let state = GameState::new(2, 0, &config);
        let mut pilot = Autopilot::new();
        assert_eq!(pilot.decide(&RenderSnapshot::capture(&state, &config)), None);
    }

    #[test]
    fn test_headless_run_in_empty_world() {
        let mut game = Game::new(quiet_config(), HighScoreStore::memory(), 8);
        let summary = run_headless(&mut game, 10.0);
        assert!(!summary.crashed);
        assert_eq!(summary.seed, 8);
        assert_eq!(summary.frames, 600);
        assert!(summary.distance > 0.0);
        assert!(summary.score > 0);
        assert_eq!(summary.jumps, 0);
    }

    #[test]
    fn test_headless_run_is_reproducible() {
        let run = |seed| {
            let mut game = Game::new(RunnerConfig::default(), HighScoreStore::memory(), seed);
            run_headless(&mut game, 20.0)
        };
        assert_eq!(run(77), run(77));
    }
}
