//! Per-frame simulation pipeline
//!
//! Order within a frame is fixed: physics, world advance and spawning,
//! collision and scoring, then buff timers. Collision reads post-advance
//! positions and the shield state from before this frame's countdown.

use super::clock::FrameStep;
use super::collision;
use super::config::RunnerConfig;
use super::physics;
use super::spawn;
use super::state::{GameMode, GameState};

/// Advance a playing run by one frame. No-op in any other mode.
pub fn tick(state: &mut GameState, config: &RunnerConfig, frame: FrameStep) {
    if state.mode != GameMode::Playing || frame.is_zero() {
        return;
    }
    state.ticks += 1;
    let step = frame.step;

    physics::integrate(&mut state.player, config, step);

    spawn::advance_world(state, config, step);
    spawn::spawn_entities(state, config, step);

    collision::accrue_passive_score(state, config, step);
    if collision::check_obstacles(state, config) {
        return;
    }
    collision::collect_pickups(state, config);

    state.buffs.tick(frame.real_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TARGET_FRAME_MS;
    use crate::sim::machine::{InputSignal, apply_input};
    use crate::sim::state::{
        GameEvent, Obstacle, ObstacleKind, POWER_UP_SIZE, Posture, PowerUp, PowerUpKind,
    };
    use glam::Vec2;
    use proptest::prelude::*;

    fn frame_60() -> FrameStep {
        FrameStep::from_ms(TARGET_FRAME_MS)
    }

    /// Config with spawning disabled so runs are survivable forever
    fn empty_world() -> RunnerConfig {
        RunnerConfig {
            obstacle_chance: 0.0,
            power_up_chance: 0.0,
            collectible_chance: 0.0,
            ..RunnerConfig::default()
        }
    }

    fn started(seed: u64, high_score: u64, config: &RunnerConfig) -> GameState {
        let mut state = GameState::new(seed, high_score, config);
        apply_input(&mut state, config, InputSignal::Start);
        state
    }

    fn inject_obstacle_on_player(state: &mut GameState, config: &RunnerConfig) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Cactus,
            pos: Vec2::new(config.player_x, 0.0),
            size: Vec2::new(config.player_width, config.player_height),
        });
    }

    fn inject_power_up_on_player(state: &mut GameState, config: &RunnerConfig, kind: PowerUpKind) {
        let id = state.next_entity_id();
        let center = state.player.center(config);
        state.power_ups.push(PowerUp {
            id,
            kind,
            pos: center - Vec2::splat(POWER_UP_SIZE / 2.0),
            collected: false,
        });
    }

    fn run_for(state: &mut GameState, config: &RunnerConfig, deltas: &[f32]) {
        for &ms in deltas {
            tick(state, config, FrameStep::from_ms(ms));
        }
    }

    #[test]
    fn test_tick_outside_playing_is_noop() {
        let config = RunnerConfig::default();
        let mut state = GameState::new(1, 0, &config);
        tick(&mut state, &config, frame_60());
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.ticks, 0);

        apply_input(&mut state, &config, InputSignal::Start);
        apply_input(&mut state, &config, InputSignal::PauseToggle);
        tick(&mut state, &config, frame_60());
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_zero_frame_is_skipped() {
        let config = RunnerConfig::default();
        let mut state = started(1, 0, &config);
        tick(&mut state, &config, FrameStep::ZERO);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_idle_run_travels() {
        let config = RunnerConfig::default();
        let mut state = started(12345, 0, &config);
        for _ in 0..100 {
            tick(&mut state, &config, frame_60());
        }
        assert!(state.distance > 0.0);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.ticks, 100);
    }

    #[test]
    fn test_jump_lands_standing() {
        let config = empty_world();
        let mut state = started(3, 0, &config);
        apply_input(&mut state, &config, InputSignal::Jump);
        tick(&mut state, &config, frame_60());
        assert!(state.player.offset > 0.0);

        let mut frames = 0;
        while state.player.offset > 0.0 {
            tick(&mut state, &config, frame_60());
            frames += 1;
            assert!(frames < 500, "never landed");
        }
        assert_eq!(state.player.posture, Posture::Standing);
    }

    #[test]
    fn test_injected_obstacle_ends_run() {
        let config = empty_world();
        let mut state = started(3, 1_000, &config);
        inject_obstacle_on_player(&mut state, &config);

        tick(&mut state, &config, frame_60());

        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.high_score, 1_000.max(state.score));
    }

    #[test]
    fn test_game_over_triggers_once() {
        let config = empty_world();
        let mut state = started(3, 0, &config);
        // Score something first so the run improves the high score
        run_for(&mut state, &config, &[TARGET_FRAME_MS; 120]);
        let score = state.score;
        assert!(score > 0);
        inject_obstacle_on_player(&mut state, &config);

        tick(&mut state, &config, frame_60());
        tick(&mut state, &config, frame_60());

        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Hit).count(), 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
                .count(),
            1
        );
        assert_eq!(state.high_score, state.score);
        assert!(state.high_score >= score);
    }

    #[test]
    fn test_shield_survives_overlap() {
        let config = empty_world();
        let mut state = started(3, 0, &config);
        state.buffs.shield.activate(config.shield_duration_ms);
        inject_obstacle_on_player(&mut state, &config);

        for _ in 0..5 {
            tick(&mut state, &config, frame_60());
        }
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_shield_expires_on_crossing_frame() {
        let config = empty_world();
        let mut state = started(3, 0, &config);
        state.buffs.shield.activate(5000.0);

        run_for(&mut state, &config, &[50.0; 99]);
        tick(&mut state, &config, FrameStep::from_ms(49.0));
        assert!(state.buffs.shield.active);

        // 5001ms total
        tick(&mut state, &config, FrameStep::from_ms(2.0));
        assert!(!state.buffs.shield.active);
        assert_eq!(state.buffs.shield.remaining_ms, 0.0);
    }

    #[test]
    fn test_shield_uses_real_time_after_lag_spike() {
        let config = empty_world();
        let mut state = started(3, 0, &config);
        state.buffs.shield.activate(5000.0);
        // A 6 second hitch is clamped for physics, not for the buff
        tick(&mut state, &config, FrameStep::from_ms(6000.0));
        assert!(!state.buffs.shield.active);
    }

    #[test]
    fn test_second_magnet_resets_duration() {
        let config = empty_world();
        let mut state = started(3, 0, &config);

        inject_power_up_on_player(&mut state, &config, PowerUpKind::Magnet);
        tick(&mut state, &config, frame_60());
        assert!(state.buffs.magnet.active);

        run_for(&mut state, &config, &[50.0; 60]);
        assert!(state.buffs.magnet.remaining_ms < config.magnet_duration_ms - 2_900.0);

        inject_power_up_on_player(&mut state, &config, PowerUpKind::Magnet);
        tick(&mut state, &config, FrameStep::from_ms(20.0));
        assert!(state.buffs.magnet.active);
        assert_eq!(state.buffs.magnet.remaining_ms, config.magnet_duration_ms - 20.0);

        let power_ups = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::PowerUp(PowerUpKind::Magnet))
            .count();
        assert_eq!(power_ups, 2);
    }

    #[test]
    fn test_pickup_frame_counts_toward_buff() {
        let config = empty_world();
        let mut state = started(5, 0, &config);

        inject_power_up_on_player(&mut state, &config, PowerUpKind::Shield);
        tick(&mut state, &config, FrameStep::from_ms(40.0));
        assert!(state.buffs.shield.active);
        assert_eq!(state.buffs.shield.remaining_ms, config.shield_duration_ms - 40.0);
    }

    #[test]
    fn test_determinism() {
        let config = RunnerConfig::default();
        let mut state1 = started(99999, 0, &config);
        let mut state2 = started(99999, 0, &config);

        let deltas = [16.0, 17.0, 33.0, 8.0, 16.7, 50.0, 12.0];
        for i in 0..600 {
            let frame = FrameStep::from_ms(deltas[i % deltas.len()]);
            if i % 45 == 0 {
                apply_input(&mut state1, &config, InputSignal::Jump);
                apply_input(&mut state2, &config, InputSignal::Jump);
            }
            tick(&mut state1, &config, frame);
            tick(&mut state2, &config, frame);
        }

        assert_eq!(state1.mode, state2.mode);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.power_ups, state2.power_ups);
        assert_eq!(state1.collectibles, state2.collectibles);
        assert_eq!(state1.distance, state2.distance);
    }

    #[test]
    fn test_frame_rate_independence_60_vs_144() {
        let config = empty_world();
        let mut at_60 = started(1, 0, &config);
        let mut at_144 = started(1, 0, &config);

        // 10 seconds each
        run_for(&mut at_60, &config, &[1000.0 / 60.0; 600]);
        run_for(&mut at_144, &config, &[1000.0 / 144.0; 1440]);

        let rel = (at_60.distance - at_144.distance).abs() / at_60.distance;
        assert!(rel < 0.01, "distance drifted {rel}");
        assert!(at_60.score.abs_diff(at_144.score) <= 2);
    }

    /// Split `total_ms` into frames of `frame_ms` with a short final frame
    fn uniform_frames(total_ms: f32, frame_ms: f32) -> Vec<f32> {
        let whole = (total_ms / frame_ms).floor() as usize;
        let mut frames = vec![frame_ms; whole];
        let rest = total_ms - whole as f32 * frame_ms;
        if rest > 0.0 {
            frames.push(rest);
        }
        frames
    }

    proptest! {
        #[test]
        fn prop_frame_rate_independent(deltas in prop::collection::vec(4.0f32..50.0, 30..400)) {
            let config = empty_world();
            let total: f32 = deltas.iter().sum();

            let mut jittery = started(8, 0, &config);
            run_for(&mut jittery, &config, &deltas);
            let mut steady = started(8, 0, &config);
            run_for(&mut steady, &config, &uniform_frames(total, TARGET_FRAME_MS));

            let tolerance = 0.02 * steady.distance + 0.5;
            prop_assert!((jittery.distance - steady.distance).abs() <= tolerance);
            prop_assert!(jittery.score.abs_diff(steady.score) <= 2);
        }

        #[test]
        fn prop_ground_invariant(
            seed in any::<u64>(),
            frames in prop::collection::vec((1.0f32..50.0, 0u8..6), 1..600),
        ) {
            let config = empty_world();
            let mut state = started(seed, 0, &config);
            for (ms, action) in frames {
                let signal = match action {
                    0 => Some(InputSignal::Jump),
                    1 => Some(InputSignal::DuckPressed),
                    2 => Some(InputSignal::DuckReleased),
                    _ => None,
                };
                if let Some(signal) = signal {
                    apply_input(&mut state, &config, signal);
                }
                tick(&mut state, &config, FrameStep::from_ms(ms));

                prop_assert!(state.player.offset >= 0.0);
                if state.player.offset == 0.0 {
                    prop_assert_ne!(state.player.posture, Posture::Jumping);
                }
            }
        }

        #[test]
        fn prop_score_and_distance_monotonic(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0.0f32..120.0, 1..600),
        ) {
            let config = RunnerConfig::default();
            let mut state = started(seed, 0, &config);
            for ms in deltas {
                let (score, distance, speed) = (state.score, state.distance, state.speed);
                tick(&mut state, &config, FrameStep::from_ms(ms));
                if state.mode != GameMode::Playing {
                    break;
                }
                prop_assert!(state.score >= score);
                prop_assert!(state.distance >= distance);
                prop_assert!(state.speed >= speed);
                prop_assert!(state.speed <= config.max_speed);
            }
        }
    }
}
