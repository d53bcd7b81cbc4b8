//! Frame driver
//!
//! Owns one session: the simulation state, the frame clock and the high score
//! store. Platform loops feed it timestamps and input signals and get back the
//! events each frame produced.

use crate::highscores::HighScoreStore;
use crate::sim::{
    self, FrameStep, GameEvent, GameMode, GameState, InputSignal, RunnerConfig, SimClock,
    Transition,
};
use crate::snapshot::RenderSnapshot;

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// A running game session
#[derive(Debug)]
pub struct Game {
    state: GameState,
    config: RunnerConfig,
    clock: SimClock,
    high_scores: HighScoreStore,
    fps: FpsCounter,
    /// Events not yet handed to the caller
    outbox: Vec<GameEvent>,
}

impl Game {
    /// Start on the menu with the persisted high score.
    ///
    /// An invalid config is replaced by the default tuning.
    pub fn new(config: RunnerConfig, high_scores: HighScoreStore, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Rejected runner config, using defaults: {}", e);
                RunnerConfig::default()
            }
        };
        let high_score = high_scores.load();
        log::info!("Session seed {}, high score {}", seed, high_score);
        Self {
            state: GameState::new(seed, high_score, &config),
            config,
            clock: SimClock::new(),
            high_scores,
            fps: FpsCounter::default(),
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Swap tuning. Refused while a run is in progress or when invalid.
    pub fn set_config(&mut self, config: RunnerConfig) -> bool {
        if matches!(self.state.mode, GameMode::Playing | GameMode::Paused) {
            log::warn!("Ignoring config change during a run");
            return false;
        }
        if let Err(e) = config.validate() {
            log::warn!("Ignoring invalid runner config: {}", e);
            return false;
        }
        self.state.reset(&config, GameMode::Menu);
        self.config = config;
        true
    }

    /// Apply one input signal
    pub fn handle_input(&mut self, signal: InputSignal) -> Transition {
        let transition = sim::apply_input(&mut self.state, &self.config, signal);
        if transition.rearms_clock() {
            self.clock.rearm();
        }
        self.flush_events();
        transition
    }

    /// Leave a paused or finished run for the menu
    pub fn return_to_menu(&mut self) -> bool {
        let left = sim::return_to_menu(&mut self.state, &self.config);
        self.flush_events();
        left
    }

    /// End any live or paused run (page teardown). Its score still counts.
    pub fn abandon(&mut self) -> bool {
        let ended = sim::abandon_run(&mut self.state, &self.config);
        self.flush_events();
        ended
    }

    /// Forget the last frame timestamp after the host stopped delivering
    /// frames, so the gap is not replayed as elapsed time
    pub fn resync_clock(&mut self) {
        self.clock.rearm();
    }

    /// Advance to the animation-frame timestamp `now_ms` and return the
    /// events produced since the previous call.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.fps.record(now_ms);
        let frame = self.clock.advance(now_ms);
        self.step(frame)
    }

    /// Advance by an explicit step, bypassing the wall clock
    pub fn step(&mut self, frame: FrameStep) -> Vec<GameEvent> {
        sim::tick(&mut self.state, &self.config, frame);
        self.flush_events();
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, &self.config)
    }

    /// Persist improvements and queue events for the caller
    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::RunEnded {
                high_score,
                new_high_score: true,
                ..
            } = event
            {
                self.high_scores.save(high_score);
            }
            self.outbox.push(event);
        }
    }
}
