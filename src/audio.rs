//! Sound cues
//!
//! Every effect is a short sequence of synthesized tones, so no audio assets
//! ship with the game. The cue table is plain data; only playback touches the
//! Web Audio API.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Feet leave the ground
    Jump,
    /// Coin-style collectible
    Collect,
    /// Shield, magnet or star
    PowerUp,
    /// Crash into an obstacle
    Hit,
    /// Run ended above the previous best
    HighScore,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    /// Start frequency in Hz
    pub freq: f32,
    /// Frequency swept to over the tone, if any
    pub sweep_to: Option<f32>,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Offset from the cue start, seconds
    pub delay: f64,
    pub duration: f64,
}

impl Tone {
    const fn new(wave: Waveform, freq: f32, gain: f32, delay: f64, duration: f64) -> Self {
        Self {
            wave,
            freq,
            sweep_to: None,
            gain,
            delay,
            duration,
        }
    }

    const fn sweep(mut self, to: f32) -> Self {
        self.sweep_to = Some(to);
        self
    }
}

const JUMP: [Tone; 1] = [Tone::new(Waveform::Square, 220.0, 0.2, 0.0, 0.18).sweep(660.0)];

const COLLECT: [Tone; 2] = [
    Tone::new(Waveform::Triangle, 880.0, 0.25, 0.0, 0.08),
    Tone::new(Waveform::Triangle, 1320.0, 0.25, 0.06, 0.12),
];

const POWER_UP: [Tone; 3] = [
    Tone::new(Waveform::Sawtooth, 440.0, 0.2, 0.0, 0.12),
    Tone::new(Waveform::Sawtooth, 554.0, 0.2, 0.08, 0.12),
    Tone::new(Waveform::Sawtooth, 659.0, 0.2, 0.16, 0.2),
];

const HIT: [Tone; 2] = [
    Tone::new(Waveform::Sawtooth, 180.0, 0.4, 0.0, 0.45).sweep(40.0),
    Tone::new(Waveform::Square, 90.0, 0.25, 0.05, 0.35).sweep(30.0),
];

const HIGH_SCORE: [Tone; 5] = [
    Tone::new(Waveform::Triangle, 523.0, 0.25, 0.5, 0.2),
    Tone::new(Waveform::Triangle, 659.0, 0.25, 0.58, 0.2),
    Tone::new(Waveform::Triangle, 784.0, 0.25, 0.66, 0.2),
    Tone::new(Waveform::Triangle, 1047.0, 0.25, 0.74, 0.3),
    Tone::new(Waveform::Sine, 1568.0, 0.15, 0.74, 0.4),
];

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::Collect { .. } => Some(SoundEffect::Collect),
            GameEvent::PowerUp(_) => Some(SoundEffect::PowerUp),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::RunEnded {
                new_high_score: true,
                ..
            } => Some(SoundEffect::HighScore),
            GameEvent::RunEnded { .. } => None,
        }
    }

    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::Collect => &COLLECT,
            SoundEffect::PowerUp => &POWER_UP,
            SoundEffect::Hit => &HIT,
            // Delayed so it lands after the crash
            SoundEffect::HighScore => &HIGH_SCORE,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    impl From<Waveform> for OscillatorType {
        fn from(wave: Waveform) -> Self {
            match wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Web Audio playback
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume the context (browsers require a user gesture first)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let start = ctx.current_time();
            for tone in effect.tones() {
                self.play_tone(ctx, tone, start);
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            tone: &Tone,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(tone.wave.into());
            osc.frequency().set_value(tone.freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, start: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, tone) else {
                return;
            };
            let t = start + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if let Some(to) = tone.sweep_to {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }
}
