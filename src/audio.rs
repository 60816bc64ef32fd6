//! Audio system using Web Audio API
//!
//! The four gameplay tones are sampled into buffers once at startup - no
//! external files needed. When the context cannot be created every call
//! becomes a no-op; the game never notices.

use std::f32::consts::TAU;

use web_sys::{AudioBuffer, AudioContext};

/// Amplitude of the synthesized tones
const TONE_GAIN: f32 = 0.2;

/// Sound cues triggered by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Ball rebounds off the paddle (440 Hz)
    PaddleHit,
    /// Brick destroyed (880 Hz)
    BrickBreak,
    /// Wall bounce (220 Hz)
    WallBounce,
    /// Ball fell out (110 Hz, longer)
    BallLost,
}

impl Cue {
    /// Frequency and duration of each beep
    fn tone(self) -> (f32, f32) {
        match self {
            Cue::PaddleHit => (440.0, 0.1),
            Cue::BrickBreak => (880.0, 0.1),
            Cue::WallBounce => (220.0, 0.1),
            Cue::BallLost => (110.0, 0.5),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Backend>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let backend = Backend::init();
        if backend.is_none() {
            log::warn!("Failed to set up Web Audio - running silent");
        }
        Self {
            backend,
            volume: 0.8,
        }
    }

    /// Set the playback volume (0.0 - 1.0); zero silences everything
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a cue, fire-and-forget. Overlapping playback is fine - every
    /// call gets its own source node.
    pub fn play(&self, cue: Cue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(backend) = &self.backend else { return };

        // Browsers keep the context suspended until a user gesture
        if backend.ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = backend.ctx.resume();
        }

        backend.start(cue, self.volume);
    }

    /// Release the audio device on quit
    pub fn shutdown(&self) {
        if let Some(backend) = &self.backend {
            let _ = backend.ctx.close();
        }
    }
}

/// The live audio context plus the pre-sampled tone buffers
struct Backend {
    ctx: AudioContext,
    paddle_tone: AudioBuffer,
    brick_tone: AudioBuffer,
    wall_tone: AudioBuffer,
    lost_tone: AudioBuffer,
}

impl Backend {
    /// Create the context and sample all four tones up front. Any failure
    /// here disables audio for the whole session.
    fn init() -> Option<Self> {
        let ctx = AudioContext::new().ok()?;
        Some(Self {
            paddle_tone: sine_tone(&ctx, Cue::PaddleHit)?,
            brick_tone: sine_tone(&ctx, Cue::BrickBreak)?,
            wall_tone: sine_tone(&ctx, Cue::WallBounce)?,
            lost_tone: sine_tone(&ctx, Cue::BallLost)?,
            ctx,
        })
    }

    fn buffer(&self, cue: Cue) -> &AudioBuffer {
        match cue {
            Cue::PaddleHit => &self.paddle_tone,
            Cue::BrickBreak => &self.brick_tone,
            Cue::WallBounce => &self.wall_tone,
            Cue::BallLost => &self.lost_tone,
        }
    }

    fn start(&self, cue: Cue, vol: f32) {
        let _ = self.try_start(cue, vol);
    }

    fn try_start(&self, cue: Cue, vol: f32) -> Option<()> {
        let source = self.ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(self.buffer(cue)));

        let gain = self.ctx.create_gain().ok()?;
        gain.gain().set_value(vol);

        source.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&self.ctx.destination()).ok()?;
        source.start().ok()?;
        Some(())
    }
}

/// Sample one sine beep into a mono buffer at the context's sample rate
fn sine_tone(ctx: &AudioContext, cue: Cue) -> Option<AudioBuffer> {
    let (freq, duration) = cue.tone();
    let sample_rate = ctx.sample_rate();
    let n_samples = (duration * sample_rate).round() as u32;

    let buffer = ctx.create_buffer(1, n_samples, sample_rate).ok()?;
    let mut samples = vec![0.0f32; n_samples as usize];
    for (i, sample) in samples.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;
        *sample = (TAU * freq * t).sin() * TONE_GAIN;
    }
    buffer.copy_to_channel(&mut samples, 0).ok()?;

    Some(buffer)
}
