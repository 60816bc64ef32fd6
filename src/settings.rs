//! Runtime preferences
//!
//! In-memory only; defaults apply on every start.

/// Game settings/preferences
#[derive(Debug, Clone)]
pub struct Settings {
    // === Visual Effects ===
    /// Background grid overlay
    pub grid: bool,
    /// Per-frame scratch lines
    pub jitter: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: true,
            jitter: true,
            show_fps: true,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Volume the audio layer should actually apply
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }
}
