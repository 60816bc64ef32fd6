//! Poly Break - a low-poly breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural beep tones over Web Audio (wasm only)
//! - `settings`: Runtime preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 ticks per second)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions in logical pixels
    pub const SCREEN_WIDTH: f32 = 600.0;
    pub const SCREEN_HEIGHT: f32 = 400.0;

    /// Paddle defaults - a flat bat near the bottom edge
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Horizontal paddle movement per tick
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Distance from the screen bottom to the paddle top
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    /// Speed of the sideways deflection off the paddle
    pub const PADDLE_REBOUND_SPEED: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Horizontal speeds the serve draws from, pixels per tick
    pub const SERVE_SPEEDS: [f32; 4] = [-4.0, -3.0, 3.0, 4.0];
    /// Vertical speed right after a serve (upward)
    pub const SERVE_RISE: f32 = -4.0;

    /// Brick wall layout: BRICK_COLS columns of BRICK_ROWS rows,
    /// spanning the full screen width below BRICK_TOP_OFFSET
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 12;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    /// Points awarded per destroyed brick
    pub const BRICK_SCORE: u64 = 10;

    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;
}
