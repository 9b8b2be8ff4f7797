//! Coin Hopper - a side-scrolling coin collecting platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (levels, physics, input, game state machine)
//! - `hud`: Score/level notifications for the display layer
//! - `viewport`: Fixed logical play area exposed to the host
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Crate error type

pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use error::{GameError, Result};
pub use hud::{Hud, LogSink, ScoreSink};
pub use settings::Settings;
pub use viewport::Viewport;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Logical play area
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 450.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 600.0;

    /// Horizontal walk speed (units/s)
    pub const RUN_SPEED: f32 = 160.0;
    /// Upward velocity applied on jump (units/s)
    pub const JUMP_SPEED: f32 = 350.0;

    /// Points awarded per coin
    pub const COIN_VALUE: u32 = 10;

    /// Coin restitution is sampled per coin from this range
    pub const COIN_BOUNCE_MIN: f32 = 0.3;
    pub const COIN_BOUNCE_MAX: f32 = 0.7;
    /// Player restitution against platforms
    pub const PLAYER_BOUNCE: f32 = 0.2;
    /// Rebounds slower than this come to rest
    pub const REST_SPEED: f32 = 30.0;

    /// Body sizes (match the sprite footprints)
    pub const PLATFORM_WIDTH: f32 = 400.0;
    pub const PLATFORM_HEIGHT: f32 = 32.0;
    pub const COIN_WIDTH: f32 = 24.0;
    pub const COIN_HEIGHT: f32 = 22.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
}
