//! Game settings and tuning
//!
//! Defaults give the classic feel; hosts may override any field
//! from a JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Logical play area width
    pub viewport_width: f32,
    /// Logical play area height
    pub viewport_height: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,

    // === Player ===
    /// Horizontal walk speed
    pub run_speed: f32,
    /// Upward jump velocity (positive; applied as -jump_speed)
    pub jump_speed: f32,
    pub player_bounce: f32,

    // === Coins ===
    pub coin_value: u32,
    pub coin_bounce_min: f32,
    pub coin_bounce_max: f32,

    /// Rebounds slower than this are zeroed
    pub rest_speed: f32,

    /// Fixed RNG seed for coin bounce (None = fresh entropy each run)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            gravity: GRAVITY,

            run_speed: RUN_SPEED,
            jump_speed: JUMP_SPEED,
            player_bounce: PLAYER_BOUNCE,

            coin_value: COIN_VALUE,
            coin_bounce_min: COIN_BOUNCE_MIN,
            coin_bounce_max: COIN_BOUNCE_MAX,

            rest_speed: REST_SPEED,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("run_speed", self.run_speed),
            ("jump_speed", self.jump_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(GameError::InvalidSettings(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        if !self.rest_speed.is_finite() || self.rest_speed < 0.0 {
            return Err(GameError::InvalidSettings(format!(
                "rest_speed must be non-negative, got {}",
                self.rest_speed
            )));
        }

        for (name, value) in [
            ("player_bounce", self.player_bounce),
            ("coin_bounce_min", self.coin_bounce_min),
            ("coin_bounce_max", self.coin_bounce_max),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.coin_bounce_min > self.coin_bounce_max {
            return Err(GameError::InvalidSettings(format!(
                "coin bounce range is empty: {}..={}",
                self.coin_bounce_min, self.coin_bounce_max
            )));
        }

        Ok(())
    }
}
