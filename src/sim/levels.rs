//! Level definitions and the ordered level catalog
//!
//! Levels are static data: built once at startup, validated, then only read.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// A 2D spawn coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A static platform; `scale` multiplies the base footprint uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Coin spawn point. `y == 0` drops the coin from the top of the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinDef {
    pub x: f32,
    pub y: f32,
}

/// One hand-authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub player_start: Point,
    pub platforms: Vec<PlatformDef>,
    pub coins: Vec<CoinDef>,
}

impl LevelDefinition {
    /// Fail-fast sanity check, `level` is only used for the error message
    pub fn validate(&self, level: usize) -> Result<()> {
        let Point { x, y } = self.player_start;
        if !x.is_finite() || !y.is_finite() {
            return Err(GameError::invalid_level(level, "player start is not finite"));
        }

        for (i, p) in self.platforms.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(GameError::invalid_level(
                    level,
                    format!("platform {i} position is not finite"),
                ));
            }
            if !p.scale.is_finite() || p.scale <= 0.0 {
                return Err(GameError::invalid_level(
                    level,
                    format!("platform {i} has invalid scale {}", p.scale),
                ));
            }
        }

        // A level without coins could never be completed
        if self.coins.is_empty() {
            return Err(GameError::invalid_level(level, "level has no coins"));
        }
        for (i, c) in self.coins.iter().enumerate() {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(GameError::invalid_level(
                    level,
                    format!("coin {i} position is not finite"),
                ));
            }
        }

        Ok(())
    }
}

/// Ordered, immutable list of playable levels
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Build a catalog, validating every level up front
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }
        Ok(Self { levels })
    }

    /// Parse a catalog from a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let levels: Vec<LevelDefinition> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The two shipped levels
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelDefinition {
                    player_start: Point::new(100.0, 350.0),
                    platforms: vec![
                        PlatformDef {
                            x: 400.0,
                            y: 440.0,
                            scale: 2.0,
                        },
                        PlatformDef {
                            x: 600.0,
                            y: 350.0,
                            scale: 1.0,
                        },
                        PlatformDef {
                            x: 50.0,
                            y: 250.0,
                            scale: 1.0,
                        },
                        PlatformDef {
                            x: 750.0,
                            y: 220.0,
                            scale: 1.0,
                        },
                    ],
                    coins: coin_row(50.0, 70.0, 10),
                },
                LevelDefinition {
                    player_start: Point::new(50.0, 350.0),
                    platforms: vec![
                        PlatformDef {
                            x: 300.0,
                            y: 440.0,
                            scale: 3.0,
                        },
                        PlatformDef {
                            x: 550.0,
                            y: 350.0,
                            scale: 1.0,
                        },
                        PlatformDef {
                            x: 100.0,
                            y: 250.0,
                            scale: 1.0,
                        },
                        PlatformDef {
                            x: 700.0,
                            y: 220.0,
                            scale: 1.0,
                        },
                    ],
                    coins: coin_row(100.0, 70.0, 10),
                },
            ],
        }
    }

    /// Level at `index`. Callers normally go through [`LevelCatalog::wrap`] first.
    pub fn get(&self, index: usize) -> Result<&LevelDefinition> {
        self.levels.get(index).ok_or(GameError::LevelOutOfRange {
            index,
            len: self.levels.len(),
        })
    }

    /// Map any index into the catalog (wraps past the last level)
    pub fn wrap(&self, index: usize) -> usize {
        index % self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Evenly spaced coins dropped from the top of the world
fn coin_row(start_x: f32, spacing: f32, count: usize) -> Vec<CoinDef> {
    (0..count)
        .map(|i| CoinDef {
            x: start_x + spacing * i as f32,
            y: 0.0,
        })
        .collect()
}
