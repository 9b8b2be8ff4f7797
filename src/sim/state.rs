//! Game state and phase types
//!
//! Everything the state machine mutates lives in [`GameState`]; the bodies
//! themselves live in the physics world and are referenced by handle.

use serde::{Deserialize, Serialize};

use super::physics::BodyHandle;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, nothing spawned yet
    Idle,
    /// Tearing down the previous level and spawning this one
    Loading(usize),
    /// Active gameplay
    Playing,
    /// Torn down; ticks are ignored
    Stopped,
}

/// A live coin in the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEntity {
    pub body: BodyHandle,
    pub collected: bool,
}

impl CoinEntity {
    pub fn new(body: BodyHandle) -> Self {
        Self {
            body,
            collected: false,
        }
    }
}

/// Complete mutable game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Index into the level catalog, always in range
    pub level_index: usize,
    /// Points in the current level (reset on every load)
    pub score: u32,
    pub phase: GamePhase,
    /// Static platforms of the current level, in creation order
    pub platforms: Vec<BodyHandle>,
    /// Uncollected coins of the current level, in creation order
    pub coins: Vec<CoinEntity>,
    /// Survives level loads; only position and velocity reset
    pub player: Option<BodyHandle>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            level_index: 0,
            score: 0,
            phase: GamePhase::Idle,
            platforms: Vec::new(),
            coins: Vec::new(),
            player: None,
            time_ticks: 0,
        }
    }

    /// 1-based level number for display
    pub fn level_number(&self) -> u32 {
        self.level_index as u32 + 1
    }

    /// Mark a coin collected and drop it from the active set.
    /// Returns false if it was not an active coin.
    pub fn take_coin(&mut self, body: BodyHandle) -> bool {
        let Some(coin) = self.coins.iter_mut().find(|c| c.body == body && !c.collected) else {
            return false;
        };
        coin.collected = true;
        self.coins.retain(|c| !c.collected);
        true
    }

    pub fn all_coins_collected(&self) -> bool {
        self.coins.is_empty()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.level_number(), 1);
        assert!(state.all_coins_collected());
    }

    #[test]
    fn test_take_coin_once() {
        let mut state = GameState::new();
        let a = BodyHandle::new(1);
        let b = BodyHandle::new(2);
        state.coins = vec![CoinEntity::new(a), CoinEntity::new(b)];

        assert!(state.take_coin(a));
        assert!(!state.take_coin(a));
        assert_eq!(state.coins, vec![CoinEntity::new(b)]);

        assert!(state.take_coin(b));
        assert!(state.all_coins_collected());
    }
}
