//! Game state machine
//!
//! Drives level loading, per-tick input and physics, and coin pickup.
//! Knows nothing about rendering: it talks to a [`PhysicsWorld`] and
//! reports HUD changes to a [`ScoreSink`].
//!
//! Phases cycle forever: `Loading(n) -> Playing -> Loading(n + 1) -> ...`,
//! wrapping to the first level after the last.

use glam::Vec2;

use super::anim::AnimationClip;
use super::input::{InputController, TickInput};
use super::levels::LevelCatalog;
use super::physics::{BodyGroup, BodyHandle, OverlapEvent, PhysicsWorld};
use super::state::{CoinEntity, GamePhase, GameState};
use crate::error::Result;
use crate::hud::ScoreSink;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Clip the presentation layer should play for the player
    pub animation: AnimationClip,
    pub coins_collected: u32,
    /// The last coin was taken and the next level is now loaded
    pub level_loaded: bool,
}

pub struct GameStateMachine<W: PhysicsWorld, S: ScoreSink> {
    catalog: LevelCatalog,
    world: W,
    sink: S,
    input: InputController,
    coin_value: u32,
    state: GameState,
}

impl<W: PhysicsWorld, S: ScoreSink> GameStateMachine<W, S> {
    /// Nothing is spawned until [`GameStateMachine::start`]
    pub fn new(catalog: LevelCatalog, world: W, sink: S, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            catalog,
            world,
            sink,
            input: InputController::from_settings(settings),
            coin_value: settings.coin_value,
            state: GameState::new(),
        })
    }

    /// Spawn the player and load the first level
    pub fn start(&mut self) -> Result<()> {
        if self.state.phase != GamePhase::Idle {
            log::warn!("start ignored in phase {:?}", self.state.phase);
            return Ok(());
        }
        let spawn = self.catalog.get(0)?.player_start;
        self.state.player = Some(self.world.create_player(spawn.x, spawn.y));
        self.load_level(0)
    }

    /// Replace the current level with `index` (wrapped into the catalog).
    ///
    /// Old platforms and coins are destroyed before any new body is created,
    /// the player is moved to the level start, and the score resets to 0.
    pub fn load_level(&mut self, index: usize) -> Result<()> {
        if self.state.phase == GamePhase::Stopped {
            log::warn!("load_level({index}) after teardown ignored");
            return Ok(());
        }

        let index = self.catalog.wrap(index);
        self.state.phase = GamePhase::Loading(index);

        self.world.clear(BodyGroup::Platforms);
        self.world.clear(BodyGroup::Coins);
        self.state.platforms.clear();
        self.state.coins.clear();

        let level = self.catalog.get(index)?;
        for p in &level.platforms {
            let body = self.world.create_platform(p.x, p.y, p.scale);
            self.state.platforms.push(body);
        }
        for c in &level.coins {
            let body = self.world.create_coin(c.x, c.y);
            self.state.coins.push(CoinEntity::new(body));
        }

        let start = level.player_start;
        match self.state.player {
            Some(player) => {
                self.world.set_velocity(player, Vec2::ZERO);
                self.world.set_position(player, Vec2::new(start.x, start.y));
            }
            None => self.state.player = Some(self.world.create_player(start.x, start.y)),
        }

        self.state.level_index = index;
        self.state.score = 0;
        self.sink.on_score_changed(0);
        self.sink.on_level_changed(self.state.level_number());

        log::info!(
            "Level {} loaded: {} platforms, {} coins",
            self.state.level_number(),
            self.state.platforms.len(),
            self.state.coins.len()
        );

        self.state.phase = GamePhase::Playing;
        Ok(())
    }

    /// Handle a single player/coin contact reported outside of [`GameStateMachine::tick`].
    ///
    /// Returns true if the coin was collected. Advances the level when it was
    /// the last one.
    pub fn on_coin_collision(&mut self, coin: BodyHandle) -> Result<bool> {
        let collected = self.collect_coin(coin);
        self.advance_if_cleared()?;
        Ok(collected)
    }

    /// Advance one tick: input, physics, then every overlap from this step.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Result<TickReport> {
        if self.state.phase != GamePhase::Playing {
            return Ok(TickReport::default());
        }
        let Some(player) = self.state.player else {
            return Ok(TickReport::default());
        };

        self.state.time_ticks += 1;

        let grounded = self.world.is_touching_ground(player);
        let intent = self.input.sample(input, grounded);
        let vel = self.world.velocity(player).unwrap_or(Vec2::ZERO);
        self.world
            .set_velocity(player, Vec2::new(intent.vx, intent.vy.unwrap_or(vel.y)));

        let events = self.world.step(dt);
        let coins_collected = self.dispatch_overlaps(player, events);

        // Checked once all of this tick's overlaps are in
        let level_loaded = self.advance_if_cleared()?;

        Ok(TickReport {
            animation: intent.animation,
            coins_collected,
            level_loaded,
        })
    }

    /// Release every body. Safe to call repeatedly or before `start`.
    pub fn teardown(&mut self) {
        if self.state.phase == GamePhase::Stopped {
            return;
        }
        self.world.shutdown();
        self.state.platforms.clear();
        self.state.coins.clear();
        self.state.player = None;
        self.state.phase = GamePhase::Stopped;
        log::info!("Game torn down after {} ticks", self.state.time_ticks);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn level_index(&self) -> usize {
        self.state.level_index
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.state.player.and_then(|p| self.world.position(p))
    }

    pub fn is_player_grounded(&self) -> bool {
        self.state
            .player
            .is_some_and(|p| self.world.is_touching_ground(p))
    }

    /// Positions of uncollected coins, in creation order
    pub fn coin_positions(&self) -> Vec<Vec2> {
        self.state
            .coins
            .iter()
            .filter_map(|c| self.world.position(c.body))
            .collect()
    }

    /// Process overlaps in coin creation order, whatever order the world used
    fn dispatch_overlaps(&mut self, player: BodyHandle, mut events: Vec<OverlapEvent>) -> u32 {
        events.sort_by_key(|e| e.coin);
        let mut collected = 0;
        for event in events {
            if event.player != player {
                continue;
            }
            if self.collect_coin(event.coin) {
                collected += 1;
            }
        }
        collected
    }

    fn collect_coin(&mut self, coin: BodyHandle) -> bool {
        if self.state.phase != GamePhase::Playing || !self.state.take_coin(coin) {
            return false;
        }
        self.world.disable(coin);
        self.state.score = self.state.score.saturating_add(self.coin_value);
        self.sink.on_score_changed(self.state.score);
        log::debug!(
            "coin {} collected, score {} ({} left)",
            coin.id(),
            self.state.score,
            self.state.coins.len()
        );
        true
    }

    fn advance_if_cleared(&mut self) -> Result<bool> {
        if self.state.phase != GamePhase::Playing || !self.state.all_coins_collected() {
            return Ok(false);
        }
        self.load_level(self.state.level_index + 1)?;
        Ok(true)
    }
}

impl<W: PhysicsWorld, S: ScoreSink> Drop for GameStateMachine<W, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
