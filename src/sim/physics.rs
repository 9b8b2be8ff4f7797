//! Physics world: body ownership, gravity integration, platform collision
//! and player/coin overlap reporting.
//!
//! [`PhysicsWorld`] is the narrow capability surface the state machine talks
//! to; [`ArcadeWorld`] is the built-in implementation. Tests swap in a fake.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{body_static_collision, bounce_velocity, clamp_to_bounds};
use crate::consts::*;
use crate::settings::Settings;

/// Opaque reference to a body owned by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(u32);

impl BodyHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Body groups that can be cleared as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyGroup {
    Platforms,
    Coins,
    Player,
}

/// Player body overlapping an uncollected coin during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    pub player: BodyHandle,
    pub coin: BodyHandle,
}

/// Capabilities the game state machine needs from a physics engine.
///
/// Positions are body centres in world units (y down), velocities are
/// units per second. Operations on unknown handles are no-ops.
pub trait PhysicsWorld {
    /// Static, gravity-free body; footprint scaled uniformly by `scale`
    fn create_platform(&mut self, x: f32, y: f32, scale: f32) -> BodyHandle;
    /// Dynamic, gravity-affected body with its own bounce
    fn create_coin(&mut self, x: f32, y: f32) -> BodyHandle;
    /// The single player body (clamped to world bounds)
    fn create_player(&mut self, x: f32, y: f32) -> BodyHandle;

    fn set_velocity(&mut self, body: BodyHandle, vel: Vec2);
    fn velocity(&self, body: BodyHandle) -> Option<Vec2>;
    fn set_position(&mut self, body: BodyHandle, pos: Vec2);
    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    /// True while the body's lower edge rests on a platform
    fn is_touching_ground(&self, body: BodyHandle) -> bool;

    /// Advance one tick. Events are ordered by coin creation order.
    fn step(&mut self, dt: f32) -> Vec<OverlapEvent>;

    /// Remove a single body from the simulation
    fn disable(&mut self, body: BodyHandle);
    /// Destroy every body in `group`
    fn clear(&mut self, group: BodyGroup);
    fn body_count(&self, group: BodyGroup) -> usize;

    /// Release everything. Must be safe to call repeatedly.
    fn shutdown(&mut self);
}

#[derive(Debug, Clone)]
struct Body {
    handle: BodyHandle,
    bounds: Aabb,
    vel: Vec2,
    restitution: f32,
    touching_down: bool,
}

impl Body {
    fn new(handle: BodyHandle, center: Vec2, size: Vec2, restitution: f32) -> Self {
        Self {
            handle,
            bounds: Aabb::from_center_size(center, size),
            vel: Vec2::ZERO,
            restitution,
            touching_down: false,
        }
    }

    /// Gravity, integration, then push out of any platform it entered
    fn integrate(&mut self, platforms: &[Body], gravity: f32, rest_speed: f32, dt: f32) {
        let prev = self.bounds;
        self.vel.y += gravity * dt;
        self.bounds = self.bounds.translated(self.vel * dt);
        self.touching_down = false;

        for platform in platforms {
            let result = body_static_collision(&prev, &self.bounds, &platform.bounds);
            if !result.hit {
                continue;
            }
            self.bounds.center += result.normal * result.penetration;
            self.vel = bounce_velocity(self.vel, result.normal, self.restitution, rest_speed);
            if result.is_floor() {
                self.touching_down = true;
            }
        }
    }
}

/// Built-in arcade-style physics: gravity, static platforms, AABB overlaps
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    gravity: f32,
    width: f32,
    height: f32,
    player_bounce: f32,
    coin_bounce: (f32, f32),
    rest_speed: f32,
    rng: Pcg32,
    /// Each list stays in creation (handle) order
    platforms: Vec<Body>,
    coins: Vec<Body>,
    player: Option<Body>,
    next_id: u32,
}

impl ArcadeWorld {
    pub fn new(settings: &Settings, rng: Pcg32) -> Self {
        Self {
            gravity: settings.gravity,
            width: settings.viewport_width,
            height: settings.viewport_height,
            player_bounce: settings.player_bounce,
            coin_bounce: (settings.coin_bounce_min, settings.coin_bounce_max),
            rest_speed: settings.rest_speed,
            rng,
            platforms: Vec::new(),
            coins: Vec::new(),
            player: None,
            next_id: 1,
        }
    }

    /// Reproducible coin bounce
    pub fn seeded(settings: &Settings, seed: u64) -> Self {
        Self::new(settings, Pcg32::seed_from_u64(seed))
    }

    /// Fresh coin bounce every run
    pub fn from_entropy(settings: &Settings) -> Self {
        Self::new(settings, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Seeded when the settings carry a seed, entropy otherwise
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.seed {
            Some(seed) => Self::seeded(settings, seed),
            None => Self::from_entropy(settings),
        }
    }

    /// Bounds of a live body
    pub fn bounds(&self, body: BodyHandle) -> Option<Aabb> {
        self.find(body).map(|b| b.bounds)
    }

    /// Bounce factor of a live body
    pub fn restitution(&self, body: BodyHandle) -> Option<f32> {
        self.find(body).map(|b| b.restitution)
    }

    fn next_handle(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    fn find(&self, handle: BodyHandle) -> Option<&Body> {
        self.player
            .iter()
            .chain(self.coins.iter())
            .chain(self.platforms.iter())
            .find(|b| b.handle == handle)
    }

    fn find_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.player
            .iter_mut()
            .chain(self.coins.iter_mut())
            .chain(self.platforms.iter_mut())
            .find(|b| b.handle == handle)
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn create_platform(&mut self, x: f32, y: f32, scale: f32) -> BodyHandle {
        let handle = self.next_handle();
        let size = Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT) * scale;
        self.platforms.push(Body::new(handle, Vec2::new(x, y), size, 0.0));
        log::debug!("platform {} at ({x}, {y}) x{scale}", handle.id());
        handle
    }

    fn create_coin(&mut self, x: f32, y: f32) -> BodyHandle {
        let handle = self.next_handle();
        let (min, max) = self.coin_bounce;
        let restitution = self.rng.random_range(min..=max);
        let size = Vec2::new(COIN_WIDTH, COIN_HEIGHT);
        self.coins.push(Body::new(handle, Vec2::new(x, y), size, restitution));
        log::debug!("coin {} at ({x}, {y}) bounce {restitution:.2}", handle.id());
        handle
    }

    fn create_player(&mut self, x: f32, y: f32) -> BodyHandle {
        if let Some(existing) = self.player.as_mut() {
            log::warn!("player already exists, moving body {}", existing.handle.id());
            existing.bounds.center = Vec2::new(x, y);
            existing.vel = Vec2::ZERO;
            return existing.handle;
        }
        let handle = self.next_handle();
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        self.player = Some(Body::new(handle, Vec2::new(x, y), size, self.player_bounce));
        handle
    }

    fn set_velocity(&mut self, body: BodyHandle, vel: Vec2) {
        match self.find_mut(body) {
            Some(b) => b.vel = vel,
            None => log::warn!("set_velocity on unknown body {}", body.id()),
        }
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.find(body).map(|b| b.vel)
    }

    fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        match self.find_mut(body) {
            Some(b) => {
                b.bounds.center = pos;
                b.touching_down = false;
            }
            None => log::warn!("set_position on unknown body {}", body.id()),
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.find(body).map(|b| b.bounds.center)
    }

    fn is_touching_ground(&self, body: BodyHandle) -> bool {
        self.find(body).is_some_and(|b| b.touching_down)
    }

    fn step(&mut self, dt: f32) -> Vec<OverlapEvent> {
        if let Some(player) = self.player.as_mut() {
            player.integrate(&self.platforms, self.gravity, self.rest_speed, dt);
            // World bounds never count as ground
            clamp_to_bounds(&mut player.bounds, &mut player.vel, self.width, self.height);
        }

        for coin in &mut self.coins {
            coin.integrate(&self.platforms, self.gravity, self.rest_speed, dt);
        }

        let Some(player) = self.player.as_ref() else {
            return Vec::new();
        };
        self.coins
            .iter()
            .filter(|coin| player.bounds.intersects(&coin.bounds))
            .map(|coin| OverlapEvent {
                player: player.handle,
                coin: coin.handle,
            })
            .collect()
    }

    fn disable(&mut self, body: BodyHandle) {
        if self.player.as_ref().is_some_and(|p| p.handle == body) {
            self.player = None;
            return;
        }
        let before = self.coins.len() + self.platforms.len();
        self.coins.retain(|b| b.handle != body);
        self.platforms.retain(|b| b.handle != body);
        if self.coins.len() + self.platforms.len() == before {
            log::warn!("disable on unknown body {}", body.id());
        }
    }

    fn clear(&mut self, group: BodyGroup) {
        match group {
            BodyGroup::Platforms => self.platforms.clear(),
            BodyGroup::Coins => self.coins.clear(),
            BodyGroup::Player => self.player = None,
        }
    }

    fn body_count(&self, group: BodyGroup) -> usize {
        match group {
            BodyGroup::Platforms => self.platforms.len(),
            BodyGroup::Coins => self.coins.len(),
            BodyGroup::Player => usize::from(self.player.is_some()),
        }
    }

    fn shutdown(&mut self) {
        let released = self.platforms.len() + self.coins.len() + usize::from(self.player.is_some());
        self.platforms.clear();
        self.coins.clear();
        self.player = None;
        if released > 0 {
            log::info!("physics world released {released} bodies");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> ArcadeWorld {
        ArcadeWorld::seeded(&Settings::default(), 12345)
    }

    /// Centre y for a player standing on a platform whose top face is `top`
    fn standing_y(top: f32) -> f32 {
        top - PLAYER_HEIGHT / 2.0
    }

    #[test]
    fn test_platform_scaled_footprint() {
        let mut w = world();
        let p = w.create_platform(400.0, 440.0, 2.0);
        let b = w.bounds(p).unwrap();
        assert_eq!(b.size(), Vec2::new(800.0, 64.0));
        assert_eq!(b.top(), 408.0);
    }

    #[test]
    fn test_coin_bounce_in_range() {
        let mut w = world();
        for i in 0..50 {
            let c = w.create_coin(i as f32 * 10.0, 0.0);
            let r = w.restitution(c).unwrap();
            assert!((0.3..=0.7).contains(&r), "restitution {r} out of range");
        }
    }

    #[test]
    fn test_seeded_bounce_is_reproducible() {
        let mut a = world();
        let mut b = world();
        let ca: Vec<_> = (0..5).map(|_| a.create_coin(0.0, 0.0)).collect();
        let cb: Vec<_> = (0..5).map(|_| b.create_coin(0.0, 0.0)).collect();
        for (x, y) in ca.iter().zip(&cb) {
            assert_eq!(a.restitution(*x), b.restitution(*y));
        }
    }

    #[test]
    fn test_player_lands_and_rests() {
        let mut w = world();
        let platform = w.create_platform(400.0, 440.0, 2.0);
        let top = w.bounds(platform).unwrap().top();
        let player = w.create_player(100.0, standing_y(top));
        assert!(!w.is_touching_ground(player));

        w.step(SIM_DT);
        assert!(w.is_touching_ground(player));
        assert_eq!(w.velocity(player).unwrap().y, 0.0);
        let bottom = w.bounds(player).unwrap().bottom();
        assert!((bottom - top).abs() < 1e-3);

        // No downward drift over many ticks
        for _ in 0..120 {
            w.step(SIM_DT);
        }
        assert!(w.is_touching_ground(player));
        assert!((w.bounds(player).unwrap().bottom() - top).abs() < 1e-3);
    }

    #[test]
    fn test_player_falls_onto_platform() {
        let mut w = world();
        let platform = w.create_platform(400.0, 440.0, 2.0);
        let top = w.bounds(platform).unwrap().top();
        let player = w.create_player(100.0, standing_y(top) - 60.0);

        let mut landed = false;
        for _ in 0..120 {
            w.step(SIM_DT);
            if w.is_touching_ground(player) {
                landed = true;
            }
        }
        assert!(landed);
        assert!(w.is_touching_ground(player));
        assert!(w.bounds(player).unwrap().bottom() <= top + 1e-3);
        assert_eq!(w.velocity(player).unwrap().y, 0.0);
    }

    #[test]
    fn test_airborne_not_grounded() {
        let mut w = world();
        w.create_platform(400.0, 440.0, 2.0);
        let player = w.create_player(100.0, 100.0);
        w.step(SIM_DT);
        assert!(!w.is_touching_ground(player));
        assert!(w.velocity(player).unwrap().y > 0.0);
    }

    #[test]
    fn test_world_floor_is_not_ground() {
        let mut w = world();
        let player = w.create_player(100.0, 450.0 - PLAYER_HEIGHT / 2.0);
        for _ in 0..10 {
            w.step(SIM_DT);
        }
        assert!(!w.is_touching_ground(player));
        assert!(w.bounds(player).unwrap().bottom() <= 450.0);
    }

    #[test]
    fn test_player_clamped_to_side_bounds() {
        let mut w = world();
        let player = w.create_player(20.0, 100.0);
        w.set_velocity(player, Vec2::new(-160.0, 0.0));
        for _ in 0..10 {
            w.step(SIM_DT);
        }
        assert_eq!(w.bounds(player).unwrap().left(), 0.0);
        assert_eq!(w.velocity(player).unwrap().x, 0.0);
    }

    #[test]
    fn test_coin_falls_onto_platform() {
        let mut w = world();
        let platform = w.create_platform(400.0, 440.0, 2.0);
        let top = w.bounds(platform).unwrap().top();
        let coin = w.create_coin(300.0, 0.0);
        for _ in 0..600 {
            w.step(SIM_DT);
        }
        let b = w.bounds(coin).unwrap();
        assert!(b.bottom() <= top + 1e-3, "coin sank into platform");
        assert!(b.bottom() > top - 1.0, "coin did not settle");
        assert!(w.is_touching_ground(coin));
    }

    #[test]
    fn test_overlap_events_in_creation_order() {
        let mut w = world();
        let player = w.create_player(100.0, 100.0);
        let a = w.create_coin(95.0, 100.0);
        let far = w.create_coin(600.0, 100.0);
        let b = w.create_coin(105.0, 100.0);

        let events = w.step(SIM_DT);
        assert_eq!(
            events,
            vec![
                OverlapEvent { player, coin: a },
                OverlapEvent { player, coin: b },
            ]
        );
        assert!(!events.iter().any(|e| e.coin == far));
    }

    #[test]
    fn test_disabled_coin_stops_reporting() {
        let mut w = world();
        w.create_player(100.0, 100.0);
        let coin = w.create_coin(100.0, 100.0);
        assert_eq!(w.step(SIM_DT).len(), 1);
        // Not consumed: reported again
        assert_eq!(w.step(SIM_DT).len(), 1);
        w.disable(coin);
        assert!(w.step(SIM_DT).is_empty());
        assert_eq!(w.body_count(BodyGroup::Coins), 0);
    }

    #[test]
    fn test_clear_groups() {
        let mut w = world();
        w.create_platform(0.0, 0.0, 1.0);
        w.create_platform(0.0, 100.0, 1.0);
        w.create_coin(0.0, 0.0);
        let player = w.create_player(0.0, 0.0);

        w.clear(BodyGroup::Platforms);
        assert_eq!(w.body_count(BodyGroup::Platforms), 0);
        assert_eq!(w.body_count(BodyGroup::Coins), 1);

        w.clear(BodyGroup::Coins);
        assert_eq!(w.body_count(BodyGroup::Coins), 0);
        assert!(w.position(player).is_some());
    }

    #[test]
    fn test_single_player_body() {
        let mut w = world();
        let first = w.create_player(10.0, 10.0);
        let second = w.create_player(50.0, 60.0);
        assert_eq!(first, second);
        assert_eq!(w.body_count(BodyGroup::Player), 1);
        assert_eq!(w.position(first), Some(Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn test_shutdown_idempotent() {
        let mut w = world();
        w.create_platform(0.0, 0.0, 1.0);
        w.create_coin(0.0, 0.0);
        w.create_player(0.0, 0.0);
        w.shutdown();
        w.shutdown();
        assert_eq!(w.body_count(BodyGroup::Platforms), 0);
        assert_eq!(w.body_count(BodyGroup::Coins), 0);
        assert_eq!(w.body_count(BodyGroup::Player), 0);
    }

    #[test]
    fn test_unknown_handle_is_noop() {
        let mut w = world();
        let ghost = BodyHandle::new(999);
        w.set_velocity(ghost, Vec2::ONE);
        w.disable(ghost);
        assert_eq!(w.velocity(ghost), None);
        assert!(!w.is_touching_ground(ghost));
    }
}
