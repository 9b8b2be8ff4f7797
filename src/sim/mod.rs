//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - Fixed timestep ticks, single threaded
//! - Seeded RNG for reproducible runs
//! - Stable iteration order (by body handle / creation order)
//! - Physics behind the `PhysicsWorld` trait so it can be faked in tests

pub mod aabb;
pub mod anim;
pub mod collision;
pub mod input;
pub mod levels;
pub mod machine;
pub mod physics;
pub mod state;

pub use aabb::Aabb;
pub use anim::AnimationClip;
pub use collision::{CollisionResult, body_static_collision, bounce_velocity, clamp_to_bounds};
pub use input::{InputController, MoveIntent, TickInput};
pub use levels::{CoinDef, LevelCatalog, LevelDefinition, PlatformDef, Point};
pub use machine::{GameStateMachine, TickReport};
pub use physics::{ArcadeWorld, BodyGroup, BodyHandle, OverlapEvent, PhysicsWorld};
pub use state::{CoinEntity, GamePhase, GameState};
