//! Directional input to player velocity intent
//!
//! Stateless: each tick's intent depends only on that tick's keys and
//! whether the player is grounded.

use serde::{Deserialize, Serialize};

use super::anim::AnimationClip;
use crate::settings::Settings;

/// Raw directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// What the player body should do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    /// Horizontal velocity to set (always applied)
    pub vx: f32,
    /// Vertical velocity to set, only when jumping
    pub vy: Option<f32>,
    pub animation: AnimationClip,
}

/// Input tuning (walk speed and jump impulse)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputController {
    run_speed: f32,
    jump_speed: f32,
}

impl InputController {
    pub fn new(run_speed: f32, jump_speed: f32) -> Self {
        Self {
            run_speed,
            jump_speed,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.run_speed, settings.jump_speed)
    }

    /// Translate held keys into a velocity intent.
    ///
    /// Holding up while grounded jumps on every such tick; there is no
    /// press edge detection.
    pub fn sample(&self, input: &TickInput, grounded: bool) -> MoveIntent {
        let (vx, animation) = match (input.left, input.right) {
            (true, false) => (-self.run_speed, AnimationClip::Left),
            (false, true) => (self.run_speed, AnimationClip::Right),
            _ => (0.0, AnimationClip::Turn),
        };

        let vy = (input.up && grounded).then_some(-self.jump_speed);

        MoveIntent { vx, vy, animation }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(left: bool, right: bool, up: bool) -> TickInput {
        TickInput { left, right, up }
    }

    #[test]
    fn test_walk_left_right() {
        let ctl = InputController::default();

        let intent = ctl.sample(&keys(true, false, false), true);
        assert_eq!(intent.vx, -160.0);
        assert_eq!(intent.animation, AnimationClip::Left);

        let intent = ctl.sample(&keys(false, true, false), true);
        assert_eq!(intent.vx, 160.0);
        assert_eq!(intent.animation, AnimationClip::Right);
    }

    #[test]
    fn test_idle_when_neither_or_both() {
        let ctl = InputController::default();
        for input in [keys(false, false, false), keys(true, true, false)] {
            let intent = ctl.sample(&input, true);
            assert_eq!(intent.vx, 0.0);
            assert_eq!(intent.animation, AnimationClip::Turn);
            assert_eq!(intent.vy, None);
        }
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let ctl = InputController::default();
        assert_eq!(ctl.sample(&keys(false, false, true), true).vy, Some(-350.0));
        assert_eq!(ctl.sample(&keys(false, false, true), false).vy, None);
    }

    #[test]
    fn test_air_control() {
        let ctl = InputController::default();
        let intent = ctl.sample(&keys(false, true, true), false);
        assert_eq!(intent.vx, 160.0);
        assert_eq!(intent.vy, None);
    }

    #[test]
    fn test_held_jump_retriggers() {
        let ctl = InputController::default();
        let held = keys(false, false, true);
        for _ in 0..3 {
            assert_eq!(ctl.sample(&held, true).vy, Some(-350.0));
        }
    }
}
