//! Collision detection and response for boxes against static platforms
//!
//! Discrete resolution: after integrating a body we look at where it was
//! before the step to decide which face of the platform it came through,
//! then push it back out along that face. Speeds are low relative to body
//! sizes at the fixed timestep, so no swept test is needed.

use glam::Vec2;

use super::aabb::Aabb;

/// Edge tolerance when classifying the approach side
const SIDE_EPSILON: f32 = 0.01;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal pointing out of the platform toward the body
    pub normal: Vec2,
    /// Penetration depth (push the body this far along `normal`)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn contact(normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration: penetration.max(0.0),
        }
    }

    /// The body landed on the platform's upper face
    pub fn is_floor(&self) -> bool {
        self.hit && self.normal.y < 0.0
    }
}

/// Check a moving body against a static box.
///
/// `prev` is the body before this tick's integration, `curr` after it.
pub fn body_static_collision(prev: &Aabb, curr: &Aabb, wall: &Aabb) -> CollisionResult {
    if !curr.intersects(wall) {
        return CollisionResult::miss();
    }

    // Approach side from the previous position. Top wins ties so corner
    // landings settle on the surface instead of snagging on the side.
    if prev.bottom() <= wall.top() + SIDE_EPSILON {
        return CollisionResult::contact(Vec2::NEG_Y, curr.bottom() - wall.top());
    }
    if prev.top() >= wall.bottom() - SIDE_EPSILON {
        return CollisionResult::contact(Vec2::Y, wall.bottom() - curr.top());
    }
    if prev.right() <= wall.left() + SIDE_EPSILON {
        return CollisionResult::contact(Vec2::NEG_X, curr.right() - wall.left());
    }
    if prev.left() >= wall.right() - SIDE_EPSILON {
        return CollisionResult::contact(Vec2::X, wall.right() - curr.left());
    }

    // Already overlapping before the step (spawned inside): shallowest axis
    let overlap = curr.overlap(wall);
    let delta = curr.center - wall.center;
    if overlap.x < overlap.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult::contact(Vec2::new(sign, 0.0), overlap.x)
    } else {
        let sign = if delta.y > 0.0 { 1.0 } else { -1.0 };
        CollisionResult::contact(Vec2::new(0.0, sign), overlap.y)
    }
}

/// Velocity after striking a surface with the given normal.
///
/// The component into the surface is reflected and scaled by `restitution`;
/// rebounds slower than `rest_speed` are dropped so resting bodies stay put.
pub fn bounce_velocity(vel: Vec2, normal: Vec2, restitution: f32, rest_speed: f32) -> Vec2 {
    let into = vel.dot(normal);
    if into >= 0.0 {
        // Already separating
        return vel;
    }
    let tangential = vel - into * normal;
    let rebound = -into * restitution;
    if rebound < rest_speed {
        tangential
    } else {
        tangential + normal * rebound
    }
}

/// Clamp a body inside `[0, width] × [0, height]`, zeroing velocity into the bound
pub fn clamp_to_bounds(body: &mut Aabb, vel: &mut Vec2, width: f32, height: f32) {
    if body.left() < 0.0 {
        body.center.x = body.half.x;
        vel.x = vel.x.max(0.0);
    } else if body.right() > width {
        body.center.x = width - body.half.x;
        vel.x = vel.x.min(0.0);
    }

    if body.top() < 0.0 {
        body.center.y = body.half.y;
        vel.y = vel.y.max(0.0);
    } else if body.bottom() > height {
        body.center.y = height - body.half.y;
        vel.y = vel.y.min(0.0);
    }
}
