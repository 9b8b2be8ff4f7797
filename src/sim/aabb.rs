//! Axis-aligned box geometry for bodies
//!
//! World space uses screen orientation: x grows right, y grows DOWN.
//! Boxes are positioned by their centre, like the sprites they stand in for.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    /// Half extents (always non-negative)
    pub half: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size.abs() * 0.5,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    /// Upper edge (smallest y)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    /// Lower edge (largest y)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlap depth on each axis (non-positive component = separated)
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        let d = (self.center - other.center).abs();
        self.half + other.half - d
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half: self.half,
        }
    }
}
