//! Player animation clips
//!
//! The presentation layer owns the sprite sheet; the simulation only says
//! which clip should be playing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationClip {
    Left,
    Right,
    /// Facing the camera, standing still
    #[default]
    Turn,
}

impl AnimationClip {
    pub const ALL: [AnimationClip; 3] = [
        AnimationClip::Left,
        AnimationClip::Turn,
        AnimationClip::Right,
    ];

    /// Key the sprite layer registers the clip under
    pub fn key(&self) -> &'static str {
        match self {
            AnimationClip::Left => "left",
            AnimationClip::Right => "right",
            AnimationClip::Turn => "turn",
        }
    }

    /// Inclusive sprite sheet frame range
    pub fn frames(&self) -> (u32, u32) {
        match self {
            AnimationClip::Left => (0, 3),
            AnimationClip::Turn => (4, 4),
            AnimationClip::Right => (5, 8),
        }
    }

    pub fn frame_rate(&self) -> u32 {
        match self {
            AnimationClip::Left | AnimationClip::Right => 10,
            AnimationClip::Turn => 20,
        }
    }

    pub fn looped(&self) -> bool {
        !matches!(self, AnimationClip::Turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_table() {
        assert_eq!(AnimationClip::Left.key(), "left");
        assert_eq!(AnimationClip::Right.frames(), (5, 8));
        assert_eq!(AnimationClip::Turn.frames(), (4, 4));
        assert!(AnimationClip::Left.looped());
        assert!(!AnimationClip::Turn.looped());
        assert_eq!(AnimationClip::default(), AnimationClip::Turn);
    }

    #[test]
    fn test_frame_ranges_do_not_overlap() {
        let mut frames: Vec<u32> = AnimationClip::ALL
            .iter()
            .flat_map(|c| {
                let (a, b) = c.frames();
                a..=b
            })
            .collect();
        let total = frames.len();
        frames.dedup();
        assert_eq!(frames.len(), total);
        assert_eq!(frames, (0..=8).collect::<Vec<_>>());
    }
}
