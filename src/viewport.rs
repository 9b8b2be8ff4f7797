//! Logical play area and its placement in the host window
//!
//! The world is always `width × height` logical units; the host decides how
//! big it is on screen. `fit` letterboxes it into a window, `to_logical`
//! maps pointer positions back into world units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Logical size, fixed for the lifetime of the game
    size: Vec2,
    /// Top-left corner of the play area in host pixels
    pub offset: Vec2,
    /// Host pixels per logical unit
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.viewport_width, settings.viewport_height)
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Scale uniformly to fit a `window_w × window_h` host surface, centred
    pub fn fit(&mut self, window_w: f32, window_h: f32) {
        if window_w <= 0.0 || window_h <= 0.0 {
            // Minimised; keep the last placement
            return;
        }
        self.scale = (window_w / self.size.x).min(window_h / self.size.y);
        let shown = self.size * self.scale;
        self.offset = (Vec2::new(window_w, window_h) - shown) * 0.5;
    }

    /// Host pixel position to world units (None outside the play area)
    pub fn to_logical(&self, screen: Vec2) -> Option<Vec2> {
        let p = (screen - self.offset) / self.scale;
        let inside = p.x >= 0.0 && p.y >= 0.0 && p.x <= self.size.x && p.y <= self.size.y;
        inside.then_some(p)
    }

    /// World units to host pixels
    pub fn to_screen(&self, logical: Vec2) -> Vec2 {
        self.offset + logical * self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        let vp = Viewport::default();
        assert_eq!((vp.width(), vp.height()), (800.0, 450.0));
    }

    #[test]
    fn test_fit_letterboxes() {
        let mut vp = Viewport::default();
        vp.fit(1600.0, 1200.0);
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, Vec2::new(0.0, 150.0));
        // Logical size never changes
        assert_eq!(vp.width(), 800.0);
    }

    #[test]
    fn test_screen_logical_mapping() {
        let mut vp = Viewport::default();
        vp.fit(1600.0, 1200.0);
        let world = Vec2::new(400.0, 225.0);
        let screen = vp.to_screen(world);
        assert_eq!(screen, Vec2::new(800.0, 600.0));
        assert_eq!(vp.to_logical(screen), Some(world));
        assert_eq!(vp.to_logical(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_fit_ignores_empty_window() {
        let mut vp = Viewport::default();
        vp.fit(0.0, 0.0);
        assert_eq!(vp.scale, 1.0);
    }
}
