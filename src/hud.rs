//! Score and level notifications for the display layer

use serde::{Deserialize, Serialize};

/// Observer for HUD-relevant changes, called synchronously by the game
pub trait ScoreSink {
    fn on_score_changed(&mut self, score: u32);
    /// `level` is 1-based
    fn on_level_changed(&mut self, level: u32);
}

/// Keeps the latest values and renders the status line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    /// Bumped on every notification so a renderer can skip unchanged frames
    #[serde(skip)]
    pub revision: u64,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        format!("Score: {} | Level: {}", self.score, self.level)
    }
}

impl ScoreSink for Hud {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
        self.revision += 1;
    }

    fn on_level_changed(&mut self, level: u32) {
        self.level = level;
        self.revision += 1;
    }
}

/// Logs every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn on_score_changed(&mut self, score: u32) {
        log::info!("score: {score}");
    }

    fn on_level_changed(&mut self, level: u32) {
        log::info!("level: {level}");
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for &mut S {
    fn on_score_changed(&mut self, score: u32) {
        (**self).on_score_changed(score);
    }

    fn on_level_changed(&mut self, level: u32) {
        (**self).on_level_changed(level);
    }
}

impl<S: ScoreSink + ?Sized> ScoreSink for Box<S> {
    fn on_score_changed(&mut self, score: u32) {
        (**self).on_score_changed(score);
    }

    fn on_level_changed(&mut self, level: u32) {
        (**self).on_level_changed(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        let mut hud = Hud::new();
        hud.on_level_changed(1);
        hud.on_score_changed(30);
        assert_eq!(hud.text(), "Score: 30 | Level: 1");
        assert_eq!(hud.revision, 2);
    }

    #[test]
    fn test_log_sink_accepts_notifications() {
        let mut sink = LogSink;
        sink.on_level_changed(1);
        sink.on_score_changed(0);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut hud = Hud::new();
        {
            let mut sink: Box<dyn ScoreSink + '_> = Box::new(&mut hud);
            sink.on_score_changed(10);
            sink.on_level_changed(2);
        }
        assert_eq!((hud.score, hud.level), (10, 2));
    }
}
