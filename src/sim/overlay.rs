//! Loading screen and level announcement timing
//!
//! Only the animation curves live here; drawing belongs to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_ANNOUNCEMENT_MS;

/// Fake loading bar that fills over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadingScreen {
    pub duration_ms: f64,
    /// Set on the first loading tick
    pub started_ms: Option<f64>,
}

impl LoadingScreen {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            started_ms: None,
        }
    }

    pub fn begin(&mut self, now_ms: f64) {
        if self.started_ms.is_none() {
            self.started_ms = Some(now_ms);
        }
    }

    /// Fill fraction in `[0, 1]`
    pub fn progress(&self, now_ms: f64) -> f32 {
        match self.started_ms {
            None => 0.0,
            Some(_) if self.duration_ms <= 0.0 => 1.0,
            Some(start) => ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0) as f32,
        }
    }

    /// Whole percent for the label under the bar
    pub fn percent(&self, now_ms: f64) -> u32 {
        (self.progress(now_ms) * 100.0).floor() as u32
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// "LEVEL N" banner shown after a level-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelAnnouncement {
    pub level: u32,
    pub started_ms: f64,
}

impl LevelAnnouncement {
    pub fn new(level: u32, started_ms: f64) -> Self {
        Self { level, started_ms }
    }

    /// Unclamped fraction of the announcement elapsed
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.started_ms) / LEVEL_ANNOUNCEMENT_MS).max(0.0) as f32
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Fades in over the first 20% and out over the last 20%
    pub fn alpha(&self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        let alpha = if p < 0.2 {
            p / 0.2
        } else if p > 0.8 {
            (1.0 - p) / 0.2
        } else {
            1.0
        };
        alpha.clamp(0.0, 1.0)
    }

    /// Shrinks from 1.5x to 1.0x over the first 30%
    pub fn scale(&self, now_ms: f64) -> f32 {
        let p = self.progress(now_ms);
        if p < 0.3 { 1.5 - (p / 0.3) * 0.5 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_progress() {
        let mut loading = LoadingScreen::new(4000.0);
        assert_eq!(loading.progress(100.0), 0.0);

        loading.begin(1000.0);
        loading.begin(2000.0);
        assert_eq!(loading.progress(2000.0), 0.25);
        assert_eq!(loading.percent(2999.0), 49);
        assert!(!loading.is_complete(4999.0));
        assert!(loading.is_complete(5000.0));
        assert_eq!(loading.progress(50_000.0), 1.0);
    }

    #[test]
    fn test_announcement_curves() {
        let a = LevelAnnouncement::new(4, 0.0);
        assert_eq!(a.alpha(0.0), 0.0);
        assert!((a.alpha(200.0) - 0.5).abs() < 1e-5);
        assert_eq!(a.alpha(1000.0), 1.0);
        assert!((a.alpha(1800.0) - 0.5).abs() < 1e-5);

        assert_eq!(a.scale(0.0), 1.5);
        assert!((a.scale(300.0) - 1.25).abs() < 1e-5);
        assert_eq!(a.scale(900.0), 1.0);

        assert!(!a.is_finished(1999.0));
        assert!(a.is_finished(2000.0));
        assert_eq!(a.alpha(2500.0), 0.0);
    }
}
