//! Game settings
//!
//! Loaded from JSON on native builds, handed over by the page on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which level is saved as the restart point after a level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckpointPolicy {
    /// Every level reached becomes the checkpoint
    #[default]
    ExactLevel,
    /// Levels 1-2 checkpoint normally; once level 3 is reached the checkpoint
    /// stays at level 3 for the rest of the run
    PinnedAtLevelThree,
}

impl CheckpointPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointPolicy::ExactLevel => "exact",
            CheckpointPolicy::PinnedAtLevelThree => "pinned-3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" | "exact-level" => Some(CheckpointPolicy::ExactLevel),
            "pinned" | "pinned-3" | "pinned-at-level-three" => {
                Some(CheckpointPolicy::PinnedAtLevelThree)
            }
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas size in pixels; all river geometry derives from it
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Variants ===
    /// Decorative clouds drifting across the sky
    pub clouds_enabled: bool,
    /// Show the loading screen before the title
    pub loading_screen: bool,
    pub loading_duration_ms: f64,
    /// Full-screen "LEVEL N" announcement after each level-up
    pub level_announcement: bool,
    pub checkpoint_policy: CheckpointPolicy,

    // === Debug ===
    /// Allow the "skip to level 3" key
    pub debug_shortcuts: bool,
    /// Fixed RNG seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,

            clouds_enabled: true,
            loading_screen: true,
            loading_duration_ms: LOADING_DURATION_MS,
            level_announcement: true,
            checkpoint_policy: CheckpointPolicy::ExactLevel,

            debug_shortcuts: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Minimal variant: no clouds, no loading screen, no announcement
    pub fn classic() -> Self {
        Self {
            clouds_enabled: false,
            loading_screen: false,
            level_announcement: false,
            ..Self::default()
        }
    }

    /// Clamp values that would make the river geometry degenerate
    pub fn sanitized(mut self) -> Self {
        let min_width = 2.0 * BANK_WIDTH + ISLAND_WIDTH + PLAYER_WIDTH;
        let min_height = PLAYER_START_LIFT + PLAYER_HEIGHT;
        if !(self.canvas_width >= min_width) {
            log::warn!(
                "canvas width {} too small, using {}",
                self.canvas_width,
                min_width
            );
            self.canvas_width = min_width;
        }
        if !(self.canvas_height >= min_height) {
            log::warn!(
                "canvas height {} too small, using {}",
                self.canvas_height,
                min_height
            );
            self.canvas_height = min_height;
        }
        if !(self.loading_duration_ms > 0.0) {
            self.loading_screen = false;
        }
        self
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use anyhow::Context;

        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
