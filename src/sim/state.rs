//! Game state and core simulation types
//!
//! Everything the frame driver mutates lives in [`GameState`]; there are no
//! module-level statics.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Geometry, Rect};
use super::overlay::{LevelAnnouncement, LoadingScreen};
use super::timer::RunTimer;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Loading bar is filling; nothing moves
    Loading,
    /// Instructions shown, waiting for any key
    Title,
    /// Active gameplay
    Playing,
    /// Player died; waiting for restart or full reset
    GameOver,
    /// Level ceiling reached; the timer is frozen
    Won,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Alligator,
    Drowned,
    FellOffBottom,
}

/// Things that happened during a tick, for the presentation layer (sounds, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    LevelUp { level: u32, score: u64 },
    Won { final_ms: f64, score: u64 },
    Died { cause: DeathCause, level: u32 },
    SkippedToLevel { level: u32 },
    Restarted { level: u32 },
    FullReset,
}

/// CSS-ish style tag for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub style: StatusStyle,
}

impl StatusMessage {
    pub fn win(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StatusStyle::Win,
        }
    }

    pub fn lose(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StatusStyle::Lose,
        }
    }
}

/// The lumberjack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Positive is downward
    pub velocity_y: f32,
    pub on_ground: bool,
    pub on_log: bool,
    pub speed: f32,
    pub jump_power: f32,
    pub gravity: f32,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            on_ground: false,
            on_log: false,
            speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            gravity: PLAYER_GRAVITY,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Y of the player's bottom edge
    #[inline]
    pub fn feet(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Stand on a surface at `top`
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.velocity_y = 0.0;
    }

    /// Back to the spawn point, at rest, airborne
    pub fn reset_to(&mut self, start: Vec2) {
        self.pos = start;
        self.velocity_y = 0.0;
        self.on_ground = false;
        self.on_log = false;
    }
}

/// What kind of thing drifts down the river
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloaterKind {
    /// Rideable platform
    Log,
    /// Lethal on touch
    Alligator,
}

/// A log or alligator moving leftward at a constant per-tick speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floater {
    pub kind: FloaterKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward pixels per tick (always positive)
    pub speed: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Floater {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Advance one tick to the left
    pub fn drift(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Fully past the left edge of the canvas
    pub fn is_gone(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Transient visual feedback on the water
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Particle {
    /// Ballistic droplet
    Splash {
        pos: Vec2,
        vel: Vec2,
        life: f32,
        max_life: f32,
        size: f32,
        /// 0xRRGGBB
        color: u32,
        /// Base opacity of the droplet color
        opacity: f32,
    },
    /// Expanding ring that fades out
    Ripple {
        pos: Vec2,
        radius: f32,
        max_radius: f32,
        life: f32,
        max_life: f32,
        alpha: f32,
    },
}

impl Particle {
    pub fn life(&self) -> f32 {
        match self {
            Particle::Splash { life, .. } | Particle::Ripple { life, .. } => *life,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life() <= 0.0
    }
}

/// One rectangle of a cloud, relative to the cloud anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudPart {
    pub offset: Vec2,
    pub size: Vec2,
}

/// Decorative sky cloud; never collides with anything
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub parts: Vec<CloudPart>,
}

impl Cloud {
    pub fn drift(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn is_gone(&self) -> bool {
        self.pos.x < CLOUD_PRUNE_X
    }
}

/// Tick counters for each spawner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub log: u32,
    pub alligator: u32,
    pub cloud: u32,
    /// Re-rolled after every cloud spawn
    pub cloud_interval: u32,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            log: 0,
            alligator: 0,
            cloud: 0,
            cloud_interval: CLOUD_SPAWN_INTERVAL,
        }
    }
}

/// Complete game state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub geometry: Geometry,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub loading: LoadingScreen,

    pub score: u64,
    pub level: u32,
    pub checkpoint_level: u32,
    pub checkpoint_score: u64,

    pub player: Player,
    pub logs: Vec<Floater>,
    pub alligators: Vec<Floater>,
    pub particles: Vec<Particle>,
    pub clouds: Vec<Cloud>,
    pub spawn: SpawnTimers,

    pub timer: RunTimer,
    pub status: Option<StatusMessage>,
    /// Deferred status clear (ms timestamp); dropped on any later transition
    pub status_clear_at: Option<f64>,
    pub announcement: Option<LevelAnnouncement>,

    /// Simulation tick counter (ticks while playing)
    pub time_ticks: u64,
    /// Events since the last drain, oldest first, at most [`MAX_PENDING_EVENTS`]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let geometry = Geometry::new(settings.canvas_width, settings.canvas_height);
        let phase = if settings.loading_screen {
            GamePhase::Loading
        } else {
            GamePhase::Title
        };
        let loading = LoadingScreen::new(settings.loading_duration_ms);

        log::debug!("New game: seed {seed}, phase {phase:?}");

        Self {
            geometry,
            rng: Pcg32::seed_from_u64(seed),
            phase,
            loading,
            score: 0,
            level: 1,
            checkpoint_level: 1,
            checkpoint_score: 0,
            player: Player::new(geometry.player_start()),
            logs: Vec::new(),
            alligators: Vec::new(),
            particles: Vec::new(),
            clouds: Vec::new(),
            spawn: SpawnTimers::default(),
            timer: RunTimer::default(),
            status: None,
            status_clear_at: None,
            announcement: None,
            time_ticks: 0,
            events: Vec::new(),
            settings,
        }
    }

    /// Gameplay is live
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// A session has begun (past the title screen)
    pub fn is_started(&self) -> bool {
        !matches!(self.phase, GamePhase::Loading | GamePhase::Title)
    }

    /// Restart and full-reset affordances are offered
    pub fn can_restart(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Won)
    }

    /// Queue an event for the presentation layer, dropping the oldest once full
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, now_ms: f64) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            running: self.is_running(),
            started: self.is_started(),
            can_restart: self.can_restart(),
            ticks: self.time_ticks,
            score: self.score,
            level: self.level,
            checkpoint_level: self.checkpoint_level,
            checkpoint_score: self.checkpoint_score,
            player: &self.player,
            logs: &self.logs,
            alligators: &self.alligators,
            particles: &self.particles,
            clouds: &self.clouds,
            geometry: &self.geometry,
            status: self.status.as_ref(),
            timer: self.timer.formatted(now_ms),
            loading_progress: self
                .loading_visible()
                .then(|| self.loading.progress(now_ms)),
            loading_percent: self
                .loading_visible()
                .then(|| self.loading.percent(now_ms)),
            announcement: self
                .announcement
                .as_ref()
                .map(|a| AnnouncementView {
                    level: a.level,
                    alpha: a.alpha(now_ms),
                    scale: a.scale(now_ms),
                }),
        }
    }

    fn loading_visible(&self) -> bool {
        self.phase == GamePhase::Loading
    }
}

/// Level announcement as the presentation layer should draw it this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnouncementView {
    pub level: u32,
    pub alpha: f32,
    pub scale: f32,
}

/// Borrowed snapshot of everything the presentation layer draws
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub running: bool,
    pub started: bool,
    pub can_restart: bool,
    /// Ticks spent playing this session
    pub ticks: u64,
    pub score: u64,
    pub level: u32,
    pub checkpoint_level: u32,
    pub checkpoint_score: u64,
    pub player: &'a Player,
    pub logs: &'a [Floater],
    pub alligators: &'a [Floater],
    pub particles: &'a [Particle],
    pub clouds: &'a [Cloud],
    pub geometry: &'a Geometry,
    pub status: Option<&'a StatusMessage>,
    pub timer: String,
    pub loading_progress: Option<f32>,
    pub loading_percent: Option<u32>,
    pub announcement: Option<AnnouncementView>,
}
