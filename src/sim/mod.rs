//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per displayed frame, no delta time
//! - Seeded RNG owned by the state
//! - Wall-clock time passed in, never read
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod particles;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Outcome, resolve_collisions};
pub use geometry::{Geometry, Rect};
pub use input::{InputState, Key, KeySet, TickInput, UiAction};
pub use overlay::{LevelAnnouncement, LoadingScreen};
pub use state::{
    AnnouncementView, Cloud, CloudPart, DeathCause, Floater, FloaterKind, GameEvent, GamePhase,
    GameState, Particle, Player, Snapshot, StatusMessage, StatusStyle,
};
pub use tick::tick;
pub use timer::{RunTimer, format_time};
