//! Axis-aligned rectangles in canvas space
//!
//! Canvas coordinates: origin top-left, +y pointing down. A rectangle's
//! `pos` is its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive overlap (touching edges count)
    pub fn touches(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    /// Horizontal spans overlap strictly
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// True when `feet` (a bottom edge) lies in `[surface.top() - above, surface.bottom() + below]`
    pub fn feet_within(feet: f32, surface: &Rect, above: f32, below: f32) -> bool {
        feet >= surface.top() - above && feet <= surface.bottom() + below
    }
}

/// Static level layout derived from the canvas size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub river_top: f32,
    pub river_bottom: f32,
    pub ground_height: f32,
    pub bank_width: f32,
    pub island: Rect,
    pub flag: Rect,
}

impl Geometry {
    pub fn new(width: f32, height: f32) -> Self {
        let river_top = height - RIVER_TOP_LIFT;
        Self {
            width,
            height,
            river_top,
            river_bottom: height - GROUND_HEIGHT,
            ground_height: GROUND_HEIGHT,
            bank_width: BANK_WIDTH,
            island: Rect::new(
                width / 2.0 - ISLAND_WIDTH / 2.0,
                river_top - 10.0,
                ISLAND_WIDTH,
                ISLAND_HEIGHT,
            ),
            flag: Rect::new(width - 60.0, river_top - 40.0, FLAG_WIDTH, FLAG_HEIGHT),
        }
    }

    /// Where the player spawns on every level start
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(PLAYER_START_X, self.height - PLAYER_START_LIFT)
    }

    /// Top of the solid ground under the river
    pub fn ground_top(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Horizontal stretch of open water, banks excluded (inclusive bounds)
    pub fn in_water_span(&self, x: f32) -> bool {
        x >= self.bank_width && x <= self.width - self.bank_width
    }

    pub fn on_start_bank(&self, x: f32) -> bool {
        x < self.bank_width
    }

    pub fn on_end_bank(&self, x: f32) -> bool {
        x > self.width - self.bank_width
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
