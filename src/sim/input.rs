//! Keyboard and button input
//!
//! Key events arrive asynchronously and are folded into a held-key bitmask
//! plus a set of key-down edges. The frame driver takes both once per tick;
//! nothing is queued, the last state wins.

use serde::{Deserialize, Serialize};

/// Logical keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    /// Debug shortcut
    SkipToLevelThree,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Left, Key::Right, Key::Jump, Key::SkipToLevelThree];

    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Jump),
            "Digit5" => Some(Key::SkipToLevelThree),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Key::Left => 1 << 0,
            Key::Right => 1 << 1,
            Key::Jump => 1 << 2,
            Key::SkipToLevelThree => 1 << 3,
        }
    }
}

/// Small bitmask of [`Key`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeySet(u8);

impl KeySet {
    pub const EMPTY: KeySet = KeySet(0);

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Buttons outside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiAction {
    /// Resume from the checkpoint
    Restart,
    /// Back to level 1 with a fresh timer
    FullReset,
    /// Music on/off; owned by the presentation layer
    ToggleAudio,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Keys currently held
    pub held: KeySet,
    /// Keys pressed since the previous tick
    pub pressed: KeySet,
    /// A key without a logical mapping was pressed (still starts the game)
    pub any_pressed: bool,
}

impl TickInput {
    /// Input with `keys` held (no fresh presses)
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    /// Input with `key` freshly pressed and held
    pub fn pressing(key: Key) -> Self {
        let set: KeySet = [key].into_iter().collect();
        Self {
            held: set,
            pressed: set,
            any_pressed: true,
        }
    }

    pub fn started_any(&self) -> bool {
        self.any_pressed || !self.pressed.is_empty()
    }
}

/// Accumulates key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: KeySet,
    pressed: KeySet,
    any_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if !self.held.contains(key) {
            self.pressed.insert(key);
        }
        self.held.insert(key);
        self.any_pressed = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(key);
    }

    /// A key with no logical mapping; only matters for "press any key"
    pub fn other_key_down(&mut self) {
        self.any_pressed = true;
    }

    /// DOM-code convenience wrapper
    pub fn code_down(&mut self, code: &str) {
        match Key::from_code(code) {
            Some(key) => self.key_down(key),
            None => self.other_key_down(),
        }
    }

    pub fn code_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_up(key);
        }
    }

    /// Snapshot for the next tick; clears one-shot edges
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            held: self.held,
            pressed: self.pressed,
            any_pressed: self.any_pressed,
        };
        self.pressed = KeySet::EMPTY;
        self.any_pressed = false;
        input
    }
}
