//! Input handling
//!
//! A pressed-key snapshot filled by the windowing layer and the controller
//! that turns it into player movement, camera changes and debug toggles.

pub mod controller;

use std::collections::HashSet;

pub use controller::{InputController, PlayerState};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// C key
    C,
    /// D key
    D,
    /// L key
    L,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Keypad plus
    KeypadAdd,
    /// Keypad minus
    KeypadSubtract,
}

/// Keys held down this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Whether `key` is held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether any of `keys` is held
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_pressed(key))
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

impl FromIterator<KeyCode> for InputState {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}
