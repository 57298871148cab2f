//! Keyboard state shared between the host's event callbacks and the tick
//!
//! Key events write into `KeyState` whenever they arrive. The game loop
//! reads it exactly once per tick via `snapshot`, so a tick never sees a key
//! change halfway through.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Left,
    Right,
    Jump,
}

impl LogicalKey {
    /// Map a `KeyboardEvent.code` string to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(LogicalKey::Left),
            "ArrowRight" | "KeyD" => Some(LogicalKey::Right),
            "Space" | "ArrowUp" | "KeyW" => Some(LogicalKey::Jump),
            _ => None,
        }
    }

    /// Physical codes bound to this key
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            LogicalKey::Left => &["ArrowLeft", "KeyA"],
            LogicalKey::Right => &["ArrowRight", "KeyD"],
            LogicalKey::Jump => &["Space", "ArrowUp", "KeyW"],
        }
    }
}

/// Physical keys currently held down
///
/// Tracks physical codes rather than logical keys so that releasing one of
/// two held aliases (say `KeyA` while `ArrowLeft` is still down) keeps the
/// logical key held.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<&'static str>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns true if the code is one the game uses.
    pub fn press(&mut self, code: &str) -> bool {
        match Self::intern(code) {
            Some(code) => {
                self.held.insert(code);
                true
            }
            None => false,
        }
    }

    /// Record a key-up. Returns true if the code is one the game uses.
    pub fn release(&mut self, code: &str) -> bool {
        match Self::intern(code) {
            Some(code) => {
                self.held.remove(&code);
                true
            }
            None => false,
        }
    }

    /// Forget everything (window lost focus, key-ups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: LogicalKey) -> bool {
        key.codes().iter().any(|code| self.held.contains(code))
    }

    /// Freeze the current state into a per-tick input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(LogicalKey::Left),
            right: self.is_held(LogicalKey::Right),
            jump: self.is_held(LogicalKey::Jump),
        }
    }

    fn intern(code: &str) -> Option<&'static str> {
        let key = LogicalKey::from_code(code)?;
        key.codes().iter().copied().find(|c| *c == code)
    }
}
