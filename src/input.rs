//! Raw key codes and held-key queries
//!
//! The input collaborator delivers discrete key presses identified by raw
//! codes, plus a "currently held" query used to edge-detect the action key.

use std::collections::HashSet;

/// Raw key code as delivered by the windowing layer
pub type KeyCode = u32;

/// Action key: reverses the actor's vertical velocity
pub const KEY_SPACE: KeyCode = b' ' as KeyCode;
/// Leaves the level through the "return to menu" fade
pub const KEY_ESCAPE: KeyCode = 27;

/// Answers whether a key is currently held down
pub trait KeyState {
    fn is_held(&self, key: KeyCode) -> bool;
}

/// Set of currently held keys, fed from press/release events
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }
}

impl KeyState for HeldKeys {
    fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}
