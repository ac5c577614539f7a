//! Abstract key codes and the per-player bindings the core understands.
//!
//! The core never sees terminal events; the input adapter translates them
//! into `Key`s and maintains the `KeySet`.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    A,
    D,
    W,
    Digit1,
    Digit2,
    R,
}

/// Left / right / shoot bindings owned by one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub left: Key,
    pub right: Key,
    pub shoot: Key,
}

impl Controls {
    pub const PLAYER_ONE: Controls = Controls {
        left: Key::Left,
        right: Key::Right,
        shoot: Key::Space,
    };

    pub const PLAYER_TWO: Controls = Controls {
        left: Key::A,
        right: Key::D,
        shoot: Key::W,
    };
}

/// Keys currently held down. Absent means released.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    down: HashSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.down.insert(key);
        } else {
            self.down.remove(&key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            down: iter.into_iter().collect(),
        }
    }
}
