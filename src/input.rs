//! Input adapter: terminal key events in, held-key set and discrete actions
//! out.
//!
//! Two classes of terminal are supported:
//! * Keyboard-enhancement capable (kitty protocol and friends) report
//!   `Press` / `Repeat` / `Release`, so a key is held until it is released.
//! * Classic terminals only send `Press` (OS key repeat arrives as repeated
//!   presses). There a key counts as held while its last press is within the
//!   hold window, which is longer than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::controls::{Controls, Key, KeySet};
use crate::entities::Mode;
use crate::state::Action;

/// Translate a terminal key code into a game key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char('a' | 'A') => Key::A,
        KeyCode::Char('d' | 'D') => Key::D,
        KeyCode::Char('w' | 'W') => Key::W,
        KeyCode::Char('1') => Key::Digit1,
        KeyCode::Char('2') => Key::Digit2,
        KeyCode::Char('r' | 'R') => Key::R,
        _ => return None,
    };
    Some(key)
}

/// The discrete action a key press triggers, if any. The game decides
/// whether the action applies in its current state.
pub fn action_for(key: Key) -> Option<Action> {
    match key {
        Key::Digit1 => Some(Action::Start(Mode::Single)),
        Key::Digit2 => Some(Action::Start(Mode::Duo)),
        Key::R => Some(Action::Restart),
        k if k == Controls::PLAYER_ONE.shoot || k == Controls::PLAYER_TWO.shoot => {
            Some(Action::Fire(k))
        }
        _ => None,
    }
}

#[derive(Debug)]
pub struct KeyTracker {
    /// Frame of the last press or repeat for every key still considered down.
    key_frame: HashMap<Key, u64>,
    hold_window: u64,
    releases_reported: bool,
}

impl KeyTracker {
    pub fn new(hold_window: u64, releases_reported: bool) -> Self {
        Self {
            key_frame: HashMap::new(),
            hold_window,
            releases_reported,
        }
    }

    /// Feed one terminal key event seen during `frame`. Returns the action a
    /// press triggers. Auto-repeat only re-triggers fire, so a held shoot key
    /// keeps shooting at the cooldown rate on every terminal.
    pub fn on_event(&mut self, event: &KeyEvent, frame: u64) -> Option<Action> {
        let key = map_key(event.code)?;
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key, frame);
                action_for(key)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key, frame);
                action_for(key).filter(|action| matches!(action, Action::Fire(_)))
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key);
                None
            }
        }
    }

    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.releases_reported || frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Keys held as of `frame`.
    pub fn held(&self, frame: u64) -> KeySet {
        self.key_frame
            .keys()
            .copied()
            .filter(|&key| self.is_held(key, frame))
            .collect()
    }
}
