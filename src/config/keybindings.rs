//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Text-entry modes consult this map only for keys that are not printable
/// characters; see [`crate::view::TuiApp`].
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Kind and state flags are ignored, as is Shift on characters (the
    /// character itself already carries the case).
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let mut modifiers = key.modifiers;
        if matches!(key.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        self.bindings
            .get(&KeyEvent::new(key.code, modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Cursor
        keys.bind(KeyCode::Up, none, KeyAction::Up);
        keys.bind(KeyCode::Char('k'), none, KeyAction::Up);
        keys.bind(KeyCode::Down, none, KeyAction::Down);
        keys.bind(KeyCode::Char('j'), none, KeyAction::Down);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);

        // Mode transitions
        keys.bind(KeyCode::Enter, none, KeyAction::Confirm);
        keys.bind(KeyCode::Esc, none, KeyAction::Back);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);

        // Board commands
        keys.bind(KeyCode::Char('a'), none, KeyAction::Add);
        keys.bind(KeyCode::Char('d'), none, KeyAction::Delete);
        keys.bind(KeyCode::Char('e'), none, KeyAction::Edit);
        keys.bind(KeyCode::Char('b'), none, KeyAction::Search);
        keys.bind(KeyCode::Char('/'), none, KeyAction::Search);
        keys.bind(KeyCode::Char('f'), none, KeyAction::TogglePin);
        keys.bind(KeyCode::Char('c'), none, KeyAction::ToggleClosed);
        keys.bind(KeyCode::Char('r'), none, KeyAction::Refresh);

        // Application
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
