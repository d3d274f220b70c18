//! Key-to-action bindings

use std::collections::HashMap;

use crate::application::AppEvent;
use crate::input::KeyCode;

/// Discrete actions triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Close the window and leave the main loop
    Quit,
    /// Return the model to its initial orientation
    ResetRotation,
}

/// Maps keys to actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl KeyBindings {
    /// Bindings with nothing mapped
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Bind a key, replacing any previous action for it
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Remove a key's binding
    pub fn unbind(&mut self, key: KeyCode) -> Option<InputAction> {
        self.bindings.remove(&key)
    }

    /// Action bound to a key
    pub fn action_for_key(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// Action triggered by an event
    ///
    /// Only presses trigger actions; releases and other events yield `None`.
    pub fn action_for(&self, event: &AppEvent) -> Option<InputAction> {
        match *event {
            AppEvent::KeyPressed(key) => self.action_for_key(key),
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::Escape, InputAction::Quit);
        bindings.bind(KeyCode::Space, InputAction::ResetRotation);
        bindings
    }
}
