//! # Keypad Click Command
//!
//! Translates a left click on the rendered keypad into the button's event.

use anyhow::Result;

use super::{Command, CommandEvent};
use crate::repl::events::InputEvent;
use crate::repl::models::{Keypad, KeypadButton};

/// Press the keypad button under the mouse
pub struct KeypadClickCommand {
    keypad: Keypad,
}

impl KeypadClickCommand {
    pub fn new() -> Self {
        Self {
            keypad: Keypad::new(),
        }
    }

    fn clicked_button(&self, event: &InputEvent) -> Option<KeypadButton> {
        match event {
            InputEvent::MouseClicked { column, row } => self.keypad.button_at(*column, *row),
            _ => None,
        }
    }
}

impl Default for KeypadClickCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for KeypadClickCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        self.clicked_button(event).is_some()
    }

    fn execute(&self, event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(self
            .clicked_button(event)
            .map(|button| vec![CommandEvent::from_button(button)])
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "KeypadClick"
    }
}
