//! # Calculator Input Commands
//!
//! Map plain key presses onto calculator inputs. Every key goes through
//! [`KeypadButton::from_key_char`] so keys and keypad clicks agree.

use anyhow::Result;
use crossterm::event::KeyCode;

use super::{is_plain, key_press, Command, CommandEvent};
use crate::repl::events::InputEvent;
use crate::repl::models::KeypadButton;

/// Keypad button behind a plain character key press
fn pressed_button(event: &InputEvent) -> Option<KeypadButton> {
    let key = key_press(event)?;
    match key.code {
        KeyCode::Char(ch) if is_plain(key) => KeypadButton::from_key_char(ch),
        _ => None,
    }
}

fn button_events(event: &InputEvent) -> Vec<CommandEvent> {
    pressed_button(event)
        .map(|button| vec![CommandEvent::from_button(button)])
        .unwrap_or_default()
}

/// Enter a digit (0-9)
pub struct DigitCommand;

impl Command for DigitCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        matches!(pressed_button(event), Some(KeypadButton::Digit(_)))
    }

    fn execute(&self, event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(button_events(event))
    }

    fn name(&self) -> &'static str {
        "Digit"
    }
}

/// Enter a decimal point (`.`)
pub struct DecimalPointCommand;

impl Command for DecimalPointCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        matches!(pressed_button(event), Some(KeypadButton::DecimalPoint))
    }

    fn execute(&self, _event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::DecimalPointRequested])
    }

    fn name(&self) -> &'static str {
        "DecimalPoint"
    }
}

/// Choose an operator (`+`, `-`, `*`, `/`)
pub struct OperatorCommand;

impl Command for OperatorCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        matches!(pressed_button(event), Some(KeypadButton::Operator(_)))
    }

    fn execute(&self, event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(button_events(event))
    }

    fn name(&self) -> &'static str {
        "Operator"
    }
}

/// Evaluate (Enter or `=`)
pub struct EvaluateCommand;

impl Command for EvaluateCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        if key_press(event).is_some_and(|key| key.code == KeyCode::Enter) {
            return true;
        }
        matches!(pressed_button(event), Some(KeypadButton::Equals))
    }

    fn execute(&self, _event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::EvaluateRequested])
    }

    fn name(&self) -> &'static str {
        "Evaluate"
    }
}
