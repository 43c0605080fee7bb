//! # Application Control Commands
//!
//! Commands for controlling the application lifecycle and resetting the
//! calculator.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

use super::{key_press, Command, CommandEvent};
use crate::repl::events::InputEvent;

/// Terminate application (Ctrl+C)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        // Ctrl+C to quit
        key_press(event).is_some_and(|key| {
            matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key.modifiers.contains(KeyModifiers::CONTROL)
        })
    }

    fn execute(&self, _event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Reset the calculator (Esc, `c` or `C`)
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, event: &InputEvent) -> bool {
        key_press(event).is_some_and(|key| match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('c') | KeyCode::Char('C') => super::is_plain(key),
            _ => false,
        })
    }

    fn execute(&self, _event: &InputEvent) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}
