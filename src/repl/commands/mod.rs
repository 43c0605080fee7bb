//! # Commands
//!
//! Commands map input events onto [`CommandEvent`]s. They never touch the
//! view model; the controller decides how each event is applied.

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};

use crate::repl::events::InputEvent;

pub mod app;
pub mod calculator;
pub mod events;
pub mod keypad;

pub use app::{AppTerminateCommand, ClearCommand};
pub use calculator::{DecimalPointCommand, DigitCommand, EvaluateCommand, OperatorCommand};
pub use events::CommandEvent;
pub use keypad::KeypadClickCommand;

/// Command trait
///
/// Commands check relevancy and translate the input into command events.
pub trait Command: Send + Sync {
    /// Check if command is relevant for the event
    fn is_relevant(&self, event: &InputEvent) -> bool;

    /// Produce the events this input stands for
    fn execute(&self, event: &InputEvent) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Key event carried by a press; repeats and releases are ignored
pub(crate) fn key_press(event: &InputEvent) -> Option<&KeyEvent> {
    match event {
        InputEvent::KeyPressed(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

/// A character key without Ctrl or Alt (Shift is needed for `*` and `+`)
pub(crate) fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    /// Register all default commands
    fn register_default_commands(&mut self) {
        // Ctrl+C must win over the plain 'c' of ClearCommand
        self.add_command(Box::new(AppTerminateCommand));
        self.add_command(Box::new(ClearCommand));

        self.add_command(Box::new(DigitCommand));
        self.add_command(Box::new(DecimalPointCommand));
        self.add_command(Box::new(OperatorCommand));
        self.add_command(Box::new(EvaluateCommand));

        self.add_command(Box::new(KeypadClickCommand::new()));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process an input event through the first relevant command
    pub fn process_event(&self, event: &InputEvent) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(event) {
                tracing::trace!("{} handles {:?}", command.name(), event);
                return command.execute(event);
            }
        }
        Ok(vec![])
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::{Digit, OperatorKind};
    use crossterm::event::KeyCode;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::KeyPressed(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn registry_should_quit_on_ctrl_c_rather_than_clear() {
        let registry = CommandRegistry::new();

        let events = registry
            .process_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();

        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn registry_should_map_calculator_keys() {
        let registry = CommandRegistry::new();
        let none = KeyModifiers::NONE;

        let mapped: Vec<CommandEvent> = [
            KeyCode::Char('4'),
            KeyCode::Char('/'),
            KeyCode::Char('.'),
            KeyCode::Enter,
            KeyCode::Esc,
        ]
        .into_iter()
        .flat_map(|code| registry.process_event(&key(code, none)).unwrap())
        .collect();

        assert_eq!(
            mapped,
            vec![
                CommandEvent::DigitRequested {
                    digit: Digit::new(4).unwrap()
                },
                CommandEvent::OperatorRequested {
                    operator: OperatorKind::Divide
                },
                CommandEvent::DecimalPointRequested,
                CommandEvent::EvaluateRequested,
                CommandEvent::ClearRequested,
            ]
        );
    }

    #[test]
    fn registry_should_ignore_unmapped_input() {
        let registry = CommandRegistry::new();

        assert!(registry
            .process_event(&key(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap()
            .is_empty());
        assert!(registry
            .process_event(&InputEvent::TerminalResized {
                width: 80,
                height: 24
            })
            .unwrap()
            .is_empty());
    }
}
