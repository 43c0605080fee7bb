//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::repl::models::{Digit, KeypadButton, OperatorKind};

/// Events that commands can produce to request changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    /// Append a digit to the entry
    DigitRequested { digit: Digit },

    /// Add a decimal point to the entry
    DecimalPointRequested,

    /// Choose an operator, chaining any pending operation
    OperatorRequested { operator: OperatorKind },

    /// Evaluate the pending operation (equals)
    EvaluateRequested,

    /// Reset the calculator and drop any work in flight
    ClearRequested,

    /// Request application quit
    QuitRequested,

    /// No action needed
    NoAction,
}

impl CommandEvent {
    /// Event a keypad button stands for
    pub fn from_button(button: KeypadButton) -> Self {
        match button {
            KeypadButton::Digit(digit) => CommandEvent::DigitRequested { digit },
            KeypadButton::DecimalPoint => CommandEvent::DecimalPointRequested,
            KeypadButton::Operator(operator) => CommandEvent::OperatorRequested { operator },
            KeypadButton::Equals => CommandEvent::EvaluateRequested,
            KeypadButton::Clear => CommandEvent::ClearRequested,
        }
    }

    /// Whether the event must wait until an in-flight calculation settles
    ///
    /// Clear and quit act immediately; everything that edits the calculator
    /// is replayed in arrival order once the outcome has been applied.
    pub fn is_deferrable(&self) -> bool {
        matches!(
            self,
            CommandEvent::DigitRequested { .. }
                | CommandEvent::DecimalPointRequested
                | CommandEvent::OperatorRequested { .. }
                | CommandEvent::EvaluateRequested
        )
    }
}
