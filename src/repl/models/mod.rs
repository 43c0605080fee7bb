//! # Models Module
//!
//! Re-exports all model implementations organized by category.

pub mod calculation;
pub mod calculator;
pub mod keypad;
pub mod operator;
pub mod status_line;

// Re-export all models for easy access
pub use calculation::{
    CalculationFailure, CalculationOutcome, CalculationRequest, FailureKind,
    SERVICE_UNAVAILABLE_MESSAGE,
};
pub use calculator::{
    format_result, CalculationKind, CalculationTicket, CalculatorState, Digit, RequestId,
    ERROR_TEXT, INITIAL_ENTRY,
};
pub use keypad::{Keypad, KeypadButton, PlacedButton, KEYPAD_LEFT};
pub use operator::OperatorKind;
pub use status_line::{BackendStatus, StatusLine};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_models_should_create_with_defaults() {
        let _calculator = CalculatorState::new();
        let _keypad = Keypad::new();
        let _status_line = StatusLine::new();
    }
}
