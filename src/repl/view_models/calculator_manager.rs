//! # Calculator Management
//!
//! ViewModel wrappers around the calculator state machine. Each wrapper
//! forwards to [`CalculatorState`](crate::repl::models::CalculatorState) and
//! emits the view events the change requires.

use crate::repl::events::ViewEvent;
use crate::repl::models::{
    BackendStatus, CalculationOutcome, CalculationTicket, Digit, OperatorKind, RequestId,
};

use super::ViewModel;

impl ViewModel {
    pub fn input_digit(&mut self, digit: Digit) {
        self.calculator.input_digit(digit);
        self.emit_view_event(ViewEvent::DisplayUpdateRequired);
    }

    pub fn input_decimal_point(&mut self) {
        self.calculator.input_decimal_point();
        self.emit_view_event(ViewEvent::DisplayUpdateRequired);
    }

    /// Choose an operator; returns the chained calculation to run, if any
    pub fn choose_operator(&mut self, operator: OperatorKind) -> Option<CalculationTicket> {
        let ticket = self.calculator.choose_operator(operator);
        self.after_submission(ticket.is_some());
        ticket
    }

    /// Evaluate the pending operation; returns the calculation to run, if any
    pub fn evaluate(&mut self) -> Option<CalculationTicket> {
        let ticket = self.calculator.evaluate();
        self.after_submission(ticket.is_some());
        ticket
    }

    /// Reset the calculator, forgetting any calculation in flight
    pub fn clear(&mut self) {
        let was_calculating = self.calculator.is_calculating();
        self.calculator.clear();
        self.emit_view_event(ViewEvent::DisplayUpdateRequired);
        if was_calculating {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }

    /// Apply a finished calculation; returns false for stale outcomes
    ///
    /// A failure's message replaces the backend indicator until the next
    /// health check completes.
    pub fn apply_calculation_outcome(
        &mut self,
        id: RequestId,
        outcome: &CalculationOutcome,
    ) -> bool {
        if !self.calculator.apply_outcome(id, outcome) {
            return false;
        }

        if let Err(failure) = outcome {
            self.status_line
                .set_backend_status(BackendStatus::Failed(failure.message.clone()));
        }
        self.emit_view_event(ViewEvent::DisplayUpdateRequired);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        true
    }

    pub fn is_calculating(&self) -> bool {
        self.calculator.is_calculating()
    }

    /// Text in the display box
    pub fn display_text(&self) -> &str {
        self.calculator.current_entry()
    }

    /// Operand and operator waiting for the next entry, e.g. `12 +`
    pub fn pending_expression(&self) -> Option<String> {
        self.calculator.pending_expression()
    }

    fn after_submission(&mut self, submitted: bool) {
        self.emit_view_event(ViewEvent::DisplayUpdateRequired);
        if submitted {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }
}
