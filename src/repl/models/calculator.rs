//! # Calculator State Machine
//!
//! Owns the calculator's interaction state and turns a linear stream of
//! discrete inputs into display text plus calculation tickets.
//!
//! Idle and OperatorPending are not explicit states: they follow from
//! whether `pending_operator` is set.
//!
//! ## Two-phase transitions
//!
//! `choose_operator` and `evaluate` need a remote round trip. They run in two
//! phases:
//!
//! 1. The synchronous phase updates the state and returns a
//!    [`CalculationTicket`] snapshot of the request.
//! 2. The caller runs the request and hands the outcome back through
//!    [`CalculatorState::apply_outcome`].
//!
//! Only the most recently issued ticket is accepted in phase 2. Outcomes of
//! superseded or cleared tickets are discarded.

use super::calculation::{CalculationOutcome, CalculationRequest};
use super::operator::OperatorKind;

/// Entry shown on startup and after `clear`
pub const INITIAL_ENTRY: &str = "0";

/// Sentinel entry displayed when a calculation fails
pub const ERROR_TEXT: &str = "Error";

/// A single decimal digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Parse an ASCII digit character
    pub fn from_char(ch: char) -> Option<Self> {
        ch.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn as_char(&self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Identifier of an issued calculation, increasing with every ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What issued a calculation, which decides how its result is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationKind {
    /// An operator pressed while another operation was pending
    Chain,
    /// Equals
    Evaluate,
}

/// Snapshot of one issued calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationTicket {
    pub id: RequestId,
    pub kind: CalculationKind,
    pub request: CalculationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    kind: CalculationKind,
}

/// Calculator interaction state
#[derive(Debug, Clone)]
pub struct CalculatorState {
    current_entry: String,
    pending_operand: Option<f64>,
    pending_operator: Option<OperatorKind>,
    awaiting_fresh_entry: bool,
    in_flight: Option<InFlight>,
    next_request_id: u64,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            current_entry: INITIAL_ENTRY.to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_fresh_entry: false,
            in_flight: None,
            next_request_id: 1,
        }
    }

    pub fn current_entry(&self) -> &str {
        &self.current_entry
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    pub fn pending_operator(&self) -> Option<OperatorKind> {
        self.pending_operator
    }

    pub fn is_awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }

    /// Whether a calculation has been issued and its outcome not yet applied
    pub fn is_calculating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_id(&self) -> Option<RequestId> {
        self.in_flight.map(|f| f.id)
    }

    pub fn is_error(&self) -> bool {
        self.current_entry == ERROR_TEXT
    }

    /// Left operand and operator awaiting a right operand, e.g. `"12 +"`
    pub fn pending_expression(&self) -> Option<String> {
        let operator = self.pending_operator?;
        let operand = self.pending_operand?;
        Some(format!("{} {}", format_result(operand), operator.symbol()))
    }

    /// Append a digit, or start a fresh entry with it
    pub fn input_digit(&mut self, digit: Digit) {
        if self.awaiting_fresh_entry || self.is_error() || self.current_entry == INITIAL_ENTRY {
            self.current_entry = digit.as_char().to_string();
            self.awaiting_fresh_entry = false;
        } else {
            self.current_entry.push(digit.as_char());
        }
        tracing::debug!(entry = %self.current_entry, "digit entered");
    }

    /// Add a decimal point; a second point in the same entry is ignored
    pub fn input_decimal_point(&mut self) {
        if self.awaiting_fresh_entry || self.is_error() {
            self.current_entry = "0.".to_string();
            self.awaiting_fresh_entry = false;
        } else if !self.current_entry.contains('.') {
            self.current_entry.push('.');
        }
        tracing::debug!(entry = %self.current_entry, "decimal point entered");
    }

    /// Select an operator, eagerly evaluating a pending operation first
    ///
    /// Returns a chain ticket when `pending_operand op entry` has to be
    /// computed before the new operator takes over.
    pub fn choose_operator(&mut self, operator: OperatorKind) -> Option<CalculationTicket> {
        let Some(input_value) = self.input_value() else {
            tracing::debug!(entry = %self.current_entry, "operator ignored: entry is not a number");
            return None;
        };

        let ticket = match (self.pending_operand, self.pending_operator) {
            (None, _) => {
                self.pending_operand = Some(input_value);
                None
            }
            (Some(operand), Some(pending)) => Some(self.issue(
                CalculationKind::Chain,
                CalculationRequest::new(operand, input_value, pending),
            )),
            (Some(_), None) => None,
        };

        self.pending_operator = Some(operator);
        self.awaiting_fresh_entry = true;
        tracing::debug!(?operator, operand = ?self.pending_operand, "operator chosen");
        ticket
    }

    /// Equals: compute `pending_operand pending_operator entry`
    ///
    /// A no-op returning `None` unless both an operand and an operator are pending.
    pub fn evaluate(&mut self) -> Option<CalculationTicket> {
        let (Some(operand), Some(operator)) = (self.pending_operand, self.pending_operator) else {
            tracing::debug!("evaluate ignored: no pending operation");
            return None;
        };
        let input_value = self.input_value()?;

        let ticket = self.issue(
            CalculationKind::Evaluate,
            CalculationRequest::new(operand, input_value, operator),
        );
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_entry = true;
        Some(ticket)
    }

    /// Reset to the initial state and forget any in-flight calculation
    pub fn clear(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(id = in_flight.id.value(), "clear abandons in-flight calculation");
        }
        self.current_entry = INITIAL_ENTRY.to_string();
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_entry = false;
    }

    /// Apply the outcome of an issued calculation
    ///
    /// Returns `false` and leaves the state untouched when `id` is not the
    /// calculation currently in flight.
    pub fn apply_outcome(&mut self, id: RequestId, outcome: &CalculationOutcome) -> bool {
        let in_flight = match self.in_flight {
            Some(in_flight) if in_flight.id == id => in_flight,
            _ => {
                tracing::warn!(id = id.value(), "discarding outcome of superseded calculation");
                return false;
            }
        };
        self.in_flight = None;

        match outcome {
            Ok(value) => {
                self.current_entry = format_result(*value);
                if in_flight.kind == CalculationKind::Chain {
                    self.pending_operand = Some(*value);
                }
            }
            Err(failure) => {
                tracing::warn!(kind = ?failure.kind, message = %failure.message, "calculation failed");
                self.current_entry = ERROR_TEXT.to_string();
                self.pending_operand = None;
                self.pending_operator = None;
            }
        }
        self.awaiting_fresh_entry = true;
        true
    }

    fn input_value(&self) -> Option<f64> {
        self.current_entry
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn issue(&mut self, kind: CalculationKind, request: CalculationRequest) -> CalculationTicket {
        let id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        if let Some(previous) = self.in_flight.replace(InFlight { id, kind }) {
            tracing::warn!(
                superseded = previous.id.value(),
                id = id.value(),
                "calculation issued while another is in flight"
            );
        }
        tracing::info!(
            id = id.value(),
            ?kind,
            a = request.a,
            b = request.b,
            operation = %request.operator,
            "calculation issued"
        );
        CalculationTicket { id, kind, request }
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Text form of a numeric result: integral values without a fraction,
/// negative zero as `0`, and exponent notation (`1e+21`, `1e-7`) outside
/// `[1e-6, 1e21)`
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return INITIAL_ENTRY.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    value.to_string()
}
