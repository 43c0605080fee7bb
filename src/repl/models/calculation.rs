//! # Calculation Value Objects
//!
//! Ephemeral request/outcome types exchanged with the remote arithmetic
//! service. They exist only for the duration of one remote call.

use super::operator::OperatorKind;
use serde::Serialize;
use thiserror::Error;

/// Message used whenever the remote service cannot be reached
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Backend service unavailable";

/// Body of a calculation request: `{"a": .., "b": .., "operation": ".."}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "operation")]
    pub operator: OperatorKind,
}

impl CalculationRequest {
    pub fn new(a: f64, b: f64, operator: OperatorKind) -> Self {
        Self { a, b, operator }
    }
}

/// Classification of a failed calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service understood the request but refused it (e.g. division by zero)
    ComputationRejected,
    /// The service could not be reached or timed out
    ServiceUnavailable,
    /// Any other network-level fault
    TransportError,
}

/// A classified calculation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CalculationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CalculationFailure {
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::ComputationRejected,
            message: message.into(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            kind: FailureKind::ServiceUnavailable,
            message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self {
            kind: FailureKind::TransportError,
            message: message.into(),
        }
    }
}

/// Result of one remote calculation
pub type CalculationOutcome = Result<f64, CalculationFailure>;
