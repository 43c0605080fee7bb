//! # Operator Model
//!
//! The four arithmetic operators the remote service understands, with their
//! wire names and the symbols used on the keypad.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operator selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperatorKind {
    /// All operators in keypad order
    pub const ALL: [OperatorKind; 4] = [
        OperatorKind::Divide,
        OperatorKind::Multiply,
        OperatorKind::Subtract,
        OperatorKind::Add,
    ];

    /// Map a typed character to an operator (`+ - * /`)
    pub fn from_key_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(OperatorKind::Add),
            '-' => Some(OperatorKind::Subtract),
            '*' => Some(OperatorKind::Multiply),
            '/' => Some(OperatorKind::Divide),
            _ => None,
        }
    }

    /// Operation name sent to the calculation endpoint
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperatorKind::Add => "add",
            OperatorKind::Subtract => "subtract",
            OperatorKind::Multiply => "multiply",
            OperatorKind::Divide => "divide",
        }
    }

    /// Key that selects this operator
    pub fn key_char(&self) -> char {
        match self {
            OperatorKind::Add => '+',
            OperatorKind::Subtract => '-',
            OperatorKind::Multiply => '*',
            OperatorKind::Divide => '/',
        }
    }

    /// Symbol shown on the keypad and in the status bar
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Subtract => "−",
            OperatorKind::Multiply => "×",
            OperatorKind::Divide => "÷",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_key_char_should_map_arithmetic_keys() {
        assert_eq!(OperatorKind::from_key_char('+'), Some(OperatorKind::Add));
        assert_eq!(
            OperatorKind::from_key_char('-'),
            Some(OperatorKind::Subtract)
        );
        assert_eq!(
            OperatorKind::from_key_char('*'),
            Some(OperatorKind::Multiply)
        );
        assert_eq!(OperatorKind::from_key_char('/'), Some(OperatorKind::Divide));
        assert_eq!(OperatorKind::from_key_char('x'), None);
    }

    #[test]
    fn operator_should_serialize_to_wire_name() {
        let json = serde_json::to_string(&OperatorKind::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");

        for op in OperatorKind::ALL {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json.as_str(), Some(op.wire_name()));
        }
    }

    #[test]
    fn key_char_should_round_trip_through_from_key_char() {
        for op in OperatorKind::ALL {
            assert_eq!(OperatorKind::from_key_char(op.key_char()), Some(op));
        }
    }
}
