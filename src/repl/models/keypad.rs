//! # Keypad Model
//!
//! On-screen keypad layout shared by the renderer (where to draw each button)
//! and the mouse command (which button a click landed on). Every button is
//! defined by the key that triggers it, so clicks and key presses go through
//! the same mapping.

use super::calculator::Digit;
use super::operator::OperatorKind;

/// Keys of each keypad row, top to bottom
const LAYOUT: [&str; 5] = ["789/", "456*", "123-", "0.=+", "C"];

/// Column of the leftmost button
pub const KEYPAD_LEFT: u16 = 2;
/// Row of the topmost button
pub const KEYPAD_TOP: u16 = 6;
/// Horizontal distance between button origins
pub const CELL_WIDTH: u16 = 6;
/// Visible width of one button, e.g. `[ 7 ]`
pub const BUTTON_WIDTH: u16 = 5;
/// Vertical distance between button rows
pub const ROW_SPACING: u16 = 2;

/// A calculator button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadButton {
    Digit(Digit),
    DecimalPoint,
    Operator(OperatorKind),
    Equals,
    Clear,
}

impl KeypadButton {
    /// Button triggered by a plain key press, if any
    pub fn from_key_char(ch: char) -> Option<Self> {
        if let Some(digit) = Digit::from_char(ch) {
            return Some(KeypadButton::Digit(digit));
        }
        if let Some(operator) = OperatorKind::from_key_char(ch) {
            return Some(KeypadButton::Operator(operator));
        }
        match ch {
            '.' => Some(KeypadButton::DecimalPoint),
            '=' => Some(KeypadButton::Equals),
            'c' | 'C' => Some(KeypadButton::Clear),
            _ => None,
        }
    }

    /// Text drawn inside the button
    pub fn label(&self) -> String {
        match self {
            KeypadButton::Digit(digit) => digit.as_char().to_string(),
            KeypadButton::DecimalPoint => ".".to_string(),
            KeypadButton::Operator(operator) => operator.symbol().to_string(),
            KeypadButton::Equals => "=".to_string(),
            KeypadButton::Clear => "C".to_string(),
        }
    }
}

/// Button placed at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedButton {
    pub button: KeypadButton,
    pub column: u16,
    pub row: u16,
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<PlacedButton>,
}

impl Keypad {
    pub fn new() -> Self {
        let buttons = LAYOUT
            .iter()
            .enumerate()
            .flat_map(|(row_index, keys)| {
                keys.chars()
                    .enumerate()
                    .filter_map(move |(col_index, ch)| {
                        KeypadButton::from_key_char(ch).map(|button| PlacedButton {
                            button,
                            column: KEYPAD_LEFT + col_index as u16 * CELL_WIDTH,
                            row: KEYPAD_TOP + row_index as u16 * ROW_SPACING,
                        })
                    })
            })
            .collect();
        Self { buttons }
    }

    pub fn buttons(&self) -> &[PlacedButton] {
        &self.buttons
    }

    /// Button under the given screen cell
    pub fn button_at(&self, column: u16, row: u16) -> Option<KeypadButton> {
        self.buttons
            .iter()
            .find(|placed| {
                placed.row == row
                    && column >= placed.column
                    && column < placed.column + BUTTON_WIDTH
            })
            .map(|placed| placed.button)
    }

    /// Total width covered by the widest row
    pub fn width() -> u16 {
        let widest = LAYOUT.iter().map(|keys| keys.len()).max().unwrap_or(0) as u16;
        widest.saturating_sub(1) * CELL_WIDTH + BUTTON_WIDTH
    }

    /// First row below the keypad
    pub fn bottom() -> u16 {
        KEYPAD_TOP + LAYOUT.len() as u16 * ROW_SPACING
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
