//! # View Events
//!
//! Events related to view updates and user input.
//! These events drive UI refreshing and handle user interactions.

use crossterm::event::KeyEvent;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (most expensive - terminal resize, etc)
    FullRedrawRequired,

    /// Display box and pending expression need redrawing
    DisplayUpdateRequired,

    /// Status bar needs updating
    StatusBarUpdateRequired,
}

/// Input events from user or system
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed
    KeyPressed(KeyEvent),

    /// Left mouse button pressed at a screen cell
    MouseClicked { column: u16, row: u16 },

    /// Terminal resized
    TerminalResized { width: u16, height: u16 },
}
