//! # Core ViewModel
//!
//! The ViewModel struct and its basic state. Calculator operations live in
//! `calculator_manager`, event bookkeeping in `rendering_coordinator`.

use crate::repl::events::ViewEvent;
use crate::repl::models::{BackendStatus, CalculatorState, Keypad, StatusLine};

/// Everything the views need to draw the calculator
#[derive(Debug)]
pub struct ViewModel {
    pub(super) calculator: CalculatorState,
    pub(super) keypad: Keypad,
    pub(super) status_line: StatusLine,

    pub(super) terminal_dimensions: (u16, u16), // (width, height)

    // Event management
    pub(super) pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    /// Create a new ViewModel with default state
    pub fn new() -> Self {
        Self {
            calculator: CalculatorState::new(),
            keypad: Keypad::new(),
            status_line: StatusLine::new(),
            terminal_dimensions: (80, 24),
            pending_view_events: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &CalculatorState {
        &self.calculator
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    /// Update terminal size
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_dimensions = (width, height);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
        tracing::debug!("Terminal size updated: {}x{}", width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_dimensions
    }

    pub fn set_server<S: Into<String>>(&mut self, server: S) {
        self.status_line.set_server(server);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn set_backend_status(&mut self, status: BackendStatus) {
        if self.status_line.backend_status() != &status {
            tracing::info!("Backend status: {}", status.text());
            self.status_line.set_backend_status(status);
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }

    /// Set a temporary status message
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_line.set_status_message(message);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn clear_status_message(&mut self) {
        if self.status_line.status_message().is_some() {
            self.status_line.clear_status_message();
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
