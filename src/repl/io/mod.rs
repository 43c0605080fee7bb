//! # Terminal I/O
//!
//! The controller reads input from an [`EventStream`] and the renderer draws
//! through a [`RenderStream`]. calcline needs three kinds of input: key
//! presses, left clicks on keypad cells and resizes. Mouse capture is part
//! of the render side because the renderer owns terminal setup and teardown.
//!
//! ```text
//! calcline:  AppController ──▶ TerminalEventStream  ──▶ crossterm::event::read()
//!            TerminalRenderer ──▶ TerminalRenderStream ──▶ stdout
//!
//! tests:     AppController ──▶ MockEventStream      ──▶ scripted Vec<Event>
//!            TerminalRenderer ──▶ MockRenderStream  ──▶ recorded RenderCommand
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (columns, rows)
pub type TerminalSize = (u16, u16);

/// Source of key, mouse and resize events
pub trait EventStream: Send {
    /// Wait up to `timeout` for an event; the event loop uses the timeout
    /// to pick up finished calculations between keystrokes
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event. Only call after `poll` returned true.
    fn read(&mut self) -> Result<Event>;
}

/// Where the calculator is drawn
///
/// Text goes through [`Write`]; nothing is guaranteed to be visible before
/// `flush`.
pub trait RenderStream: Write + Send {
    /// Clear the entire screen
    fn clear_screen(&mut self) -> Result<()>;

    /// Move cursor to specific position (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    /// Hide the cursor
    fn hide_cursor(&mut self) -> Result<()>;

    /// Show the cursor
    fn show_cursor(&mut self) -> Result<()>;

    /// Current terminal size; the status bar sits on the last row
    fn get_size(&self) -> Result<TerminalSize>;

    /// Enter alternate screen buffer
    fn enter_alternate_screen(&mut self) -> Result<()>;

    /// Leave alternate screen buffer
    fn leave_alternate_screen(&mut self) -> Result<()>;

    /// Enable terminal raw mode
    fn enable_raw_mode(&mut self) -> Result<()>;

    /// Disable terminal raw mode
    fn disable_raw_mode(&mut self) -> Result<()>;

    /// Start reporting mouse clicks, needed for the keypad
    fn enable_mouse_capture(&mut self) -> Result<()>;

    /// Stop reporting mouse events
    fn disable_mouse_capture(&mut self) -> Result<()>;
}
