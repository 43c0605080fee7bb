//! # Mock I/O
//!
//! Headless streams for driving the calculator in tests: scripted key and
//! click events in, recorded render commands and printed text out.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Scripted events; `poll` reports input only while some remain
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    /// Create a new mock event stream with pre-programmed events
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Create an empty mock event stream
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    GetSize,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    EnableMouseCapture,
    DisableMouseCapture,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug)]
struct MockTerminal {
    commands: Vec<RenderCommand>,
    buffer: Vec<u8>,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
}

/// Mock render stream for testing
///
/// Records all rendering commands for verification in tests. Clones share
/// the recording, so a test can keep one while the renderer owns another.
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    terminal: Arc<Mutex<MockTerminal>>,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    /// Create a new mock render stream
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    /// Create a mock render stream with specific terminal size
    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            terminal: Arc::new(Mutex::new(MockTerminal {
                commands: Vec::new(),
                buffer: Vec::new(),
                cursor_visible: true,
                raw_mode: false,
                alternate_screen: false,
                mouse_capture: false,
            })),
            terminal_size: size,
        }
    }

    /// Get recorded commands for verification
    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.lock().commands.clone()
    }

    /// Check if a specific command was recorded
    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    /// Get the bytes written since the last screen clear as a string
    pub fn get_buffer_string(&self) -> String {
        String::from_utf8_lossy(&self.lock().buffer).to_string()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn is_mouse_capture_enabled(&self) -> bool {
        self.lock().mouse_capture
    }

    fn lock(&self) -> MutexGuard<'_, MockTerminal> {
        // A panicking test thread must not hide the recording from others
        self.terminal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.lock().commands.push(command);
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut terminal = self.lock();
        terminal.buffer.extend_from_slice(buf);
        terminal.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut terminal = self.lock();
        terminal.commands.push(RenderCommand::ClearScreen);
        terminal.buffer.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        self.lock().cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        self.lock().cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen);
        self.lock().alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen);
        self.lock().alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode);
        self.lock().raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode);
        self.lock().raw_mode = false;
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableMouseCapture);
        self.lock().mouse_capture = true;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableMouseCapture);
        self.lock().mouse_capture = false;
        Ok(())
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
