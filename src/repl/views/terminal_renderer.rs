//! # Terminal Renderer
//!
//! Draws the calculator: a display box with the current entry, the pending
//! expression under it, the clickable keypad and a status bar on the last
//! terminal row.
//!
//! ```text
//!  calcline
//!   ┌─────────────────────┐
//!   │                  42 │
//!   └─────────────────────┘
//!                     42 +
//!
//!   [ 7 ] [ 8 ] [ 9 ] [ ÷ ]
//!   ...
//! ● Backend connected | Calculating…            http://localhost:3000
//! ```

use crate::repl::events::ViewEvent;
use crate::repl::io::RenderStream;
use crate::repl::models::{BackendStatus, Keypad, KeypadButton, KEYPAD_LEFT};
use crate::repl::view_models::ViewModel;
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

/// Row of the application title
const TITLE_ROW: u16 = 0;
/// Top border of the display box
const DISPLAY_TOP: u16 = 1;
/// Row of the pending expression, just below the display box
const EXPRESSION_ROW: u16 = DISPLAY_TOP + 3;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Initialize the terminal for rendering
    fn initialize(&mut self) -> Result<()>;

    /// Render the full application state
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Render the display box and pending expression
    fn render_display(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Render status bar
    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Handle view events
    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()>;

    /// Cleanup terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Terminal-based view renderer writing to a [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    /// Create a renderer that owns the given render stream
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    /// Update terminal size
    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Get current terminal size
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Inner width of the display box, between the borders
    fn display_inner_width() -> usize {
        Keypad::width().saturating_sub(2) as usize
    }

    fn render_title(&mut self) -> Result<()> {
        queue_term!(
            self.render_stream,
            SetAttribute(Attribute::Bold),
            Print(" calcline"),
            SetAttribute(Attribute::Reset)
        )
    }

    fn render_keypad(&mut self, keypad: &Keypad) -> Result<()> {
        for placed in keypad.buttons() {
            let color = match placed.button {
                KeypadButton::Digit(_) | KeypadButton::DecimalPoint => Color::White,
                KeypadButton::Operator(_) => Color::Cyan,
                KeypadButton::Equals => Color::Green,
                KeypadButton::Clear => Color::Red,
            };
            self.render_stream.move_cursor(placed.column, placed.row)?;
            queue_term!(
                self.render_stream,
                SetForegroundColor(color),
                Print(format!("[ {} ]", placed.button.label())),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn write_row(&mut self, column: u16, row: u16, text: &str) -> Result<()> {
        self.render_stream.move_cursor(column, row)?;
        queue_term!(self.render_stream, Print(text))
    }

    fn flush(&mut self) -> Result<()> {
        self.render_stream.flush().map_err(anyhow::Error::from)
    }
}

/// Keep the rightmost `width` characters of `text`
fn clip_left(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().skip(count - width + 1).collect();
    clipped.insert(0, '…');
    clipped
}

/// Status bar text, split into the left and right parts
pub(crate) fn status_bar_parts(view_model: &ViewModel) -> (String, String) {
    let status_line = view_model.status_line();
    let mut left = format!(" {}", status_line.backend_status().text());

    if view_model.is_calculating() {
        left.push_str(" | Calculating…");
    }
    if let Some(message) = status_line.status_message() {
        left.push_str(" | ");
        left.push_str(message);
    }

    (left, format!("{} ", status_line.server()))
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.enable_mouse_capture()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_stream.move_cursor(0, TITLE_ROW)?;
        self.render_title()?;

        let border = "─".repeat(Self::display_inner_width());
        self.write_row(KEYPAD_LEFT, DISPLAY_TOP, &format!("┌{border}┐"))?;
        self.write_row(KEYPAD_LEFT, DISPLAY_TOP + 2, &format!("└{border}┘"))?;

        self.render_keypad(view_model.keypad())?;
        self.render_display(view_model)?;
        self.render_status_bar(view_model)?;
        Ok(())
    }

    fn render_display(&mut self, view_model: &ViewModel) -> Result<()> {
        // One space of padding inside each border
        let text_width = Self::display_inner_width().saturating_sub(2);
        let entry = clip_left(view_model.display_text(), text_width);
        let color = if view_model.calculator().is_error() {
            Color::Red
        } else {
            Color::Reset
        };

        self.render_stream.move_cursor(KEYPAD_LEFT, DISPLAY_TOP + 1)?;
        queue_term!(
            self.render_stream,
            Print("│ "),
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(format!("{entry:>text_width$}")),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(" │")
        )?;

        let expression = view_model.pending_expression().unwrap_or_default();
        let expression = clip_left(&expression, Self::display_inner_width());
        let width = Keypad::width() as usize;
        self.render_stream.move_cursor(KEYPAD_LEFT, EXPRESSION_ROW)?;
        queue_term!(
            self.render_stream,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{expression:>width$}")),
            ResetColor
        )?;

        self.flush()
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let (width, height) = self.terminal_size;
        let status_row = height.saturating_sub(1);
        let (left, right) = status_bar_parts(view_model);

        let color = match view_model.status_line().backend_status() {
            BackendStatus::Connected => Color::Green,
            BackendStatus::Unknown => Color::Yellow,
            BackendStatus::Disconnected | BackendStatus::Failed(_) => Color::Red,
        };

        let used = left.chars().count() + right.chars().count();
        let padding = (width as usize).saturating_sub(used);

        self.render_stream.move_cursor(0, status_row)?;
        queue_term!(self.render_stream, Print(" ".repeat(width as usize)))?;
        self.render_stream.move_cursor(0, status_row)?;
        if used <= width as usize {
            queue_term!(
                self.render_stream,
                SetForegroundColor(color),
                Print(&left),
                ResetColor,
                Print(" ".repeat(padding)),
                SetForegroundColor(Color::DarkGrey),
                Print(&right),
                ResetColor
            )?;
        } else {
            // Narrow terminal: the server is the first thing to go
            let left = clip_left(&left, width as usize);
            queue_term!(
                self.render_stream,
                SetForegroundColor(color),
                Print(left),
                ResetColor
            )?;
        }

        self.flush()
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model),
            ViewEvent::DisplayUpdateRequired => self.render_display(view_model),
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.disable_mouse_capture()?;
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockRenderStream, RenderCommand};
    use crate::repl::models::{Digit, OperatorKind};

    fn renderer() -> (TerminalRenderer<MockRenderStream>, MockRenderStream) {
        let stream = MockRenderStream::with_size((60, 20));
        let observer = stream.clone();
        (TerminalRenderer::with_render_stream(stream).unwrap(), observer)
    }

    #[test]
    fn renderer_should_take_size_from_stream() {
        let (renderer, _) = renderer();
        assert_eq!(renderer.terminal_size(), (60, 20));
    }

    #[test]
    fn render_full_should_draw_entry_and_keypad() {
        let (mut renderer, observer) = renderer();
        let mut view_model = ViewModel::new();
        view_model.input_digit(Digit::new(4).unwrap());
        view_model.input_digit(Digit::new(2).unwrap());

        renderer.render_full(&view_model).unwrap();

        let screen = observer.get_buffer_string();
        assert!(screen.contains("42"));
        assert!(screen.contains("[ 7 ]"));
        assert!(screen.contains("[ ÷ ]"));
        assert!(screen.contains("[ C ]"));
        assert!(observer.has_command(&RenderCommand::MoveCursor(0, 19)));
    }

    #[test]
    fn render_display_should_show_pending_expression() {
        let (mut renderer, observer) = renderer();
        let mut view_model = ViewModel::new();
        view_model.input_digit(Digit::new(9).unwrap());
        view_model.choose_operator(OperatorKind::Multiply);

        renderer.render_display(&view_model).unwrap();

        assert!(observer.get_buffer_string().contains("9 ×"));
    }

    #[test]
    fn status_bar_should_show_backend_and_calculating() {
        let mut view_model = ViewModel::new();
        view_model.set_server("http://localhost:3000");
        view_model.set_backend_status(BackendStatus::Connected);
        view_model.input_digit(Digit::new(1).unwrap());
        view_model.choose_operator(OperatorKind::Add);
        view_model.input_digit(Digit::new(1).unwrap());
        view_model.evaluate();

        let (left, right) = status_bar_parts(&view_model);

        assert_eq!(left, " ● Backend connected | Calculating…");
        assert_eq!(right, "http://localhost:3000 ");
    }

    #[test]
    fn initialize_and_cleanup_should_toggle_terminal_modes() {
        let (mut renderer, observer) = renderer();

        renderer.initialize().unwrap();
        assert!(observer.is_raw_mode());
        assert!(observer.is_mouse_capture_enabled());

        renderer.cleanup().unwrap();
        assert!(!observer.is_raw_mode());
        assert!(!observer.is_mouse_capture_enabled());
        assert!(observer.has_command(&RenderCommand::LeaveAlternateScreen));
    }

    #[test]
    fn clip_left_should_keep_least_significant_digits() {
        assert_eq!(clip_left("12345", 10), "12345");
        assert_eq!(clip_left("1234567890", 5), "…7890");
    }
}
