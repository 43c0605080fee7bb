//! # Status Line Model
//!
//! Encapsulates all state related to the status line display,
//! providing a clean interface for status bar rendering.

/// Reachability of the calculation backend as last observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// No health check has completed yet
    Unknown,
    Connected,
    Disconnected,
    /// A calculation failed; shown until the next health check completes
    Failed(String),
}

impl BackendStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, BackendStatus::Connected)
    }

    /// Text shown in the status bar
    pub fn text(&self) -> String {
        match self {
            BackendStatus::Unknown => "● Checking backend…".to_string(),
            BackendStatus::Connected => "● Backend connected".to_string(),
            BackendStatus::Disconnected => "● Backend disconnected".to_string(),
            BackendStatus::Failed(message) => format!("● {message}"),
        }
    }
}

/// Status line model containing all status bar display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    backend_status: BackendStatus,

    /// Temporary status message to display
    status_message: Option<String>,

    /// Server the calculator talks to
    server: String,
}

impl StatusLine {
    /// Create a new StatusLine with default values
    pub fn new() -> Self {
        Self {
            backend_status: BackendStatus::Unknown,
            status_message: None,
            server: String::new(),
        }
    }

    // === Backend Status Methods ===

    pub fn backend_status(&self) -> &BackendStatus {
        &self.backend_status
    }

    pub fn set_backend_status(&mut self, status: BackendStatus) {
        self.backend_status = status;
    }

    // === Status Message Methods ===

    /// Set a temporary status message
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // === Server Info ===

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn set_server<S: Into<String>>(&mut self, server: S) {
        self.server = server.into();
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
