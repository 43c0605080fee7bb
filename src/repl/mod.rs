//! # Calculator REPL
//!
//! The interactive calculator, organized by MVVM layer.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream};
pub use models::{BackendStatus, CalculatorState, OperatorKind};
pub use services::CalculationClient;
pub use view_models::ViewModel;
