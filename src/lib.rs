//! # calcline - Terminal Calculator Backed by a Remote Arithmetic Service
//!
//! A keypad calculator for the terminal. Digits and the decimal point are
//! edited locally; every arithmetic operation is computed by a remote
//! calculation service over HTTP.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌──────────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│   Models     │
//! │             │              │              │              │              │
//! │ - Display   │              │ - Calculator │              │ - Calculator │
//! │ - Keypad    │              │   wrappers   │              │   state      │
//! │ - Status    │              │ - Status     │              │ - Keypad     │
//! └─────────────┘              └──────────────┘              └──────────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐    Tickets   ┌──────────────┐
//!                               │  Controller  │─────────────►│   Services   │
//!                               │              │◄─────────────│              │
//!                               │ - Event Loop │   Outcomes   │ - HTTP calls │
//!                               └──────────────┘              └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod profile;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
