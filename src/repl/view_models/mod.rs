//! # ViewModel Module
//!
//! ViewModel implementation split into focused responsibilities.

mod calculator_manager;
mod core;
mod rendering_coordinator;

// Re-export the main ViewModel
pub use core::ViewModel;
