//! # Services Layer
//!
//! Talks to the calculation service. The client performs single requests;
//! the calculation service runs them in the background and hands results
//! back to the event loop.

pub mod calculation;
pub mod calculation_service;

pub use calculation::{classify_response, CalculationClient};
pub use calculation_service::{CalculationService, ServiceMessage};
