//! # Events Module
//!
//! Input events flowing into the controller and view events flowing out of
//! the view model.

pub mod view_events;

pub use view_events::{InputEvent, ViewEvent};
