//! # Rendering Coordination
//!
//! Collects the view events produced by ViewModel updates.

use crate::repl::events::ViewEvent;

use super::ViewModel;

impl ViewModel {
    /// Emit view event
    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
        tracing::trace!("View event emitted: {:?}", event);
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}
