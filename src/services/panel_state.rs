//! Expand/collapse state of collapsible panels, kept per session by the host.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CollapsiblePanelState {
    /// No state recorded yet.
    #[default]
    None,
    Expanded,
    Collapsed,
}

pub trait PanelStateStore {
    fn state(&self, panel_id: &str) -> CollapsiblePanelState;
    fn set_state(&mut self, panel_id: &str, state: CollapsiblePanelState);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPanelStates {
    states: HashMap<String, CollapsiblePanelState>,
}

impl InMemoryPanelStates {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelStateStore for InMemoryPanelStates {
    fn state(&self, panel_id: &str) -> CollapsiblePanelState {
        self.states.get(panel_id).copied().unwrap_or_default()
    }

    fn set_state(&mut self, panel_id: &str, state: CollapsiblePanelState) {
        self.states.insert(panel_id.to_string(), state);
    }
}
