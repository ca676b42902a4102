//! Host-facing collaborators: diagnostics, logging setup and panel state.

pub mod diagnostics;
pub mod panel_state;
pub mod tracing_setup;
