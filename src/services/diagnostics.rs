//! Diagnostic event sink.
//!
//! Resolution reports problems (such as a missing theme item) here instead of
//! failing. Sinks are fire-and-forget: `record` never returns an error.

use std::sync::{Mutex, PoisonError};

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSeverity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// The user on whose behalf the lookup ran, when known.
    pub actor_id: Option<u64>,
    /// Where the event originated (e.g. `theme/common`).
    pub source: String,
    pub message: String,
    pub severity: EventSeverity,
}

pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Forwards events to `tracing` under the `board_theme::diagnostics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        let actor = event.actor_id.unwrap_or_default();
        match event.severity {
            EventSeverity::Information => tracing::info!(
                target: "board_theme::diagnostics",
                actor,
                source = %event.source,
                "{}",
                event.message
            ),
            EventSeverity::Warning => tracing::warn!(
                target: "board_theme::diagnostics",
                actor,
                source = %event.source,
                "{}",
                event.message
            ),
            EventSeverity::Error => tracing::error!(
                target: "board_theme::diagnostics",
                actor,
                source = %event.source,
                "{}",
                event.message
            ),
        }
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl DiagnosticsSink for NullDiagnostics {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Keeps events in memory, for hosts that flush them to an event log in batches.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all recorded events.
    pub fn drain(&self) -> Vec<DiagnosticEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(severity: EventSeverity) -> DiagnosticEvent {
        DiagnosticEvent {
            actor_id: Some(7),
            source: "theme/common".to_string(),
            message: "Missing Theme Item: COMMON.LOGO".to_string(),
            severity,
        }
    }

    #[test]
    fn test_memory_diagnostics_records_and_drains() {
        let sink = MemoryDiagnostics::new();
        sink.record(&event(EventSeverity::Error));
        sink.record(&event(EventSeverity::Warning));

        assert_eq!(sink.events().len(), 2);
        let drained = sink.drain();
        assert_eq!(drained[0].severity, EventSeverity::Error);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_tracing_and_null_sinks_do_not_panic() {
        for severity in [
            EventSeverity::Information,
            EventSeverity::Warning,
            EventSeverity::Error,
        ] {
            TracingDiagnostics.record(&event(severity));
            NullDiagnostics.record(&event(severity));
        }
    }
}
