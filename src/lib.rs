//! Theme resource resolution for board rendering.
//!
//! A theme is an XML document of pages holding tagged, optionally
//! language-specific values. [`ThemeResolver`] looks values up for the active
//! language, falls back to language-agnostic entries and then to a default,
//! and expands the `~` marker to the theme's asset path. Parsed documents are
//! cached process-wide through [`DocumentCache`].

pub mod config;
pub mod error;
pub mod i18n;
pub mod services;
pub mod theme;

pub use config::{CachingMode, ThemeConfig};
pub use error::{Result, ThemeError};
pub use i18n::{FixedLanguage, LanguageSource, ProcessLocale};
pub use services::diagnostics::{
    DiagnosticEvent, DiagnosticsSink, EventSeverity, MemoryDiagnostics, NullDiagnostics,
    TracingDiagnostics,
};
pub use services::panel_state::{CollapsiblePanelState, InMemoryPanelStates, PanelStateStore};
pub use theme::{
    is_valid_theme, shared_cache, DocumentCache, LocalThemeLoader, MemoryDocumentCache,
    SetThemeOutcome, ThemeDocument, ThemeLoader, ThemeResolver, ThemeStore,
};
