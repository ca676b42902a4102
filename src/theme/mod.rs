//! Theme module with separated pure types and I/O operations.
//!
//! This module is split into:
//! - `types`: Parsed document types and indexed lookup (no I/O)
//! - `parser`: XML theme document parsing
//! - `loader`: `ThemeLoader` trait abstracting where theme documents live
//! - `cache`: keyed document cache, including the process-wide instance
//! - `validity`: theme identifier validation
//! - `store`: the active theme and its lazily loaded document
//! - `resolver`: `(page, tag)` resolution with language fallback
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use board_theme::{FixedLanguage, LocalThemeLoader, ThemeConfig, ThemeResolver, ThemeStore, TracingDiagnostics};
//!
//! let loader = Arc::new(LocalThemeLoader::new(PathBuf::from("/var/www")));
//! let store = ThemeStore::with_shared_cache(ThemeConfig::default(), loader);
//! let mut resolver = ThemeResolver::new(
//!     store,
//!     Arc::new(FixedLanguage::new("en")),
//!     Arc::new(TracingDiagnostics),
//! );
//!
//! resolver.set_theme("classic.xml");
//! let logo = resolver.get_item("COMMON", "LOGO")?;
//! let css = resolver.build_asset_path("theme.css")?;
//! ```

mod cache;
mod loader;
mod parser;
mod resolver;
mod store;
mod types;
mod validity;

pub use cache::*;
pub use loader::{load_document, LocalThemeLoader, ThemeLoader};
pub use parser::parse_theme_document;
pub use resolver::*;
pub use store::*;
pub use types::{Page, Resource, ThemeDocument};
pub use validity::*;
