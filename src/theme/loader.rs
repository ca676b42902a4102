//! Theme document storage with I/O abstraction.
//!
//! This module provides the `ThemeLoader` trait for locating and reading theme
//! documents, and `LocalThemeLoader` as the default filesystem-based implementation.

use std::io;
use std::path::{Path, PathBuf};

use super::parser::parse_theme_document;
use super::types::ThemeDocument;
use crate::error::{Result, ThemeError};

/// Trait for reading theme documents from various sources.
///
/// This abstraction allows:
/// - Testing with mock implementations
/// - Serving themes from a web root, an archive or embedded data
pub trait ThemeLoader: Send + Sync {
    /// Map a virtual path (e.g. `/forum/themes/classic.xml`) to a physical one.
    fn map_path(&self, virtual_path: &str) -> PathBuf;

    /// Read file contents as string.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Default implementation resolving virtual paths below a web root directory.
#[derive(Debug, Clone)]
pub struct LocalThemeLoader {
    web_root: PathBuf,
}

impl LocalThemeLoader {
    pub fn new(web_root: PathBuf) -> Self {
        Self { web_root }
    }

    pub fn web_root(&self) -> &Path {
        &self.web_root
    }
}

impl ThemeLoader for LocalThemeLoader {
    fn map_path(&self, virtual_path: &str) -> PathBuf {
        let relative = virtual_path.trim_start_matches('/');
        if relative.is_empty() {
            self.web_root.clone()
        } else {
            self.web_root.join(relative)
        }
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Read and parse the theme document at `path`.
pub fn load_document(loader: &dyn ThemeLoader, path: &Path) -> Result<ThemeDocument> {
    let content = loader.read_file(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_theme_document(&content, path)?;

    tracing::info!(
        "Loaded theme document {:?} ({} pages, {} resources)",
        path,
        document.pages().len(),
        document.resource_count()
    );

    Ok(document)
}
