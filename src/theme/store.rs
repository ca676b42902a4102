//! The active theme and its lazily loaded document.

use std::sync::Arc;

use once_cell::unsync::OnceCell;

use super::cache::{shared_cache, DocumentCache};
use super::loader::{load_document, ThemeLoader};
use super::types::ThemeDocument;
use super::validity::is_valid_theme;
use crate::config::{CachingMode, ThemeConfig};
use crate::error::{Result, ThemeError};

/// Result of [`ThemeStore::set_theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetThemeOutcome {
    /// The identifier was valid and is now active.
    Adopted,
    /// The identifier is already active; nothing changed.
    Unchanged,
    /// The identifier failed validation; the previous theme stays active.
    Rejected,
}

/// Holds the current theme identifier and the document parsed for it.
///
/// A store belongs to one request or session. The parsed document is shared
/// with other stores through the [`DocumentCache`] unless caching is set to
/// [`CachingMode::LiveReload`].
pub struct ThemeStore {
    config: ThemeConfig,
    loader: Arc<dyn ThemeLoader>,
    cache: Arc<dyn DocumentCache>,
    theme: Option<String>,
    document: OnceCell<Arc<ThemeDocument>>,
}

impl ThemeStore {
    pub fn new(
        config: ThemeConfig,
        loader: Arc<dyn ThemeLoader>,
        cache: Arc<dyn DocumentCache>,
    ) -> Self {
        Self {
            config,
            loader,
            cache,
            theme: None,
            document: OnceCell::new(),
        }
    }

    /// Create a store backed by the process-wide document cache.
    pub fn with_shared_cache(config: ThemeConfig, loader: Arc<dyn ThemeLoader>) -> Self {
        Self::new(config, loader, shared_cache())
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// The active theme identifier, if one was adopted.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Switch to another theme document.
    ///
    /// Invalid identifiers are rejected and leave the current theme in place.
    /// Adopting a new theme drops the document held by this store so the next
    /// access loads it again.
    pub fn set_theme(&mut self, identifier: &str) -> SetThemeOutcome {
        let identifier = identifier.trim();
        if self.theme.as_deref() == Some(identifier) {
            return SetThemeOutcome::Unchanged;
        }

        if !is_valid_theme(identifier, self.loader.as_ref(), &self.config) {
            tracing::warn!(
                "Rejected theme {:?}, keeping {:?}",
                identifier,
                self.theme.as_deref()
            );
            return SetThemeOutcome::Rejected;
        }

        tracing::debug!("Adopted theme {:?}", identifier);
        self.theme = Some(identifier.to_string());
        self.document = OnceCell::new();
        SetThemeOutcome::Adopted
    }

    /// Load the active theme's document if it is not held yet.
    ///
    /// Returns `None` when no theme is set. Read and parse failures are
    /// returned to the caller and nothing is cached for them.
    pub fn ensure_loaded(&self) -> Result<Option<Arc<ThemeDocument>>> {
        let Some(theme) = self.theme.as_deref() else {
            return Ok(None);
        };

        self.document
            .get_or_try_init(|| self.load(theme))
            .map(|document| Some(Arc::clone(document)))
    }

    fn load(&self, theme: &str) -> Result<Arc<ThemeDocument>> {
        let shared = self.config.caching == CachingMode::Shared;

        if shared {
            if let Some(document) = self.cache.get(theme) {
                tracing::debug!("Theme {:?} served from document cache", theme);
                return Ok(document);
            }
        }

        let path = self
            .loader
            .map_path(&self.config.theme_document_path(theme));
        let document = Arc::new(load_document(self.loader.as_ref(), &path)?);

        if shared {
            self.cache.set(theme, Arc::clone(&document));
        }
        Ok(document)
    }

    /// The `dir` attribute of a document loaded for the active theme.
    pub(crate) fn document_dir<'a>(&self, document: &'a ThemeDocument) -> Result<&'a str> {
        document.dir().ok_or_else(|| ThemeError::MissingDirectory {
            theme: self.theme.clone().unwrap_or_default(),
        })
    }

    /// Client-side asset directory of the active theme, ending in `/`.
    pub fn asset_directory(&self) -> Result<String> {
        let document = self.ensure_loaded()?.ok_or(ThemeError::NoThemeSelected)?;
        let dir = self.document_dir(&document)?;
        Ok(self.config.client_asset_directory(dir))
    }

    /// Client-side path of `filename` inside the active theme's asset directory.
    pub fn build_asset_path(&self, filename: &str) -> Result<String> {
        Ok(self.asset_directory()? + filename)
    }
}
