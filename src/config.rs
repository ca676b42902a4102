//! Path composition context and resolution flags.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// How parsed theme documents are shared between stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CachingMode {
    /// Parse each theme once per process and share it through the document cache.
    #[default]
    Shared,
    /// Skip the process-wide cache so edits to a theme file show up in the next store.
    LiveReload,
}

/// Configuration for theme resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ThemeConfig {
    /// Root under which browsers reach theme assets (e.g. `/forum/`).
    pub client_asset_root: String,

    /// Root used when composing server-side paths and substituted resource values.
    pub server_asset_root: String,

    /// Name of the folder below the asset roots holding the theme documents.
    pub themes_folder: String,

    pub caching: CachingMode,

    /// Record a diagnostic event whenever a page/tag pair is missing from the theme.
    pub log_missing_theme_item: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            client_asset_root: "/".to_string(),
            server_asset_root: "/".to_string(),
            themes_folder: "themes".to_string(),
            caching: CachingMode::Shared,
            log_missing_theme_item: false,
        }
    }
}

impl ThemeConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// JSON Schema describing the config file format.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ThemeConfig)).unwrap_or_default()
    }

    /// Virtual path of the folder holding the theme documents.
    pub fn server_themes_path(&self) -> String {
        join_path(&self.server_asset_root, &self.themes_folder)
    }

    /// Virtual path of a theme document.
    pub fn theme_document_path(&self, identifier: &str) -> String {
        join_path(&self.server_themes_path(), identifier)
    }

    /// Server-side asset path for a theme directory, used for `~` substitution.
    pub fn server_asset_path(&self, theme_dir: &str) -> String {
        join_path(&self.server_themes_path(), theme_dir)
    }

    /// Client-side asset directory for a theme directory, always ending in `/`.
    pub fn client_asset_directory(&self, theme_dir: &str) -> String {
        let themes = join_path(&self.client_asset_root, &self.themes_folder);
        let mut dir = join_path(&themes, theme_dir);
        dir.push('/');
        dir
    }
}

/// Join two virtual path segments with exactly one `/` between them.
pub(crate) fn join_path(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    format!("{}/{}", base, segment)
}
