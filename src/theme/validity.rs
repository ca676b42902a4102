//! Theme identifier validation.

use super::loader::ThemeLoader;
use crate::config::ThemeConfig;

/// Extension every theme document carries.
pub const THEME_DOCUMENT_EXTENSION: &str = ".xml";

/// Check that `candidate` names an existing theme document.
///
/// Blank names, names without the `.xml` extension (any case) and names whose
/// document does not exist under the themes folder are rejected. Never fails.
///
/// The name keeps its case for the existence check, the same path the document
/// is later loaded from, so on a case-sensitive filesystem `Dark.xml` and
/// `dark.xml` are different themes.
pub fn is_valid_theme(candidate: &str, loader: &dyn ThemeLoader, config: &ThemeConfig) -> bool {
    let name = candidate.trim();
    if name.is_empty() {
        return false;
    }

    if !name.to_lowercase().ends_with(THEME_DOCUMENT_EXTENSION) {
        return false;
    }

    let path = loader.map_path(&config.theme_document_path(name));
    loader.exists(&path)
}
