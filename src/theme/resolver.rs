//! Resource resolution against the active theme.

use std::sync::Arc;

use super::store::{SetThemeOutcome, ThemeStore};
use super::types::{normalize, Resource, ThemeDocument};
use crate::error::Result;
use crate::i18n::LanguageSource;
use crate::services::diagnostics::{DiagnosticEvent, DiagnosticsSink, EventSeverity};
use crate::services::panel_state::{CollapsiblePanelState, PanelStateStore};

/// Marker in resource values standing for the theme's server asset path.
pub const PLACEHOLDER_MARKER: char = '~';

/// Resolves `(page, tag)` pairs to theme resource values for one caller.
pub struct ThemeResolver {
    store: ThemeStore,
    language: Arc<dyn LanguageSource>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    log_missing_theme_item: bool,
    actor_id: Option<u64>,
}

impl ThemeResolver {
    pub fn new(
        store: ThemeStore,
        language: Arc<dyn LanguageSource>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let log_missing_theme_item = store.config().log_missing_theme_item;
        Self {
            store,
            language,
            diagnostics,
            log_missing_theme_item,
            actor_id: None,
        }
    }

    /// Attribute diagnostic events to the given user.
    pub fn with_actor(mut self, actor_id: u64) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn log_missing_theme_item(&self) -> bool {
        self.log_missing_theme_item
    }

    pub fn set_log_missing_theme_item(&mut self, enabled: bool) {
        self.log_missing_theme_item = enabled;
    }

    pub fn set_theme(&mut self, identifier: &str) -> SetThemeOutcome {
        self.store.set_theme(identifier)
    }

    pub fn theme(&self) -> Option<&str> {
        self.store.theme()
    }

    pub fn asset_directory(&self) -> Result<String> {
        self.store.asset_directory()
    }

    pub fn build_asset_path(&self, filename: &str) -> Result<String> {
        self.store.build_asset_path(filename)
    }

    /// Resolve `page`/`tag`, falling back to `[PAGE.TAG]` when it is missing.
    pub fn get_item(&self, page: &str, tag: &str) -> Result<String> {
        self.get_item_or(page, tag, &default_item(page, tag))
    }

    /// Resolve `page`/`tag`, falling back to `default_value` when it is missing.
    ///
    /// A resource bound to the active language wins over any other; failing
    /// that, the first resource with the tag is used whatever its language.
    /// `~` in the value is replaced by the theme's server asset path.
    ///
    /// A theme document that cannot be loaded, or one without a `dir`
    /// attribute on its root, fails every lookup.
    pub fn get_item_or(&self, page: &str, tag: &str, default_value: &str) -> Result<String> {
        let Some(document) = self.store.ensure_loaded()? else {
            return Ok(default_value.to_string());
        };
        let dir = self.store.document_dir(&document)?;

        let page_key = normalize(page);
        let tag_key = normalize(tag);

        match self.lookup(&document, &page_key, &tag_key) {
            Some(resource) => Ok(self.substitute(resource.value(), dir)),
            None => {
                if self.log_missing_theme_item {
                    self.record_missing(page, &page_key, &tag_key);
                }
                Ok(default_value.to_string())
            }
        }
    }

    fn lookup<'a>(
        &self,
        document: &'a ThemeDocument,
        page: &str,
        tag: &str,
    ) -> Option<&'a Resource> {
        let language = normalize(&self.language.language_code());
        document
            .find(page, tag, Some(language.as_str()))
            .or_else(|| document.find(page, tag, None))
    }

    fn substitute(&self, value: &str, dir: &str) -> String {
        if !value.contains(PLACEHOLDER_MARKER) {
            return value.to_string();
        }
        let base = self.store.config().server_asset_path(dir);
        expand_placeholder(value, &base)
    }

    fn record_missing(&self, page: &str, page_key: &str, tag_key: &str) {
        self.diagnostics.record(&DiagnosticEvent {
            actor_id: self.actor_id,
            source: format!("theme/{}", page.trim().to_lowercase()),
            message: format!("Missing Theme Item: {}.{}", page_key, tag_key),
            severity: EventSeverity::Error,
        });
    }

    /// Icon for a collapsible panel's toggle button.
    ///
    /// A panel without recorded state takes `default_state`, which is stored
    /// for later requests. Expanded panels show the collapse icon, everything
    /// else the expand icon.
    pub fn collapsible_panel_image_url(
        &self,
        panel_id: &str,
        default_state: CollapsiblePanelState,
        states: &mut dyn PanelStateStore,
    ) -> Result<String> {
        let mut state = states.state(panel_id);
        if state == CollapsiblePanelState::None {
            state = default_state;
            states.set_state(panel_id, default_state);
        }

        let tag = if state == CollapsiblePanelState::Expanded {
            "PANEL_COLLAPSE"
        } else {
            "PANEL_EXPAND"
        };
        self.get_item("ICONS", tag)
    }
}

/// Placeholder returned for missing items: `[PAGE.TAG]`.
pub fn default_item(page: &str, tag: &str) -> String {
    format!("[{}.{}]", page.to_uppercase(), tag.to_uppercase())
}

/// Replace every `~` in `value` with `base`.
///
/// When the marker runs straight into a path segment (`~images/a.png`), a `/`
/// is inserted so the result stays a well-formed path.
pub fn expand_placeholder(value: &str, base: &str) -> String {
    let mut expanded = String::with_capacity(value.len() + base.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != PLACEHOLDER_MARKER {
            expanded.push(c);
            continue;
        }
        expanded.push_str(base);
        if chars.peek().is_some_and(|&next| starts_segment(next)) {
            expanded.push('/');
        }
    }

    expanded
}

fn starts_segment(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crate::i18n::FixedLanguage;
    use crate::services::diagnostics::{MemoryDiagnostics, NullDiagnostics};
    use crate::services::panel_state::InMemoryPanelStates;
    use crate::theme::cache::MemoryDocumentCache;
    use crate::theme::loader::tests::MockThemeLoader;
    use crate::error::ThemeError;

    const THEME: &str = r#"<Theme dir="classic">
  <page name="COMMON">
    <Resource tag="LOGO" language="EN">~images/logo.png</Resource>
    <Resource tag="LOGO" language="DE">~images/logo_de.png</Resource>
    <Resource tag="TITLE">Board</Resource>
    <Resource tag="BANNER">~/a.png|~/b.png</Resource>
  </page>
  <page name="ICONS">
    <Resource tag="PANEL_COLLAPSE">~/images/collapse.gif</Resource>
    <Resource tag="PANEL_EXPAND">~/images/expand.gif</Resource>
  </page>
</Theme>"#;

    fn resolver_with(language: &str, diagnostics: Arc<dyn DiagnosticsSink>) -> ThemeResolver {
        let loader = Arc::new(
            MockThemeLoader::new()
                .with_file("/forum/themes/classic.xml", THEME)
                .with_file(
                    "/forum/themes/nodir.xml",
                    r#"<Theme><page name="P"><Resource tag="A">~/x</Resource><Resource tag="B">plain</Resource></page></Theme>"#,
                ),
        );
        let config = ThemeConfig {
            client_asset_root: "/forum/".to_string(),
            server_asset_root: "/forum/".to_string(),
            ..Default::default()
        };
        let store = ThemeStore::new(config, loader, Arc::new(MemoryDocumentCache::new()));
        let mut resolver =
            ThemeResolver::new(store, Arc::new(FixedLanguage::new(language)), diagnostics);
        resolver.set_theme("classic.xml");
        resolver
    }

    fn resolver(language: &str) -> ThemeResolver {
        resolver_with(language, Arc::new(NullDiagnostics))
    }

    #[test]
    fn test_exact_language_match() {
        let resolver = resolver("en");
        assert_eq!(
            resolver.get_item("COMMON", "LOGO").unwrap(),
            "/forum/themes/classic/images/logo.png"
        );
        assert_eq!(
            resolver.get_item("common", "logo").unwrap(),
            "/forum/themes/classic/images/logo.png"
        );
        let german = self::resolver("de");
        assert_eq!(
            german.get_item("COMMON", "LOGO").unwrap(),
            "/forum/themes/classic/images/logo_de.png"
        );
    }

    #[test]
    fn test_language_agnostic_fallback() {
        let resolver = resolver("fr");
        assert_eq!(resolver.get_item("COMMON", "TITLE").unwrap(), "Board");
        // No FR entry: the first LOGO in document order is used.
        assert_eq!(
            resolver.get_item("COMMON", "LOGO").unwrap(),
            "/forum/themes/classic/images/logo.png"
        );
    }

    #[test]
    fn test_missing_item_defaults() {
        let resolver = resolver("en");
        assert_eq!(
            resolver.get_item("COMMON", "MISSING").unwrap(),
            "[COMMON.MISSING]"
        );
        assert_eq!(
            resolver.get_item("common", "missing").unwrap(),
            "[COMMON.MISSING]"
        );
        assert_eq!(
            resolver.get_item_or("NOPAGE", "LOGO", "fallback").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_no_theme_returns_default() {
        let loader = Arc::new(MockThemeLoader::new());
        let store = ThemeStore::new(
            ThemeConfig::default(),
            loader,
            Arc::new(MemoryDocumentCache::new()),
        );
        let resolver = ThemeResolver::new(
            store,
            Arc::new(FixedLanguage::new("en")),
            Arc::new(NullDiagnostics),
        );
        assert_eq!(resolver.get_item("COMMON", "LOGO").unwrap(), "[COMMON.LOGO]");
        assert_eq!(resolver.get_item_or("COMMON", "LOGO", "x").unwrap(), "x");
    }

    #[test]
    fn test_every_marker_is_substituted() {
        let resolver = resolver("en");
        assert_eq!(
            resolver.get_item("COMMON", "BANNER").unwrap(),
            "/forum/themes/classic/a.png|/forum/themes/classic/b.png"
        );
    }

    #[test]
    fn test_missing_items_are_logged_when_enabled() {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let mut resolver = resolver_with("en", diagnostics.clone()).with_actor(42);

        resolver.get_item("Common", "Missing").unwrap();
        assert!(diagnostics.events().is_empty());

        resolver.set_log_missing_theme_item(true);
        resolver.get_item("Common", "Missing").unwrap();
        resolver.get_item("COMMON", "TITLE").unwrap();

        let events = diagnostics.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].actor_id, Some(42));
        assert_eq!(events[0].source, "theme/common");
        assert_eq!(events[0].message, "Missing Theme Item: COMMON.MISSING");
        assert_eq!(events[0].severity, EventSeverity::Error);
    }

    #[test]
    fn test_missing_dir_attribute_fails_every_lookup() {
        let mut resolver = resolver("en");
        resolver.set_theme("nodir.xml");
        for tag in ["A", "B", "C"] {
            assert!(
                matches!(
                    resolver.get_item("P", tag),
                    Err(ThemeError::MissingDirectory { ref theme }) if theme == "nodir.xml"
                ),
                "expected missing dir error for P.{}",
                tag
            );
        }
        assert!(matches!(
            resolver.get_item_or("P", "C", "fallback"),
            Err(ThemeError::MissingDirectory { .. })
        ));
    }

    #[test]
    fn test_collapsible_panel_image_url() {
        let resolver = resolver("en");
        let mut states = InMemoryPanelStates::new();

        let url = resolver
            .collapsible_panel_image_url("stats", CollapsiblePanelState::Expanded, &mut states)
            .unwrap();
        assert_eq!(url, "/forum/themes/classic/images/collapse.gif");
        assert_eq!(states.state("stats"), CollapsiblePanelState::Expanded);

        states.set_state("stats", CollapsiblePanelState::Collapsed);
        let url = resolver
            .collapsible_panel_image_url("stats", CollapsiblePanelState::Expanded, &mut states)
            .unwrap();
        assert_eq!(url, "/forum/themes/classic/images/expand.gif");
    }

    #[test]
    fn test_default_item() {
        assert_eq!(default_item("common", "logo"), "[COMMON.LOGO]");
    }

    #[test]
    fn test_expand_placeholder() {
        let base = "/forum/themes/classic";
        assert_eq!(expand_placeholder("~", base), base);
        assert_eq!(
            expand_placeholder("~/images/a.png", base),
            "/forum/themes/classic/images/a.png"
        );
        assert_eq!(
            expand_placeholder("~images/a.png", base),
            "/forum/themes/classic/images/a.png"
        );
        assert_eq!(
            expand_placeholder("url(~)", base),
            "url(/forum/themes/classic)"
        );
        assert_eq!(expand_placeholder("no marker", base), "no marker");
    }
}
