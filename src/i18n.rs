//! Active language lookup for theme resolution.

/// Supplies the language code of the current caller or session.
pub trait LanguageSource: Send + Sync {
    fn language_code(&self) -> String;
}

/// A fixed language code, e.g. taken from a user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLanguage(pub String);

impl FixedLanguage {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl LanguageSource for FixedLanguage {
    fn language_code(&self) -> String {
        self.0.clone()
    }
}

/// The process locale as set through `rust_i18n::set_locale`.
///
/// Only the primary subtag is reported, so `en-US` resolves as `en`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLocale;

impl LanguageSource for ProcessLocale {
    fn language_code(&self) -> String {
        let locale = rust_i18n::locale();
        primary_subtag(&locale).to_string()
    }
}

fn primary_subtag(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}
