//! Parsed theme document types.
//!
//! Page names, tags and language codes are stored upper-cased so lookups are
//! case-insensitive. Document order is preserved: when several entries match
//! a lookup, the first one wins.

/// A single tagged value, optionally bound to a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    tag: String,
    language: Option<String>,
    value: String,
}

impl Resource {
    pub fn new(tag: &str, language: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            tag: normalize(tag),
            language: language
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(normalize),
            value: value.into(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Raw value, before `~` substitution.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A named group of resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: String,
    resources: Vec<Resource>,
}

impl Page {
    pub fn new(name: &str, resources: Vec<Resource>) -> Self {
        Self {
            name: normalize(name),
            resources,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

/// A parsed theme: its asset directory and resource pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeDocument {
    dir: Option<String>,
    pages: Vec<Page>,
}

impl ThemeDocument {
    pub fn new(dir: Option<String>, pages: Vec<Page>) -> Self {
        Self { dir, pages }
    }

    /// The theme's asset subdirectory, from the root `dir` attribute.
    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// First resource in document order on `page` with `tag`.
    ///
    /// With `Some(language)` only resources bound to that exact language
    /// match; with `None` the language is ignored.
    pub fn find(&self, page: &str, tag: &str, language: Option<&str>) -> Option<&Resource> {
        let page = normalize(page);
        let tag = normalize(tag);
        let language = language.map(normalize);

        self.pages
            .iter()
            .filter(|p| p.name == page)
            .flat_map(|p| p.resources.iter())
            .find(|r| {
                r.tag == tag
                    && match &language {
                        Some(code) => r.language.as_deref() == Some(code.as_str()),
                        None => true,
                    }
            })
    }

    /// Total number of resources across all pages.
    pub fn resource_count(&self) -> usize {
        self.pages.iter().map(|p| p.resources.len()).sum()
    }
}

pub(crate) fn normalize(key: &str) -> String {
    key.trim().to_uppercase()
}
