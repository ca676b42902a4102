//! Keyed cache of parsed theme documents.
//!
//! Documents are immutable once parsed and shared as `Arc`s. Two stores that
//! miss on the same key at the same time may both parse; the last `set` wins
//! and readers always see a complete document.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use super::types::ThemeDocument;

pub trait DocumentCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<ThemeDocument>>;
    fn set(&self, key: &str, document: Arc<ThemeDocument>);
}

/// In-memory document cache.
#[derive(Debug, Default)]
pub struct MemoryDocumentCache {
    documents: RwLock<HashMap<String, Arc<ThemeDocument>>>,
}

impl MemoryDocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a cached document so the next store to miss reparses it.
    pub fn invalidate(&self, key: &str) -> bool {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    pub fn clear(&self) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DocumentCache for MemoryDocumentCache {
    fn get(&self, key: &str) -> Option<Arc<ThemeDocument>> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, document: Arc<ThemeDocument>) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), document);
    }
}

static SHARED_CACHE: Lazy<Arc<MemoryDocumentCache>> =
    Lazy::new(|| Arc::new(MemoryDocumentCache::new()));

/// The process-wide document cache.
pub fn shared_cache() -> Arc<MemoryDocumentCache> {
    Arc::clone(&SHARED_CACHE)
}
