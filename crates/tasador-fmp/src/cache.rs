//! In-memory response cache.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Raw response bodies keyed by endpoint and query string.
///
/// Keys never include the API key. Entries live as long as the cache; there is
/// no expiry.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, String>>,
}

impl ResponseCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached body.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a body, replacing any previous entry.
    pub async fn insert(&self, key: impl Into<String>, body: impl Into<String>) {
        self.entries.write().await.insert(key.into(), body.into());
    }

    /// Number of cached responses.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = ResponseCache::new();
        assert!(cache.is_empty().await);

        cache.insert("profile?symbol=AAPL", "[]").await;
        assert_eq!(cache.get("profile?symbol=AAPL").await.as_deref(), Some("[]"));
        assert!(cache.get("profile?symbol=MSFT").await.is_none());
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
