use crate::models::Listing;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache of remote listing lists
///
/// Entries expire after the staleness window; the next read after expiry
/// goes back to the remote store.
pub struct CacheManager {
    listings: moka::future::Cache<String, Arc<Vec<Listing>>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let listings = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { listings, ttl_secs }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Listing>>> {
        let hit = self.listings.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn set(&self, key: &str, value: Arc<Vec<Listing>>) {
        self.listings.insert(key.to_string(), value).await;
        tracing::trace!("Cache set: {}", key);
    }

    pub async fn delete(&self, key: &str) {
        self.listings.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.listings.invalidate_all();
        tracing::debug!("Invalidated every cached listing list");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.listings.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key of the full remote kindergarten list
    pub fn kindergartens() -> String {
        "kindergartens:all".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::models::Category;

    #[tokio::test]
    async fn test_cache_set_get_delete() {
        let cache = CacheManager::new(10, 60);
        let key = CacheKey::kindergartens();
        let value = Arc::new(catalog::listings(Category::Kindergarten).to_vec());

        assert!(cache.get(&key).await.is_none());

        cache.set(&key, value.clone()).await;
        assert_eq!(cache.get(&key).await.map(|v| v.len()), Some(value.len()));

        cache.delete(&key).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = CacheManager::new(10, 1);
        let key = CacheKey::kindergartens();
        cache.set(&key, Arc::new(vec![])).await;

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::kindergartens(), "kindergartens:all");
    }
}
