use crate::core::{catalog, live_or_static};
use crate::models::{Category, DataSource, Listing};
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::supabase::{SupabaseClient, SupabaseError};
use std::sync::Arc;
use std::time::Duration;

/// Retry policy of remote reads
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            delay: Duration::from_millis(500),
        }
    }
}

/// Listing source for every directory page
///
/// Kindergartens come from the remote table (cached for the staleness
/// window, retried once) with the bundled list as fallback; the other
/// categories are bundled only.
pub struct DirectoryService {
    supabase: Arc<SupabaseClient>,
    cache: Arc<CacheManager>,
    retry: RetryPolicy,
}

impl DirectoryService {
    pub fn new(supabase: Arc<SupabaseClient>, cache: Arc<CacheManager>, retry: RetryPolicy) -> Self {
        Self { supabase, cache, retry }
    }

    /// Remote kindergarten list, best rated first
    ///
    /// Served from the cache while fresh. A failed query is retried
    /// according to the retry policy; the last error is returned.
    /// Empty results are not cached so the next read tries again.
    pub async fn remote_kindergartens(&self) -> Result<Arc<Vec<Listing>>, SupabaseError> {
        let key = CacheKey::kindergartens();
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let mut attempt = 0;
        let listings = loop {
            match self.supabase.fetch_kindergartens().await {
                Ok(listings) => break listings,
                Err(e) if attempt < self.retry.retries => {
                    attempt += 1;
                    tracing::warn!("Kindergarten query failed ({}), retry {}/{}", e, attempt, self.retry.retries);
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => {
                    tracing::error!("Kindergarten query failed after {} attempts: {}", attempt + 1, e);
                    return Err(e);
                }
            }
        };

        let listings = Arc::new(listings);
        if !listings.is_empty() {
            self.cache.set(&key, listings.clone()).await;
        }
        Ok(listings)
    }

    /// Listings of a category, with the source they were served from
    pub async fn listings(&self, category: Category) -> (DataSource, Vec<Listing>) {
        match category {
            Category::Kindergarten => {
                let live = self.remote_kindergartens().await.map(|l| l.as_ref().clone());
                live_or_static(live, catalog::listings(Category::Kindergarten))
            }
            other => (DataSource::Static, catalog::listings(other).to_vec()),
        }
    }

    /// Look up a single listing of a category
    pub async fn listing(&self, category: Category, id: &str) -> Option<Listing> {
        let (_, listings) = self.listings(category).await;
        listings.into_iter().find(|l| l.id == id)
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }
}
