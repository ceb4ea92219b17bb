use crate::models::PostingRecord;
use std::sync::Arc;
use std::time::Duration;

/// In-process cache of candidate postings
///
/// Recommendation requests in quick succession share one storage query.
/// Entries expire after the configured TTL so new or closed postings show
/// up without a restart.
pub struct CandidateCache {
    cache: moka::future::Cache<String, Arc<Vec<PostingRecord>>>,
}

impl CandidateCache {
    /// Create a new cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<PostingRecord>>> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn set(&self, key: &str, postings: Arc<Vec<PostingRecord>>) {
        self.cache.insert(key.to_string(), postings).await;
        tracing::trace!("Cache set: {}", key);
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the active postings of a source
    pub fn active_postings(source: &str) -> String {
        format!("postings:active:{}", source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_posting(id: &str) -> PostingRecord {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = CandidateCache::new(10, 60);
        let key = CacheKey::active_postings("file data/internships.json");

        assert!(cache.get(&key).await.is_none());

        cache.set(&key, Arc::new(vec![create_posting("1")])).await;
        let hit = cache.get(&key).await.unwrap();
        assert_eq!(hit[0].id, "1");
    }

    #[tokio::test]
    async fn test_cache_entries_expire() {
        let cache = CandidateCache::new(10, 1);
        let key = CacheKey::active_postings("supabase");

        cache.set(&key, Arc::new(vec![create_posting("1")])).await;
        assert!(cache.get(&key).await.is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::active_postings("supabase"), "postings:active:supabase");
    }
}
