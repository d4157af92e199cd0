//! Fail-open TTL cache for signal bundles, one entry per crop.
//!
//! A failing or slow backend only costs a recomputation: reads degrade to a
//! miss and writes to a no-op. Neither ever surfaces to the caller.

pub mod memory;
pub mod redis_store;
pub mod traits;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use traits::KeyValueStore;

use crate::model::{CacheError, SignalBundle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub const CACHE_KEY_PREFIX: &str = "price_analysis_";
pub const CACHE_TTL_SECONDS: u64 = 600;
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(500);

pub fn cache_key(crop_id: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, crop_id)
}

#[derive(Clone)]
pub struct AnalysisCache {
    store: Arc<dyn KeyValueStore>,
    call_timeout: Duration,
}

impl AnalysisCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_timeout(store, DEFAULT_CACHE_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<dyn KeyValueStore>, call_timeout: Duration) -> Self {
        Self { store, call_timeout }
    }

    /// Cached bundle for `crop_id`, or `None` on miss, expiry or any backend failure.
    pub async fn get(&self, crop_id: &str) -> Option<SignalBundle> {
        let key = cache_key(crop_id);
        match self.try_get(&key).await {
            Ok(Some(bundle)) => {
                debug!("Cache hit: {}", key);
                Some(bundle)
            }
            Ok(None) => {
                debug!("Cache miss: {}", key);
                None
            }
            Err(e) => {
                warn!("Cache get failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Stores the whole bundle with the fixed TTL. Failures are logged and dropped.
    pub async fn set(&self, crop_id: &str, bundle: &SignalBundle) {
        let key = cache_key(crop_id);
        if let Err(e) = self.try_set(&key, bundle).await {
            warn!("Cache set failed for {}: {}", key, e);
        }
    }

    async fn try_get(&self, key: &str) -> Result<Option<SignalBundle>, CacheError> {
        let raw = self.bounded(self.store.get(key)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn try_set(&self, key: &str, bundle: &SignalBundle) -> Result<(), CacheError> {
        let json = serde_json::to_string(bundle)?;
        self.bounded(self.store.set_ex(key, CACHE_TTL_SECONDS, json)).await
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        match timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.call_timeout.as_millis() as u64)),
        }
    }
}
