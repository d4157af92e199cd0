use crate::model::CacheError;

/// Redis-shaped key-value store: GET and SETEX.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: String) -> Result<(), CacheError>;
}
