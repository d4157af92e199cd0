#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use crop_pricer::model::{CacheError, HistoryError, PriceRecord};
use crop_pricer::{KeyValueStore, PriceHistoryProvider};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store whose every call fails.
pub struct BrokenStore {
    pub calls: AtomicUsize,
}

impl BrokenStore {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn set_ex(&self, _key: &str, _ttl_seconds: u64, _value: String) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection refused".into()))
    }
}

/// Store that never answers within any reasonable timeout.
pub struct HangingStore;

#[async_trait::async_trait]
impl KeyValueStore for HangingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn set_ex(&self, _key: &str, _ttl_seconds: u64, _value: String) -> Result<(), CacheError> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Store returning a value that is not a signal bundle.
pub struct GarbageStore;

#[async_trait::async_trait]
impl KeyValueStore for GarbageStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(Some("{not json".into()))
    }

    async fn set_ex(&self, _key: &str, _ttl_seconds: u64, _value: String) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Provider with a fixed series and a simulated query delay.
pub struct SlowProvider {
    pub series: Vec<PriceRecord>,
    pub delay: std::time::Duration,
    pub calls: AtomicUsize,
}

impl SlowProvider {
    pub fn new(series: Vec<PriceRecord>, delay_ms: u64) -> Self {
        Self {
            series,
            delay: std::time::Duration::from_millis(delay_ms),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PriceHistoryProvider for SlowProvider {
    async fn fetch_history(
        &self,
        _crop: &str,
        _region: Option<&str>,
        _since: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>, HistoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.series.clone())
    }
}

pub fn days_ago(days: i64, price: f64) -> PriceRecord {
    PriceRecord::new(Utc::now() - Duration::days(days), price)
}

/// Six roughly monthly observations climbing from 2000 to 2200.
pub fn rising_series() -> Vec<PriceRecord> {
    vec![
        days_ago(170, 2000.0),
        days_ago(140, 2040.0),
        days_ago(110, 2080.0),
        days_ago(75, 2100.0),
        days_ago(40, 2150.0),
        days_ago(5, 2200.0),
    ]
}
