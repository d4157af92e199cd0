//! Cached signal computation with per-crop in-flight deduplication.

use crate::analyzer::market_report::MarketReport;
use crate::analyzer::{Analyzer, PriceAnalyzer};
use crate::cache::AnalysisCache;
use crate::model::{PriceRecord, ServiceError, SignalBundle};
use crate::normalizer::{cache_id, normalize_crop_name};
use crate::storage::PriceHistoryProvider;
use chrono::{DateTime, Months, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

pub const DEFAULT_HISTORY_MONTHS: u32 = 6;

type Flight = Arc<OnceCell<SignalBundle>>;

pub struct AnalyticsService {
    provider: Arc<dyn PriceHistoryProvider>,
    cache: AnalysisCache,
    analyzer: PriceAnalyzer,
    history_months: u32,
    in_flight: Mutex<HashMap<String, Flight>>,
}

impl AnalyticsService {
    pub fn new(provider: Arc<dyn PriceHistoryProvider>, cache: AnalysisCache) -> Self {
        Self {
            provider,
            cache,
            analyzer: PriceAnalyzer::new(),
            history_months: DEFAULT_HISTORY_MONTHS,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Set the lookback window used when loading history (default 6 months)
    pub fn with_history_months(mut self, months: u32) -> Self {
        self.history_months = months;
        self
    }

    /// Signal bundle for a crop, served from cache when possible.
    pub async fn signals(
        &self,
        crop: &str,
        region: Option<&str>,
    ) -> Result<SignalBundle, ServiceError> {
        let id = cache_id(crop, region).ok_or(ServiceError::MissingCrop)?;
        self.resolve(&id, || self.load_history(crop, region)).await
    }

    /// Same cache discipline for a series the caller already holds.
    pub async fn signals_for_series(
        &self,
        crop_id: &str,
        series: &[PriceRecord],
    ) -> Result<SignalBundle, ServiceError> {
        let id = normalize_crop_name(crop_id).ok_or(ServiceError::MissingCrop)?;
        self.resolve(&id, || async { Ok(series.to_vec()) }).await
    }

    pub fn suggest_price(&self, current_price: f64, signals: &SignalBundle) -> f64 {
        self.analyzer.suggest_price(current_price, signals)
    }

    /// Full market report. History is always loaded for the chart; only the
    /// signal bundle comes from the cache.
    pub async fn report(
        &self,
        crop: &str,
        region: Option<&str>,
        current_price: Option<f64>,
    ) -> Result<MarketReport, ServiceError> {
        let id = cache_id(crop, region).ok_or(ServiceError::MissingCrop)?;
        let series = self.load_history(crop, region).await?;
        let signals = self.resolve(&id, || async { Ok(series.clone()) }).await?;

        let display_name = crop.trim();
        Ok(MarketReport::build(display_name, &series, &signals, current_price, Utc::now()))
    }

    async fn load_history(
        &self,
        crop: &str,
        region: Option<&str>,
    ) -> Result<Vec<PriceRecord>, ServiceError> {
        let since = self.window_start(Utc::now());
        let series = self.provider.fetch_history(crop, region, since).await?;
        Ok(series)
    }

    fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.history_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Cache lookup, then at most one concurrent computation per id. Callers
    /// that arrive while a computation is running wait for its result.
    async fn resolve<F, Fut>(&self, id: &str, load: F) -> Result<SignalBundle, ServiceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<PriceRecord>, ServiceError>>,
    {
        if let Some(bundle) = self.cache.get(id).await {
            return Ok(bundle);
        }

        let flight = {
            let mut flights = self.in_flight.lock().await;
            flights.entry(id.to_string()).or_default().clone()
        };

        let result = flight
            .get_or_try_init(|| async move {
                // a previous flight may have filled the cache since the first lookup
                if let Some(bundle) = self.cache.get(id).await {
                    return Ok(bundle);
                }
                let series = load().await?;
                let bundle = self.analyzer.compute_signals(&series);
                info!(
                    "Computed signals for {} from {} records: trend {:.2}% ({}), {}, confidence {}, momentum {} ({})",
                    id,
                    series.len(),
                    bundle.trend_percentage,
                    bundle.trend_label.as_str(),
                    bundle.volatility_label.as_str(),
                    bundle.confidence,
                    bundle.momentum.value,
                    bundle.momentum.label.as_str(),
                );
                self.cache.set(id, &bundle).await;
                Ok::<_, ServiceError>(bundle)
            })
            .await
            .cloned();

        {
            let mut flights = self.in_flight.lock().await;
            if flights.get(id).is_some_and(|current| Arc::ptr_eq(current, &flight)) {
                flights.remove(id);
                debug!("Retired in-flight entry for {}", id);
            }
        }

        result
    }

    #[cfg(test)]
    async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
