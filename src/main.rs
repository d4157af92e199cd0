use crop_pricer::cache::{AnalysisCache, KeyValueStore, MemoryStore, RedisStore};
use crop_pricer::config::{load_config, AppConfig, CropConfig};
use crop_pricer::logging::init_logging;
use crop_pricer::service::AnalyticsService;
use crop_pricer::storage::SqliteHistory;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    // Load configuration from file
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let history = match SqliteHistory::new(&config.database_path) {
        Ok(h) => Arc::new(h),
        Err(e) => {
            error!("Failed to open price history: {}", e);
            return;
        }
    };

    let store = build_store(&config).await;
    let cache = AnalysisCache::with_timeout(store, Duration::from_millis(config.cache_timeout_ms));
    let service = AnalyticsService::new(history, cache).with_history_months(config.history_months);

    loop {
        info!("Analyzing {} crops...", config.crops.len());

        let tasks: Vec<_> = config
            .crops
            .iter()
            .map(|crop_cfg| process_crop(crop_cfg, &service))
            .collect();
        join_all(tasks).await;

        if config.check_interval_seconds == 0 {
            break;
        }
        info!("Waiting {}s for the next pass...", config.check_interval_seconds);
        sleep(Duration::from_secs(config.check_interval_seconds)).await;
    }
}

/// Redis when configured and reachable, otherwise an in-process store.
async fn build_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    if let Some(url) = &config.redis_url {
        match RedisStore::connect(url).await {
            Ok(store) => return Arc::new(store),
            Err(e) => warn!("Redis unavailable, caching in memory instead: {}", e),
        }
    }
    Arc::new(MemoryStore::new())
}

async fn process_crop(crop_cfg: &CropConfig, service: &AnalyticsService) {
    let report = match service
        .report(&crop_cfg.name, crop_cfg.region.as_deref(), crop_cfg.current_price)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            warn!("Analysis failed for {}: {}", crop_cfg.name, e);
            return;
        }
    };

    info!(
        "{}: current {:.2}, 30-day avg {:.2}, trend {}, {}, confidence {}, momentum {:.2}% ({})",
        report.crop,
        report.current_price,
        report.thirty_day_average,
        report.trend.as_str(),
        report.volatility.as_str(),
        report.confidence,
        report.momentum.value,
        report.momentum.label.as_str(),
    );
    info!(
        "{}: {} | suggested price {:.2}",
        report.crop,
        report.recommendation.as_str(),
        report.suggested_price
    );

    match serde_json::to_string(&report) {
        Ok(json) => info!("{} report: {}", report.crop, json),
        Err(e) => warn!("Failed to serialize report for {}: {}", report.crop, e),
    }
}
