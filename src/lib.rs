//! Market price analytics for crop listings: trend, volatility, confidence and
//! momentum signals over a price history, a suggested listing price, and a
//! fail-open TTL cache for the computed signals.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod logging;
pub mod model;
pub mod normalizer;
pub mod service;
pub mod storage;
pub mod utils;

pub use analyzer::{compute_signals, suggest_price, Analyzer, PriceAnalyzer};
pub use cache::{AnalysisCache, KeyValueStore, MemoryStore, RedisStore};
pub use model::{
    CacheError, HistoryError, Momentum, MomentumLabel, PriceRecord, ServiceError, SignalBundle,
    TrendLabel, VolatilityLabel,
};
pub use service::AnalyticsService;
pub use storage::{PriceHistoryProvider, SqliteHistory};
