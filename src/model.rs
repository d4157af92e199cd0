// Core structs: PriceRecord, SignalBundle and the error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single observed price for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: DateTime<Utc>, price: f64) -> Self {
        Self { date, price }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Increasing => "increasing",
            TrendLabel::Decreasing => "decreasing",
            TrendLabel::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLabel {
    #[serde(rename = "Stable Market")]
    StableMarket,
    #[serde(rename = "High Volatility")]
    HighVolatility,
}

impl VolatilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLabel::StableMarket => "Stable Market",
            VolatilityLabel::HighVolatility => "High Volatility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumLabel {
    #[serde(rename = "Strong Upward Pressure")]
    StrongUpwardPressure,
    #[serde(rename = "Sharp Drop Risk")]
    SharpDropRisk,
    Neutral,
}

impl MomentumLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MomentumLabel::StrongUpwardPressure => "Strong Upward Pressure",
            MomentumLabel::SharpDropRisk => "Sharp Drop Risk",
            MomentumLabel::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub value: f64,
    pub label: MomentumLabel,
}

impl Momentum {
    pub fn neutral() -> Self {
        Self {
            value: 0.0,
            label: MomentumLabel::Neutral,
        }
    }
}

/// The cached result of the four analyzers for one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub trend_percentage: f64,
    pub trend_label: TrendLabel,
    pub volatility_label: VolatilityLabel,
    pub confidence: u8,
    pub momentum: Momentum,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("cache call timed out after {0} ms")]
    Timeout(u64),
    #[error("cache backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("a crop name is required")]
    MissingCrop,
    #[error(transparent)]
    History(#[from] HistoryError),
}
