use crate::analyzer::confidence::calculate_confidence;
use crate::analyzer::momentum::calculate_momentum_at;
use crate::analyzer::suggested_price::{generate_suggested_price, SuggestionInput};
use crate::analyzer::trend::{calculate_trend_percentage, determine_trend_label};
use crate::analyzer::volatility::calculate_volatility;
use crate::model::{PriceRecord, SignalBundle};
use chrono::{DateTime, Utc};

/// Trait defining the interface for a price series analyzer.
pub trait Analyzer {
    /// Runs trend, volatility, confidence and momentum over one series.
    fn compute_signals(&self, series: &[PriceRecord]) -> SignalBundle;
    /// Recommended listing price for `current_price` given a signal bundle.
    fn suggest_price(&self, current_price: f64, signals: &SignalBundle) -> f64;
}

/// Stateless implementation of the analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceAnalyzer;

impl PriceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for PriceAnalyzer {
    fn compute_signals(&self, series: &[PriceRecord]) -> SignalBundle {
        compute_signals(series)
    }

    fn suggest_price(&self, current_price: f64, signals: &SignalBundle) -> f64 {
        suggest_price(current_price, signals)
    }
}

/// Uncached signal computation, momentum measured against the current time.
pub fn compute_signals(series: &[PriceRecord]) -> SignalBundle {
    compute_signals_at(series, Utc::now())
}

pub fn compute_signals_at(series: &[PriceRecord], now: DateTime<Utc>) -> SignalBundle {
    let trend_percentage = calculate_trend_percentage(series);
    let volatility_label = calculate_volatility(series);

    SignalBundle {
        trend_percentage,
        trend_label: determine_trend_label(trend_percentage),
        volatility_label,
        confidence: calculate_confidence(series, volatility_label),
        momentum: calculate_momentum_at(series, now),
    }
}

pub fn suggest_price(current_price: f64, signals: &SignalBundle) -> f64 {
    generate_suggested_price(SuggestionInput {
        current_price,
        trend_percentage: signals.trend_percentage,
        volatility: signals.volatility_label,
        confidence: signals.confidence,
    })
}
