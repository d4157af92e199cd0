use crate::model::{PriceRecord, VolatilityLabel};
use crate::utils::mean;

/// Standard deviation is compared against this share of the mean price.
pub const VOLATILITY_THRESHOLD_RATIO: f64 = 0.05;

/// Population standard deviation (divides by N).
pub fn population_std_dev(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let avg = mean(prices);
    let variance = prices.iter().map(|p| (p - avg).powi(2)).sum::<f64>() / prices.len() as f64;
    variance.sqrt()
}

/// "High Volatility" only when the deviation strictly exceeds 5% of the mean.
pub fn calculate_volatility(series: &[PriceRecord]) -> VolatilityLabel {
    if series.len() < 2 {
        return VolatilityLabel::StableMarket;
    }

    let prices: Vec<f64> = series.iter().map(|r| r.price).collect();
    let avg = mean(&prices);
    let std_dev = population_std_dev(&prices);

    if std_dev > avg * VOLATILITY_THRESHOLD_RATIO {
        VolatilityLabel::HighVolatility
    } else {
        VolatilityLabel::StableMarket
    }
}
