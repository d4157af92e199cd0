use crate::model::{Momentum, MomentumLabel, PriceRecord};
use crate::utils::{mean, round2};
use chrono::{DateTime, Duration, Utc};

const WINDOW_DAYS: i64 = 30;
const PRESSURE_THRESHOLD: f64 = 5.0;

/// Compares the last-30-day average against the 30 days before it.
pub fn calculate_momentum(series: &[PriceRecord]) -> Momentum {
    calculate_momentum_at(series, Utc::now())
}

/// Same as [`calculate_momentum`] with an explicit reference time.
pub fn calculate_momentum_at(series: &[PriceRecord], now: DateTime<Utc>) -> Momentum {
    if series.len() < 2 {
        return Momentum::neutral();
    }

    let thirty_days_ago = now - Duration::days(WINDOW_DAYS);
    let sixty_days_ago = now - Duration::days(WINDOW_DAYS * 2);

    let last_month: Vec<f64> = series
        .iter()
        .filter(|r| r.date >= thirty_days_ago)
        .map(|r| r.price)
        .collect();
    let prev_month: Vec<f64> = series
        .iter()
        .filter(|r| r.date >= sixty_days_ago && r.date < thirty_days_ago)
        .map(|r| r.price)
        .collect();

    // newest first
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let last_avg = if last_month.is_empty() {
        sorted[0].price
    } else {
        mean(&last_month)
    };

    let prev_avg = if !prev_month.is_empty() {
        mean(&prev_month)
    } else if let Some(second) = sorted.get(1) {
        second.price
    } else {
        last_avg
    };

    let change = if prev_avg > 0.0 {
        (last_avg - prev_avg) / prev_avg * 100.0
    } else {
        0.0
    };

    let label = if change > PRESSURE_THRESHOLD {
        MomentumLabel::StrongUpwardPressure
    } else if change < -PRESSURE_THRESHOLD {
        MomentumLabel::SharpDropRisk
    } else {
        MomentumLabel::Neutral
    };

    Momentum {
        value: round2(change),
        label,
    }
}
