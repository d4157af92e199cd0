use crate::model::{PriceRecord, TrendLabel};

/// Percentage change between the oldest and the latest price.
/// Fewer than two records, or a zero oldest price, gives no signal (0).
pub fn calculate_trend_percentage(series: &[PriceRecord]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let mut sorted = series.to_vec();
    sorted.sort_by_key(|r| r.date);

    let oldest = sorted[0].price;
    let latest = sorted[sorted.len() - 1].price;

    if oldest == 0.0 {
        return 0.0;
    }

    (latest - oldest) / oldest * 100.0
}

/// Anything within ±1% is noise.
pub fn determine_trend_label(trend_percentage: f64) -> TrendLabel {
    if trend_percentage > 1.0 {
        TrendLabel::Increasing
    } else if trend_percentage < -1.0 {
        TrendLabel::Decreasing
    } else {
        TrendLabel::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(days_ago: i64, price: f64) -> PriceRecord {
        PriceRecord::new(Utc::now() - Duration::days(days_ago), price)
    }

    #[test]
    fn six_month_rise_is_increasing() {
        let series = vec![record(180, 2000.0), record(1, 2200.0)];
        let pct = calculate_trend_percentage(&series);
        assert!((pct - 10.0).abs() < 1e-9);
        assert_eq!(determine_trend_label(pct), TrendLabel::Increasing);
    }

    #[test]
    fn input_order_does_not_matter() {
        let ordered = vec![record(90, 100.0), record(60, 120.0), record(30, 90.0), record(1, 80.0)];
        let mut shuffled = ordered.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 2);

        assert_eq!(
            calculate_trend_percentage(&ordered),
            calculate_trend_percentage(&shuffled)
        );
        assert!((calculate_trend_percentage(&shuffled) + 20.0).abs() < 1e-9);
        // the caller's slice is left untouched
        assert_eq!(shuffled[0].price, 80.0);
    }

    #[test]
    fn insufficient_or_degenerate_series_is_zero() {
        assert_eq!(calculate_trend_percentage(&[]), 0.0);
        assert_eq!(calculate_trend_percentage(&[record(1, 50.0)]), 0.0);
        assert_eq!(calculate_trend_percentage(&[record(10, 0.0), record(1, 50.0)]), 0.0);
    }

    #[test]
    fn label_band_is_exclusive() {
        assert_eq!(determine_trend_label(1.0), TrendLabel::Stable);
        assert_eq!(determine_trend_label(-1.0), TrendLabel::Stable);
        assert_eq!(determine_trend_label(1.0001), TrendLabel::Increasing);
        assert_eq!(determine_trend_label(-1.0001), TrendLabel::Decreasing);
        assert_eq!(determine_trend_label(0.0), TrendLabel::Stable);
    }
}
