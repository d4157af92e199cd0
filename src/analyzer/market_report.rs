//! Per-crop market report: monthly chart data, the 30-day average, a sell
//! recommendation and the suggested listing price. Built fresh on every call.

use crate::analyzer::price_analysis::suggest_price;
use crate::model::{Momentum, PriceRecord, SignalBundle, TrendLabel, VolatilityLabel};
use crate::utils::{mean, round2};
use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::Serialize;

pub const CHART_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Sell (Favorable)")]
    StrongSell,
    #[serde(rename = "Hold (Prices Rising)")]
    Hold,
    #[serde(rename = "Sell Before Drop")]
    SellBeforeDrop,
    #[serde(rename = "Stable - Evaluate Needs")]
    EvaluateNeeds,
    #[serde(rename = "No Data")]
    NoData,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongSell => "Strong Sell (Favorable)",
            Recommendation::Hold => "Hold (Prices Rising)",
            Recommendation::SellBeforeDrop => "Sell Before Drop",
            Recommendation::EvaluateNeeds => "Stable - Evaluate Needs",
            Recommendation::NoData => "No Data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyChart {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub crop: String,
    pub chart: MonthlyChart,
    pub trend: TrendLabel,
    pub recommendation: Recommendation,
    pub suggested_price: f64,
    pub confidence: u8,
    pub current_price: f64,
    pub thirty_day_average: f64,
    pub volatility: VolatilityLabel,
    pub momentum: Momentum,
}

impl MarketReport {
    pub fn build(
        crop: &str,
        series: &[PriceRecord],
        signals: &SignalBundle,
        current_price: Option<f64>,
        now: DateTime<Utc>,
    ) -> Self {
        let current_price = current_price
            .or_else(|| latest_price(series))
            .unwrap_or(0.0);

        // empty history yields no advice, whatever the asking price
        let (thirty_day_average, recommendation, suggested_price) = if series.is_empty() {
            (0.0, Recommendation::NoData, 0.0)
        } else {
            let average = thirty_day_average(series, current_price, now);
            (
                average,
                recommend(current_price, average, signals.trend_label),
                suggest_price(current_price, signals),
            )
        };

        Self {
            crop: crop.to_string(),
            chart: monthly_chart(series, now),
            trend: signals.trend_label,
            recommendation,
            suggested_price,
            confidence: signals.confidence,
            current_price,
            thirty_day_average: round2(thirty_day_average),
            volatility: signals.volatility_label,
            momentum: signals.momentum,
        }
    }
}

pub fn latest_price(series: &[PriceRecord]) -> Option<f64> {
    series.iter().max_by_key(|r| r.date).map(|r| r.price)
}

/// Mean of the last 30 days, falling back to the current price.
pub fn thirty_day_average(series: &[PriceRecord], current_price: f64, now: DateTime<Utc>) -> f64 {
    let cutoff = now - Duration::days(30);
    let recent: Vec<f64> = series
        .iter()
        .filter(|r| r.date >= cutoff)
        .map(|r| r.price)
        .collect();

    if !recent.is_empty() {
        mean(&recent)
    } else if current_price > 0.0 {
        current_price
    } else {
        0.0
    }
}

pub fn recommend(current_price: f64, thirty_day_average: f64, trend: TrendLabel) -> Recommendation {
    if current_price <= 0.0 || thirty_day_average <= 0.0 {
        return Recommendation::NoData;
    }
    match trend {
        TrendLabel::Increasing if current_price > thirty_day_average => Recommendation::StrongSell,
        TrendLabel::Increasing => Recommendation::Hold,
        TrendLabel::Decreasing => Recommendation::SellBeforeDrop,
        TrendLabel::Stable => Recommendation::EvaluateNeeds,
    }
}

/// Average price per calendar month for the last six months, oldest first.
/// A month without records repeats the previous month's value.
pub fn monthly_chart(series: &[PriceRecord], now: DateTime<Utc>) -> MonthlyChart {
    let mut labels = Vec::with_capacity(CHART_MONTHS as usize);
    let mut data: Vec<f64> = Vec::with_capacity(CHART_MONTHS as usize);

    for back in (0..CHART_MONTHS).rev() {
        let month = now.checked_sub_months(Months::new(back)).unwrap_or(now);
        labels.push(month.format("%b").to_string());

        let prices: Vec<f64> = series
            .iter()
            .filter(|r| r.date.year() == month.year() && r.date.month() == month.month())
            .map(|r| r.price)
            .collect();

        let value = if prices.is_empty() {
            data.last().copied().unwrap_or(0.0)
        } else {
            mean(&prices).round()
        };
        data.push(value);
    }

    MonthlyChart { labels, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::price_analysis::compute_signals_at;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 9, 0, 0).unwrap()
    }

    fn on(month: u32, day: u32, price: f64) -> PriceRecord {
        PriceRecord::new(Utc.with_ymd_and_hms(2024, month, day, 8, 0, 0).unwrap(), price)
    }

    #[test]
    fn chart_covers_six_months_and_carries_gaps() {
        let series = vec![on(2, 10, 100.0), on(2, 20, 103.0), on(4, 5, 110.0), on(6, 1, 120.0)];
        let chart = monthly_chart(&series, now());
        assert_eq!(chart.labels, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert_eq!(chart.data, vec![0.0, 102.0, 102.0, 110.0, 110.0, 120.0]);
    }

    #[test]
    fn thirty_day_average_falls_back_to_current_price() {
        let series = vec![on(6, 1, 100.0), on(6, 15, 110.0), on(1, 15, 500.0)];
        assert_eq!(thirty_day_average(&series, 110.0, now()), 105.0);
        assert_eq!(thirty_day_average(&[on(1, 15, 500.0)], 80.0, now()), 80.0);
        assert_eq!(thirty_day_average(&[], 0.0, now()), 0.0);
    }

    #[test]
    fn recommendation_follows_trend_and_average() {
        assert_eq!(recommend(120.0, 110.0, TrendLabel::Increasing), Recommendation::StrongSell);
        assert_eq!(recommend(100.0, 110.0, TrendLabel::Increasing), Recommendation::Hold);
        assert_eq!(recommend(100.0, 110.0, TrendLabel::Decreasing), Recommendation::SellBeforeDrop);
        assert_eq!(recommend(100.0, 100.0, TrendLabel::Stable), Recommendation::EvaluateNeeds);
        assert_eq!(recommend(0.0, 100.0, TrendLabel::Increasing), Recommendation::NoData);
    }

    #[test]
    fn report_uses_latest_record_when_no_price_given() {
        let series = vec![on(1, 2, 2000.0), on(6, 18, 2200.0)];
        let signals = compute_signals_at(&series, now());
        let report = MarketReport::build("wheat", &series, &signals, None, now());

        assert_eq!(report.current_price, 2200.0);
        assert_eq!(report.trend, TrendLabel::Increasing);
        assert_eq!(report.recommendation, Recommendation::Hold);
        assert_eq!(report.suggested_price, suggest_price(2200.0, &signals));
        assert_eq!(report.thirty_day_average, 2200.0);
    }

    #[test]
    fn empty_history_gives_no_advice_even_with_a_price() {
        let signals = compute_signals_at(&[], now());
        let report = MarketReport::build("wheat", &[], &signals, Some(1800.0), now());

        assert_eq!(report.recommendation, Recommendation::NoData);
        assert_eq!(report.suggested_price, 0.0);
        assert_eq!(report.thirty_day_average, 0.0);
        assert_eq!(report.current_price, 1800.0);
        assert_eq!(report.chart.data, vec![0.0; 6]);
    }
}
