use crate::model::{PriceRecord, VolatilityLabel};

pub const MIN_CONFIDENCE: i32 = 60;
pub const MAX_CONFIDENCE: i32 = 100;
const BASE_CONFIDENCE: i32 = 90;
/// Six monthly observations count as a complete history.
const EXPECTED_RECORDS: usize = 6;
const MISSING_RECORD_PENALTY: i32 = 5;
const VOLATILITY_PENALTY: i32 = 15;

/// Heuristic trust score in `[60, 100]`.
pub fn calculate_confidence(series: &[PriceRecord], volatility: VolatilityLabel) -> u8 {
    if series.is_empty() {
        return MIN_CONFIDENCE as u8;
    }

    let mut confidence = BASE_CONFIDENCE;

    if series.len() < EXPECTED_RECORDS {
        confidence -= (EXPECTED_RECORDS - series.len()) as i32 * MISSING_RECORD_PENALTY;
    }

    if volatility == VolatilityLabel::HighVolatility {
        confidence -= VOLATILITY_PENALTY;
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
}
