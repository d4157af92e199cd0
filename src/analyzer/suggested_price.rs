use crate::model::VolatilityLabel;
use crate::utils::round2;

/// Inputs for a listing price suggestion.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionInput {
    pub current_price: f64,
    pub trend_percentage: f64,
    pub volatility: VolatilityLabel,
    pub confidence: u8,
}

const RISING_MARKUP: f64 = 1.02;
const FALLING_MARKDOWN: f64 = 0.985;
const VOLATILITY_DISCOUNT: f64 = 0.99;
const LOW_CONFIDENCE_DISCOUNT: f64 = 0.995;
const LOW_CONFIDENCE_BELOW: u8 = 70;

/// Recommended listing price rounded to cents, or 0 when the current price is not positive.
///
/// Adjustments are multiplicative and applied in a fixed order:
/// trend, then volatility, then confidence.
pub fn generate_suggested_price(input: SuggestionInput) -> f64 {
    if input.current_price.is_nan() || input.current_price <= 0.0 {
        return 0.0;
    }

    let mut suggested = input.current_price;

    if input.trend_percentage > 1.0 {
        suggested *= RISING_MARKUP;
    } else if input.trend_percentage < -1.0 {
        suggested *= FALLING_MARKDOWN;
    }

    if input.volatility == VolatilityLabel::HighVolatility {
        suggested *= VOLATILITY_DISCOUNT;
    }

    if input.confidence < LOW_CONFIDENCE_BELOW {
        suggested *= LOW_CONFIDENCE_DISCOUNT;
    }

    round2(suggested)
}
