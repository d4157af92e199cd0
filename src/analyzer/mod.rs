// Analyzer module: aggregates submodules for the individual price signals.

pub mod trend;
pub mod volatility;
pub mod confidence;
pub mod momentum;
pub mod suggested_price;
pub mod price_analysis;
pub mod market_report;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{compute_signals, compute_signals_at, suggest_price, Analyzer, PriceAnalyzer};
