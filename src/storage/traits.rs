use crate::model::{HistoryError, PriceRecord};
use chrono::{DateTime, Utc};

/// Source of historical prices for a crop.
#[async_trait::async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Records for `crop` dated at or after `since`, optionally restricted to one region.
    async fn fetch_history(
        &self,
        crop: &str,
        region: Option<&str>,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>, HistoryError>;
}
