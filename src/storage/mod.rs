pub mod sqlite;
pub mod traits;

pub use sqlite::{HistoryRow, SqliteHistory};
pub use traits::PriceHistoryProvider;
