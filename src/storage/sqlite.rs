use crate::model::{HistoryError, PriceRecord};
use crate::normalizer::normalize_crop_name;
use crate::storage::traits::PriceHistoryProvider;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::debug;

/// A stored observation, with the descriptive columns the analyzers ignore.
#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub crop_name: String,
    pub market_name: Option<String>,
    pub price: f64,
    pub date: DateTime<Utc>,
    pub quality: Option<String>,
    pub region: Option<String>,
}

pub struct SqliteHistory {
    conn: Mutex<Connection>,
}

impl SqliteHistory {
    /// Opens the database and creates the schema if needed.
    pub fn new(db_path: &str) -> Result<Self, HistoryError> {
        let conn = Connection::open(db_path)?;
        Self::migrate(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn migrate(conn: &Connection) -> Result<(), HistoryError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS price_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                crop_name TEXT NOT NULL,
                market_name TEXT,
                price REAL NOT NULL,
                date TEXT NOT NULL,
                quality TEXT,
                region TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_price_history_crop_date
                ON price_history (crop_name, date);
            ",
        )?;
        Ok(())
    }

    /// Inserts one observation. Crop and region are stored normalized.
    pub async fn insert_record(&self, row: &HistoryRow) -> Result<(), HistoryError> {
        let crop = normalize_crop_name(&row.crop_name).unwrap_or_default();
        let region = row.region.as_deref().and_then(normalize_crop_name);
        self.conn.lock().await.execute(
            "INSERT INTO price_history (crop_name, market_name, price, date, quality, region)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &crop,
                &row.market_name,
                &row.price,
                &row.date,
                &row.quality,
                &region,
            ],
        )?;
        Ok(())
    }

    /// Number of stored rows for a crop, across all regions.
    pub async fn count_for_crop(&self, crop: &str) -> Result<usize, HistoryError> {
        let crop = normalize_crop_name(crop).unwrap_or_default();
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM price_history WHERE crop_name = ?1",
            params![crop],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn map_record(row: &Row) -> rusqlite::Result<PriceRecord> {
        Ok(PriceRecord::new(row.get(0)?, row.get(1)?))
    }
}

#[async_trait::async_trait]
impl PriceHistoryProvider for SqliteHistory {
    async fn fetch_history(
        &self,
        crop: &str,
        region: Option<&str>,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceRecord>, HistoryError> {
        let crop = normalize_crop_name(crop).unwrap_or_default();
        let conn = self.conn.lock().await;

        let records: Vec<PriceRecord> = match region.and_then(normalize_crop_name) {
            Some(region) => {
                let mut stmt = conn.prepare(
                    "SELECT date, price FROM price_history
                     WHERE crop_name = ?1 AND date >= ?2 AND region = ?3
                     ORDER BY date ASC",
                )?;
                let rows = stmt.query_map(params![crop, since, region], Self::map_record)?;
                rows.collect::<Result<_, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT date, price FROM price_history
                     WHERE crop_name = ?1 AND date >= ?2
                     ORDER BY date ASC",
                )?;
                let rows = stmt.query_map(params![crop, since], Self::map_record)?;
                rows.collect::<Result<_, _>>()?
            }
        };

        debug!("Loaded {} price records for {}", records.len(), crop);
        Ok(records)
    }
}
