use serde::Deserialize;
use std::fs;

fn default_cache_timeout_ms() -> u64 {
    500
}

fn default_history_months() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize)]
pub struct CropConfig {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Asking price to base the suggestion on; the latest recorded price otherwise.
    #[serde(default)]
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_path: String,
    /// Without a Redis URL the cache lives in process memory.
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default = "default_cache_timeout_ms")]
    pub cache_timeout_ms: u64,
    #[serde(default = "default_history_months")]
    pub history_months: u32,
    /// 0 runs a single pass.
    #[serde(default)]
    pub check_interval_seconds: u64,
    pub crops: Vec<CropConfig>,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let cfg = parse_config(
            r#"{ "database_path": "prices.db", "crops": [{ "name": "Wheat" }] }"#,
        )
        .unwrap();
        assert_eq!(cfg.cache_timeout_ms, 500);
        assert_eq!(cfg.history_months, 6);
        assert_eq!(cfg.check_interval_seconds, 0);
        assert!(cfg.redis_url.is_none());
        assert_eq!(cfg.crops[0].name, "Wheat");
        assert!(cfg.crops[0].region.is_none());
    }

    #[test]
    fn full_config_parses() {
        let cfg = parse_config(
            r#"{
                "database_path": "prices.db",
                "redis_url": "redis://127.0.0.1:6379/",
                "cache_timeout_ms": 250,
                "history_months": 3,
                "check_interval_seconds": 600,
                "crops": [{ "name": "onion", "region": "Nashik", "current_price": 1800.0 }]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.redis_url.as_deref(), Some("redis://127.0.0.1:6379/"));
        assert_eq!(cfg.crops[0].current_price, Some(1800.0));
        assert_eq!(cfg.crops[0].region.as_deref(), Some("Nashik"));
    }

    #[test]
    fn missing_crops_is_an_error() {
        assert!(parse_config(r#"{ "database_path": "prices.db" }"#).is_err());
    }
}
