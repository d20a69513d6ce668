use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `tokens` table. Every numeric and timestamp column may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TokenRecord {
    pub id: i64,
    pub token_address: String,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub creator_address: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub holders_count: Option<i64>,
    pub bonding_curve_progress: Option<f64>, // 0-100
    pub is_king_of_hill: bool,
    pub king_of_hill_time: Option<DateTime<Utc>>,
    pub raydium_migrated: bool,
    pub raydium_migration_time: Option<DateTime<Utc>>,
    pub highest_market_cap: Option<f64>,
    pub highest_market_cap_time: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TokenRecord {
    // Name for display, falls back to "Unknown"
    pub fn display_name(&self) -> &str {
        match self.token_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Unknown",
        }
    }

    // Symbol for display, falls back to "N/A"
    pub fn display_symbol(&self) -> &str {
        match self.token_symbol.as_deref() {
            Some(symbol) if !symbol.is_empty() => symbol,
            _ => "N/A",
        }
    }
}
