use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard headline figures, always recomputed as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_tokens: i64,
    pub kings_of_hill: i64,
    pub raydium_migrated: i64,
    pub average_market_cap: f64,
}

/// Stats as last shown, with when they were computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub stats: SummaryStats,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub stale: bool, // the latest refresh failed
}
