use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::entity::DashboardError;
use crate::utils::DEFAULT_DATE_FORMAT;

/// The dashboard never shows more than this many tokens
pub const TABLE_ROW_LIMIT: i64 = 50;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Postgres connection string for the tokens database
    pub database_url: String,

    /// Telegram bot API token
    pub telegram_bot_token: String,

    /// Rows fetched for the token table, 1 to 50
    #[serde(default = "default_table_limit")]
    pub table_limit: i64,

    /// Size of the database connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// strftime pattern used for every timestamp shown
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_table_limit() -> i64 {
    TABLE_ROW_LIMIT
}

fn default_max_connections() -> u32 {
    5
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl DashboardConfig {
    /// Load from an optional `dashboard.toml` and the environment (`DATABASE_URL`,
    /// `TELEGRAM_BOT_TOKEN`, `TABLE_LIMIT`, `MAX_CONNECTIONS`, `DATE_FORMAT`).
    pub fn load() -> Result<Self, DashboardError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("dashboard").required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: config::Config) -> Result<Self, DashboardError> {
        let config: Self = settings.try_deserialize()?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self, DashboardError> {
        if self.database_url.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "database_url must not be empty".to_string(),
            ));
        }

        if self.telegram_bot_token.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "telegram_bot_token must not be empty".to_string(),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(DashboardError::InvalidConfig(format!(
                "invalid date_format: {}",
                self.date_format
            )));
        }

        self.table_limit = self.table_limit.clamp(1, TABLE_ROW_LIMIT);
        self.max_connections = self.max_connections.max(1);

        Ok(self)
    }
}
