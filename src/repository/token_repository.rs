use crate::config::TABLE_ROW_LIMIT;
use crate::entity::{DashboardError, TokenRecord};
use crate::interactor::db;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Read access to the `tokens` table
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Top tokens by market cap, largest first. `limit` is clamped to the table size.
    async fn list_top_by_market_cap(&self, limit: i64) -> Result<Vec<TokenRecord>, DashboardError>;

    async fn count_all(&self) -> Result<Option<i64>, DashboardError>;

    async fn count_king_of_hill(&self) -> Result<Option<i64>, DashboardError>;

    async fn count_raydium_migrated(&self) -> Result<Option<i64>, DashboardError>;

    /// Market cap of every token, missing values included
    async fn list_market_caps(&self) -> Result<Vec<Option<f64>>, DashboardError>;

    async fn get_token_by_address(
        &self,
        token_address: &str,
    ) -> Result<Option<TokenRecord>, DashboardError>;
}

/// Postgres-backed repository
pub struct PgTokenRepository {
    db_pool: Arc<PgPool>,
}

impl PgTokenRepository {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, TABLE_ROW_LIMIT)
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn list_top_by_market_cap(&self, limit: i64) -> Result<Vec<TokenRecord>, DashboardError> {
        let tokens = db::get_top_tokens_by_market_cap(&self.db_pool, clamp_limit(limit)).await?;
        Ok(tokens)
    }

    async fn count_all(&self) -> Result<Option<i64>, DashboardError> {
        Ok(db::count_tokens(&self.db_pool).await?)
    }

    async fn count_king_of_hill(&self) -> Result<Option<i64>, DashboardError> {
        Ok(db::count_king_of_hill_tokens(&self.db_pool).await?)
    }

    async fn count_raydium_migrated(&self) -> Result<Option<i64>, DashboardError> {
        Ok(db::count_raydium_migrated_tokens(&self.db_pool).await?)
    }

    async fn list_market_caps(&self) -> Result<Vec<Option<f64>>, DashboardError> {
        Ok(db::get_all_market_caps(&self.db_pool).await?)
    }

    async fn get_token_by_address(
        &self,
        token_address: &str,
    ) -> Result<Option<TokenRecord>, DashboardError> {
        Ok(db::get_token_by_address(&self.db_pool, token_address).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(500), TABLE_ROW_LIMIT);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-3), 1);
        assert_eq!(clamp_limit(10), 10);
    }
}
