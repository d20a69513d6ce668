use super::TokenRepository;
use crate::entity::{DashboardError, TokenRecord};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory repository for tests; each read path can be told to fail.
#[derive(Default)]
pub struct FakeTokenRepository {
    pub tokens: Vec<TokenRecord>,
    pub fail_stats: AtomicBool,
    pub fail_table: AtomicBool,
    pub fail_lookup: AtomicBool,
    pub table_calls: AtomicUsize,
}

impl FakeTokenRepository {
    pub fn new(tokens: Vec<TokenRecord>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }

    pub fn set_stats_failing(&self, failing: bool) {
        self.fail_stats.store(failing, Ordering::SeqCst);
    }

    pub fn set_table_failing(&self, failing: bool) {
        self.fail_table.store(failing, Ordering::SeqCst);
    }

    pub fn set_lookup_failing(&self, failing: bool) {
        self.fail_lookup.store(failing, Ordering::SeqCst);
    }

    fn stats_result(&self) -> Result<(), DashboardError> {
        if self.fail_stats.load(Ordering::SeqCst) {
            Err(DashboardError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }

    fn count_where(&self, predicate: impl Fn(&TokenRecord) -> bool) -> Option<i64> {
        Some(self.tokens.iter().filter(|t| predicate(t)).count() as i64)
    }
}

#[async_trait]
impl TokenRepository for FakeTokenRepository {
    async fn list_top_by_market_cap(&self, limit: i64) -> Result<Vec<TokenRecord>, DashboardError> {
        self.table_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_table.load(Ordering::SeqCst) {
            return Err(DashboardError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut tokens = self.tokens.clone();
        tokens.sort_by(|a, b| match (a.market_cap, b.market_cap) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        tokens.truncate(super::token_repository::clamp_limit(limit) as usize);
        Ok(tokens)
    }

    async fn count_all(&self) -> Result<Option<i64>, DashboardError> {
        self.stats_result()?;
        Ok(self.count_where(|_| true))
    }

    async fn count_king_of_hill(&self) -> Result<Option<i64>, DashboardError> {
        self.stats_result()?;
        Ok(self.count_where(|t| t.is_king_of_hill))
    }

    async fn count_raydium_migrated(&self) -> Result<Option<i64>, DashboardError> {
        self.stats_result()?;
        Ok(self.count_where(|t| t.raydium_migrated))
    }

    async fn list_market_caps(&self) -> Result<Vec<Option<f64>>, DashboardError> {
        self.stats_result()?;
        Ok(self.tokens.iter().map(|t| t.market_cap).collect())
    }

    async fn get_token_by_address(
        &self,
        token_address: &str,
    ) -> Result<Option<TokenRecord>, DashboardError> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(DashboardError::Database(sqlx::Error::PoolTimedOut));
        }

        Ok(self
            .tokens
            .iter()
            .find(|t| t.token_address == token_address)
            .cloned())
    }
}
