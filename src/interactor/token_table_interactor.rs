use crate::entity::{DashboardError, TokenRecord};
use crate::repository::TokenRepository;
use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

#[async_trait]
pub trait TokenTableInteractor: Send + Sync {
    async fn load_top_tokens(&self) -> Result<Vec<TokenRecord>>;
    async fn get_token(&self, token_address: &str) -> Result<TokenRecord>;
}

pub struct TokenTableInteractorImpl {
    repository: Arc<dyn TokenRepository + Send + Sync>,
    table_limit: i64,
}

impl TokenTableInteractorImpl {
    pub fn new(repository: Arc<dyn TokenRepository + Send + Sync>, table_limit: i64) -> Self {
        Self {
            repository,
            table_limit,
        }
    }
}

#[async_trait]
impl TokenTableInteractor for TokenTableInteractorImpl {
    async fn load_top_tokens(&self) -> Result<Vec<TokenRecord>> {
        let tokens = self
            .repository
            .list_top_by_market_cap(self.table_limit)
            .await?;

        info!("Loaded {} tokens for the dashboard table", tokens.len());

        Ok(tokens)
    }

    async fn get_token(&self, token_address: &str) -> Result<TokenRecord> {
        let token_address = token_address.trim();

        self.repository
            .get_token_by_address(token_address)
            .await?
            .ok_or_else(|| DashboardError::TokenNotFound(token_address.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::FakeTokenRepository;

    fn token(address: &str, market_cap: Option<f64>) -> TokenRecord {
        TokenRecord {
            token_address: address.to_string(),
            market_cap,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_top_tokens_respects_limit() {
        let tokens = (0..60)
            .map(|i| token(&format!("addr{}", i), Some(i as f64)))
            .collect();
        let interactor =
            TokenTableInteractorImpl::new(Arc::new(FakeTokenRepository::new(tokens)), 100);

        let loaded = interactor.load_top_tokens().await.unwrap();

        assert_eq!(loaded.len(), 50);
        assert_eq!(loaded[0].market_cap, Some(59.0));
    }

    #[tokio::test]
    async fn test_get_token_not_found() {
        let interactor = TokenTableInteractorImpl::new(
            Arc::new(FakeTokenRepository::new(vec![token("known", None)])),
            50,
        );

        assert_eq!(
            interactor.get_token(" known ").await.unwrap().token_address,
            "known"
        );

        let err = interactor.get_token("missing").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::TokenNotFound(_))
        ));
    }
}
