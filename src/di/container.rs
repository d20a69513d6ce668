use std::sync::Arc;

use sqlx::PgPool;

use crate::config::DashboardConfig;
use crate::interactor::{StatsInteractor, StatsInteractorImpl, TokenTableInteractorImpl};
use crate::repository::{PgTokenRepository, TokenRepository};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    db_pool: Arc<PgPool>,

    // Data access
    token_repository: Arc<dyn TokenRepository + Send + Sync>,

    // Shared across chats so every chat sees the last good stats
    stats_interactor: Arc<dyn StatsInteractor + Send + Sync>,

    // Configuration
    config: DashboardConfig,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies
    pub fn new(db_pool: Arc<PgPool>, config: DashboardConfig) -> Self {
        let token_repository = Arc::new(PgTokenRepository::new(db_pool.clone()))
            as Arc<dyn TokenRepository + Send + Sync>;

        let stats_interactor = Arc::new(StatsInteractorImpl::new(token_repository.clone()))
            as Arc<dyn StatsInteractor + Send + Sync>;

        Self {
            db_pool,
            token_repository,
            stats_interactor,
            config,
        }
    }

    // Accessor methods

    pub fn db_pool(&self) -> Arc<PgPool> {
        self.db_pool.clone()
    }

    pub fn token_repository(&self) -> Arc<dyn TokenRepository + Send + Sync> {
        self.token_repository.clone()
    }

    pub fn stats_interactor(&self) -> Arc<dyn StatsInteractor + Send + Sync> {
        self.stats_interactor.clone()
    }

    pub fn token_table_interactor(&self) -> Arc<TokenTableInteractorImpl> {
        Arc::new(TokenTableInteractorImpl::new(
            self.token_repository(),
            self.config.table_limit,
        ))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}
