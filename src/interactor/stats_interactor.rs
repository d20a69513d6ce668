use crate::dashboard::{AggregateInputs, StatsAggregator};
use crate::entity::{DashboardError, StatsSnapshot};
use crate::repository::TokenRepository;
use async_trait::async_trait;
use chrono::Utc;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait StatsInteractor: Send + Sync {
    /// Recompute the stats. Never fails: on a fetch error the last good
    /// snapshot is returned, marked stale.
    async fn refresh_stats(&self) -> StatsSnapshot;

    /// Last computed snapshot without touching the store
    async fn current_stats(&self) -> StatsSnapshot;
}

pub struct StatsInteractorImpl {
    repository: Arc<dyn TokenRepository + Send + Sync>,
    last_snapshot: RwLock<StatsSnapshot>,
}

impl StatsInteractorImpl {
    pub fn new(repository: Arc<dyn TokenRepository + Send + Sync>) -> Self {
        Self {
            repository,
            last_snapshot: RwLock::new(StatsSnapshot::default()),
        }
    }

    // Keep whichever snapshot was fetched last; a slow refresh that started
    // earlier must not replace newer stats. Returns the snapshot now held.
    async fn store_if_newer(&self, snapshot: StatsSnapshot) -> StatsSnapshot {
        let mut last = self.last_snapshot.write().await;
        if snapshot.refreshed_at >= last.refreshed_at {
            *last = snapshot;
        }
        *last
    }

    async fn fetch_inputs(&self) -> Result<AggregateInputs, DashboardError> {
        let (total_tokens, kings_of_hill, raydium_migrated, market_caps) = tokio::try_join!(
            self.repository.count_all(),
            self.repository.count_king_of_hill(),
            self.repository.count_raydium_migrated(),
            self.repository.list_market_caps(),
        )?;

        Ok(AggregateInputs {
            total_tokens,
            kings_of_hill,
            raydium_migrated,
            market_caps,
        })
    }
}

#[async_trait]
impl StatsInteractor for StatsInteractorImpl {
    async fn refresh_stats(&self) -> StatsSnapshot {
        let started_at = Utc::now();

        match self.fetch_inputs().await {
            Ok(inputs) => {
                let snapshot = StatsSnapshot {
                    stats: StatsAggregator::aggregate(&inputs),
                    refreshed_at: Some(started_at),
                    stale: false,
                };

                info!(
                    "Dashboard stats refreshed: {} tokens, {} kings, {} migrated",
                    snapshot.stats.total_tokens,
                    snapshot.stats.kings_of_hill,
                    snapshot.stats.raydium_migrated
                );

                self.store_if_newer(snapshot).await
            }
            Err(e) => {
                error!("Failed to refresh dashboard stats: {}", e);

                let mut snapshot = *self.last_snapshot.read().await;
                if snapshot.refreshed_at.is_none() {
                    warn!("No dashboard stats computed yet, showing defaults");
                }
                snapshot.stale = true;
                snapshot
            }
        }
    }

    async fn current_stats(&self) -> StatsSnapshot {
        *self.last_snapshot.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{SummaryStats, TokenRecord};
    use crate::repository::fake::FakeTokenRepository;

    fn token(market_cap: Option<f64>, king: bool, migrated: bool) -> TokenRecord {
        TokenRecord {
            market_cap,
            is_king_of_hill: king,
            raydium_migrated: migrated,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_computes_stats() {
        let repository = Arc::new(FakeTokenRepository::new(vec![
            token(Some(1_000_000.0), true, false),
            token(Some(500_000.0), false, true),
            token(None, false, true),
        ]));
        let interactor = StatsInteractorImpl::new(repository);

        let snapshot = interactor.refresh_stats().await;

        assert!(!snapshot.stale);
        assert!(snapshot.refreshed_at.is_some());
        assert_eq!(
            snapshot.stats,
            SummaryStats {
                total_tokens: 3,
                kings_of_hill: 1,
                raydium_migrated: 2,
                average_market_cap: 750_000.0,
            }
        );
        assert_eq!(interactor.current_stats().await, snapshot);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_stats() {
        let repository = Arc::new(FakeTokenRepository::new(vec![
            token(Some(100.0), false, false),
            token(Some(300.0), true, false),
        ]));
        let interactor = StatsInteractorImpl::new(repository.clone());

        let good = interactor.refresh_stats().await;

        repository.set_stats_failing(true);
        let after_failure = interactor.refresh_stats().await;

        assert!(after_failure.stale);
        assert_eq!(after_failure.stats, good.stats);
        assert_eq!(after_failure.refreshed_at, good.refreshed_at);
        assert_eq!(interactor.current_stats().await, good);

        repository.set_stats_failing(false);
        assert!(!interactor.refresh_stats().await.stale);
    }

    #[tokio::test]
    async fn test_failure_before_first_refresh_shows_defaults() {
        let repository = Arc::new(FakeTokenRepository::new(vec![token(Some(1.0), false, false)]));
        repository.set_stats_failing(true);
        let interactor = StatsInteractorImpl::new(repository);

        let snapshot = interactor.refresh_stats().await;

        assert!(snapshot.stale);
        assert_eq!(snapshot.stats, SummaryStats::default());
        assert_eq!(snapshot.refreshed_at, None);
    }

    #[tokio::test]
    async fn test_older_refresh_does_not_overwrite_newer() {
        let interactor = StatsInteractorImpl::new(Arc::new(FakeTokenRepository::default()));
        let now = Utc::now();

        let newer = StatsSnapshot {
            stats: SummaryStats {
                total_tokens: 10,
                ..Default::default()
            },
            refreshed_at: Some(now),
            stale: false,
        };
        let older = StatsSnapshot {
            stats: SummaryStats {
                total_tokens: 7,
                ..Default::default()
            },
            refreshed_at: Some(now - chrono::Duration::seconds(5)),
            stale: false,
        };

        assert_eq!(interactor.store_if_newer(newer).await, newer);
        assert_eq!(interactor.store_if_newer(older).await, newer);
        assert_eq!(interactor.current_stats().await.stats.total_tokens, 10);
    }
}
