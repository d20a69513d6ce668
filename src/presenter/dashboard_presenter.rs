use crate::dashboard::RankedTableView;
use crate::entity::{DashboardError, SortField};
use crate::interactor::{StatsInteractor, TokenTableInteractor};
use crate::view::DashboardView;
use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

const TABLE_UNAVAILABLE: &str = "Token table is unavailable right now, try again later";
const TOKEN_UNAVAILABLE: &str = "Token details are unavailable right now, try again later";

#[async_trait]
pub trait DashboardPresenter: Send + Sync {
    /// Initial load: fetch table and stats concurrently and show both.
    async fn show_dashboard(&self) -> Result<RankedTableView>;

    /// Fetch and show the token table. A previous table keeps its sort and is
    /// shown again unchanged if the fetch fails.
    async fn show_table(&self, previous: Option<RankedTableView>) -> Result<RankedTableView>;

    async fn show_stats(&self) -> Result<()>;

    /// Re-sort the table in memory after a sort button press. Without rows
    /// (chat state lost or an earlier fetch failed) the top tokens are
    /// fetched first. Returns `None` when that fetch fails; the pressed
    /// message is left as is and an error notice is shown.
    async fn sort_table(
        &self,
        table: Option<RankedTableView>,
        field: SortField,
    ) -> Result<Option<RankedTableView>>;

    async fn show_token_detail(&self, token_address: &str) -> Result<()>;
}

pub struct DashboardPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    stats_interactor: Arc<dyn StatsInteractor + Send + Sync>,
}

impl<I, V> DashboardPresenterImpl<I, V>
where
    I: TokenTableInteractor,
    V: DashboardView,
{
    pub fn new(
        interactor: Arc<I>,
        view: Arc<V>,
        stats_interactor: Arc<dyn StatsInteractor + Send + Sync>,
    ) -> Self {
        Self {
            interactor,
            view,
            stats_interactor,
        }
    }

    // Returns the table to show and whether it holds fresh data
    async fn load_table(&self, previous: Option<RankedTableView>) -> (RankedTableView, bool) {
        match self.interactor.load_top_tokens().await {
            Ok(records) => {
                let table = match previous {
                    Some(mut table) => {
                        table.replace_records(records);
                        table
                    }
                    None => RankedTableView::new(records),
                };
                (table, true)
            }
            Err(e) => {
                error!("Failed to load token table: {}", e);
                (previous.unwrap_or_default(), false)
            }
        }
    }

    async fn display_loaded_table(&self, table: &RankedTableView, fresh: bool) -> Result<()> {
        if !fresh && table.is_empty() {
            return self
                .view
                .display_error(TABLE_UNAVAILABLE.to_string())
                .await;
        }

        self.view.display_table(table).await
    }
}

#[async_trait]
impl<I, V> DashboardPresenter for DashboardPresenterImpl<I, V>
where
    I: TokenTableInteractor + Send + Sync,
    V: DashboardView + Send + Sync,
{
    async fn show_dashboard(&self) -> Result<RankedTableView> {
        let ((table, fresh), snapshot) =
            tokio::join!(self.load_table(None), self.stats_interactor.refresh_stats());

        self.view.display_stats(&snapshot).await?;
        self.display_loaded_table(&table, fresh).await?;

        Ok(table)
    }

    async fn show_table(&self, previous: Option<RankedTableView>) -> Result<RankedTableView> {
        let (table, fresh) = self.load_table(previous).await;
        self.display_loaded_table(&table, fresh).await?;

        Ok(table)
    }

    async fn show_stats(&self) -> Result<()> {
        let snapshot = self.stats_interactor.refresh_stats().await;
        self.view.display_stats(&snapshot).await
    }

    async fn sort_table(
        &self,
        table: Option<RankedTableView>,
        field: SortField,
    ) -> Result<Option<RankedTableView>> {
        let mut table = match table {
            Some(table) if !table.is_empty() => table,
            _ => {
                let (table, fresh) = self.load_table(None).await;
                if !fresh {
                    self.view.display_error(TABLE_UNAVAILABLE.to_string()).await?;
                    return Ok(None);
                }
                table
            }
        };

        let sort = table.toggle_sort(field);
        info!("Token table sorted by {} {}", sort.field, sort.direction);

        self.view.display_table(&table).await?;

        Ok(Some(table))
    }

    async fn show_token_detail(&self, token_address: &str) -> Result<()> {
        match self.interactor.get_token(token_address).await {
            Ok(token) => {
                self.view.display_token_detail(&token).await?;
            }
            Err(e) => match e.downcast_ref::<DashboardError>() {
                Some(DashboardError::TokenNotFound(_)) => {
                    self.view.display_error(e.to_string()).await?;
                }
                _ => {
                    error!("Failed to load token {}: {}", token_address, e);
                    self.view.display_error(TOKEN_UNAVAILABLE.to_string()).await?;
                }
            },
        }

        Ok(())
    }
}
