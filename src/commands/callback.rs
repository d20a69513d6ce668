use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{dashboard_presenter, MyDialogue};
use crate::dashboard::RankedTableView;
use crate::di::ServiceContainer;
use crate::entity::{SortField, State};
use crate::presenter::DashboardPresenter;

/// What a dashboard button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Sort(SortField),
    RefreshTable,
    RefreshStats,
    ShowTokens,
}

impl DashboardAction {
    pub fn parse(callback_data: &str) -> Option<Self> {
        if let Some(field) = callback_data.strip_prefix("sort_") {
            return Some(DashboardAction::Sort(SortField::parse_or_default(field)));
        }

        match callback_data {
            "dashboard_refresh" => Some(DashboardAction::RefreshTable),
            "stats_refresh" => Some(DashboardAction::RefreshStats),
            "tokens" => Some(DashboardAction::ShowTokens),
            _ => None,
        }
    }
}

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    // Extract the callback data
    let callback_data = match q.data.clone() {
        Some(data) => data,
        None => return Ok(()),
    };

    let Some(message) = q.regular_message() else {
        return Ok(());
    };
    let chat_id = message.chat.id;
    let message_id = message.id;

    info!(
        "Received callback: {} from user {}",
        callback_data, q.from.id.0
    );

    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    let Some(action) = DashboardAction::parse(&callback_data) else {
        warn!("Unknown callback data: {}", callback_data);
        return Ok(());
    };

    let current_table: Option<RankedTableView> = dialogue
        .get()
        .await?
        .and_then(|state| state.table().cloned());

    let table = match action {
        DashboardAction::Sort(field) => {
            let presenter = dashboard_presenter(bot, chat_id, &services, Some(message_id));
            presenter.sort_table(current_table, field).await?
        }
        DashboardAction::RefreshTable => {
            let presenter = dashboard_presenter(bot, chat_id, &services, None);
            Some(presenter.show_table(current_table).await?)
        }
        DashboardAction::ShowTokens => {
            let presenter = dashboard_presenter(bot, chat_id, &services, None);
            Some(presenter.show_table(None).await?)
        }
        DashboardAction::RefreshStats => {
            let presenter = dashboard_presenter(bot, chat_id, &services, None);
            presenter.show_stats().await?;
            None
        }
    };

    // An empty table is never kept, so the next sort press fetches again
    if let Some(table) = table.filter(|table| !table.is_empty()) {
        dialogue.update(State::ViewingDashboard { table }).await?;
    }

    Ok(())
}
