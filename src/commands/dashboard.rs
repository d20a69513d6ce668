use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{dashboard_presenter, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::presenter::DashboardPresenter;

pub struct DashboardCommand;

impl CommandHandler for DashboardCommand {
    fn command_name() -> &'static str {
        "dashboard"
    }

    fn description() -> &'static str {
        "show stats and the token table"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Dashboard command received from Telegram ID: {}", telegram_id);

        let presenter = dashboard_presenter(bot, msg.chat.id, &services, None);
        let table = presenter.show_dashboard().await?;

        if let Some(dialogue) = dialogue {
            dialogue.update(State::ViewingDashboard { table }).await?;
        }

        Ok(())
    }
}

pub struct TokensCommand;

impl CommandHandler for TokensCommand {
    fn command_name() -> &'static str {
        "tokens"
    }

    fn description() -> &'static str {
        "show the top tokens by market cap"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Tokens command received from Telegram ID: {}", telegram_id);

        // A fresh table always starts from the default sort
        let presenter = dashboard_presenter(bot, msg.chat.id, &services, None);
        let table = presenter.show_table(None).await?;

        if let Some(dialogue) = dialogue {
            dialogue.update(State::ViewingDashboard { table }).await?;
        }

        Ok(())
    }
}

pub struct StatsCommand;

impl CommandHandler for StatsCommand {
    fn command_name() -> &'static str {
        "stats"
    }

    fn description() -> &'static str {
        "show summary statistics"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Stats command received from Telegram ID: {}", telegram_id);

        let presenter = dashboard_presenter(bot, msg.chat.id, &services, None);
        presenter.show_stats().await
    }
}
