use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::{dashboard_presenter, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::presenter::DashboardPresenter;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot and show the dashboard"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("Start command received from Telegram ID: {}", telegram_id);

        bot.send_message(
            chat_id,
            "<b>Welcome to the Token Dashboard!</b>\n\n\
            Tap a column below the table to sort it, tap it again to flip the order.",
        )
        .parse_mode(ParseMode::Html)
        .await?;

        let presenter = dashboard_presenter(bot, chat_id, &services, None);
        let table = presenter.show_dashboard().await?;

        if let Some(dialogue) = dialogue {
            dialogue.update(State::ViewingDashboard { table }).await?;
        }

        Ok(())
    }
}
