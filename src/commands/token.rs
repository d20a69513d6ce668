use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{dashboard_presenter, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::presenter::DashboardPresenter;

pub struct TokenCommand;

impl CommandHandler for TokenCommand {
    fn command_name() -> &'static str {
        "token"
    }

    fn description() -> &'static str {
        "show details for a token address"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let command_parts: Vec<&str> = msg.text().unwrap_or("").split_whitespace().collect();
        let chat_id = msg.chat.id;

        if command_parts.len() >= 2 {
            let token_address = command_parts[1];

            info!("Token command received for address: {}", token_address);

            let presenter = dashboard_presenter(bot, chat_id, &services, None);
            presenter.show_token_detail(token_address).await
        } else {
            bot.send_message(
                chat_id,
                "Use the command in this format: /token <token_address>",
            )
            .await?;

            Ok(())
        }
    }
}
