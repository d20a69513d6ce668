use anyhow::Result;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::MessageId,
};

use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::TokenTableInteractorImpl;
use crate::presenter::DashboardPresenterImpl;
use crate::view::TelegramDashboardView;
use teloxide::dispatching::dialogue::Dialogue;

pub mod callback;
pub mod dashboard;
pub mod help;
pub mod start;
pub mod token;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

pub type TelegramDashboardPresenter =
    DashboardPresenterImpl<TokenTableInteractorImpl, TelegramDashboardView>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Build the dashboard presenter for a chat. With `message_id` the table is
/// edited in place rather than sent as a new message.
pub fn dashboard_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
    message_id: Option<MessageId>,
) -> TelegramDashboardPresenter {
    let date_format = services.config().date_format.clone();
    let view = match message_id {
        Some(message_id) => TelegramDashboardView::editing(bot, chat_id, date_format, message_id),
        None => TelegramDashboardView::new(bot, chat_id, date_format),
    };

    DashboardPresenterImpl::new(
        services.token_table_interactor(),
        Arc::new(view),
        services.stats_interactor(),
    )
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            dashboard::DashboardCommand::command_name(),
            dashboard::DashboardCommand::description(),
        ),
        (
            dashboard::TokensCommand::command_name(),
            dashboard::TokensCommand::description(),
        ),
        (
            dashboard::StatsCommand::command_name(),
            dashboard::StatsCommand::description(),
        ),
        (
            token::TokenCommand::command_name(),
            token::TokenCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show the dashboard")]
    Start,
    #[command(description = "show stats and the token table")]
    Dashboard,
    #[command(description = "show the top tokens by market cap")]
    Tokens,
    #[command(description = "show summary statistics")]
    Stats,
    #[command(description = "show details for a token address")]
    Token(String),
    #[command(description = "display this help message")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands as _;

    #[test]
    fn test_menu_and_help_descriptions_match() {
        let menu = BotCommands::bot_commands();

        for (name, description) in register_commands() {
            let entry = menu
                .iter()
                .find(|command| command.command.trim_start_matches('/') == name)
                .unwrap_or_else(|| panic!("/{} missing from the command menu", name));
            assert_eq!(entry.description, description, "/{}", name);
        }
        assert_eq!(menu.len(), register_commands().len());
    }
}
