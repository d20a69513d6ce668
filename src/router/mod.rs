use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*};

use crate::commands::{
    self, callback::handle_callback, help::help_text, BotCommands, CommandHandler, MyDialogue,
};
use crate::di::ServiceContainer;
use crate::entity::State;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |user| user.id.0 as i64)
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;

        let services_for_start = self.services.clone();
        let services_for_dashboard = self.services.clone();
        let services_for_tokens = self.services.clone();
        let services_for_stats = self.services.clone();
        let services_for_token = self.services.clone();
        let services_for_help = self.services.clone();
        let services_for_callbacks = self.services.clone();

        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(case![BotCommands::Start].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_start.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::start::StartCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![BotCommands::Dashboard].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_dashboard.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::dashboard::DashboardCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![BotCommands::Tokens].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_tokens.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::dashboard::TokensCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![BotCommands::Stats].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_stats.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::dashboard::StatsCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![BotCommands::Token(token_address)].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_token.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::token::TokenCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ))
            .branch(case![BotCommands::Help].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_help.clone();
                    let telegram_id = sender_id(&msg);
                    async move {
                        commands::help::HelpCommand::execute(
                            bot,
                            msg,
                            telegram_id,
                            Some(dialogue),
                            services,
                        )
                        .await
                    }
                },
            ));

        // Anything that is not a known command gets the command list
        let fallback_handler = dptree::endpoint(|bot: Bot, msg: Message| async move {
            bot.send_message(msg.chat.id, help_text()).await?;
            Ok::<(), anyhow::Error>(())
        });

        let message_handler = Update::filter_message()
            .branch(command_handler)
            .branch(fallback_handler);

        // Sort, refresh and navigation buttons
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
