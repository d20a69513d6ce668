use super::{register_commands, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        bot.send_message(msg.chat.id, help_text()).await?;

        Ok(())
    }
}

pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n");
    for (name, description) in register_commands() {
        text.push_str(&format!("/{} - {}\n", name, description));
    }
    text.push_str("\nUse the buttons under the token table to sort it.");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let text = help_text();
        for command in ["/start", "/dashboard", "/tokens", "/stats", "/token", "/help"] {
            assert!(text.contains(command), "missing {}", command);
        }
    }
}
