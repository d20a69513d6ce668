//! Token Dashboard Bot for Telegram - Main executable
//!
//! Read-only dashboard over the `tokens` table: a sortable table of the top
//! tokens by market cap and summary statistics about the tracked set.
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use teloxide::{dptree, prelude::*, utils::command::BotCommands as _, Bot};
use token_dashboard_bot::{commands::BotCommands, DashboardConfig, Router};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Token Dashboard Telegram Bot v{}",
        token_dashboard_bot::VERSION
    );

    let config = DashboardConfig::load()
        .context("DATABASE_URL and TELEGRAM_BOT_TOKEN must be set in environment variables")?;

    // Create Telegram bot instance
    let bot = Bot::new(config.telegram_bot_token.clone());

    // Setup database connection pool
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to create database connection pool")?;
    let db_pool = Arc::new(db_pool);

    info!("Initializing bot application...");
    let (router, bot, service_container, storage) =
        token_dashboard_bot::create_application(bot, db_pool, config);

    // The schema is owned elsewhere, only check that it can be read
    match service_container.token_repository().count_all().await {
        Ok(count) => info!(
            "Database connection established, {} tokens tracked",
            count.unwrap_or(0)
        ),
        Err(e) => error!("Database connectivity check failed: {}", e),
    }

    if let Err(e) = bot.set_my_commands(BotCommands::bot_commands()).await {
        error!("Failed to register bot commands: {}", e);
    }

    // Get the handler from the router
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service_container.clone(), storage])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    info!("Closing database connections...");
    service_container.db_pool().close().await;

    Ok(())
}
