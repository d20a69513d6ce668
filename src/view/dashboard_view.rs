use crate::dashboard::RankedTableView;
use crate::entity::{SortField, SortState, StatsSnapshot, TokenRecord};
use crate::utils::{format_currency, format_date, format_percentage, CurrencyPrecision};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
    utils::html,
    Bot,
};

// Telegram rejects longer messages
const MAX_MESSAGE_LEN: usize = 4096;
const NAME_COLUMN_WIDTH: usize = 16;

#[async_trait]
pub trait DashboardView: Send + Sync {
    async fn display_table(&self, table: &RankedTableView) -> Result<()>;
    async fn display_stats(&self, snapshot: &StatsSnapshot) -> Result<()>;
    async fn display_token_detail(&self, token: &TokenRecord) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramDashboardView {
    bot: Bot,
    chat_id: ChatId,
    date_format: String,
    // Message to edit in place instead of sending a new one
    table_message_id: Option<MessageId>,
}

impl TelegramDashboardView {
    pub fn new(bot: Bot, chat_id: ChatId, date_format: String) -> Self {
        Self {
            bot,
            chat_id,
            date_format,
            table_message_id: None,
        }
    }

    pub fn editing(bot: Bot, chat_id: ChatId, date_format: String, message_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            date_format,
            table_message_id: Some(message_id),
        }
    }
}

#[async_trait]
impl DashboardView for TelegramDashboardView {
    async fn display_table(&self, table: &RankedTableView) -> Result<()> {
        let text = render_table(table, &self.date_format);
        let keyboard = sort_keyboard(table.sort_state());

        if let Some(message_id) = self.table_message_id {
            self.bot
                .edit_message_text(self.chat_id, message_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }

        Ok(())
    }

    async fn display_stats(&self, snapshot: &StatsSnapshot) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("🔄 Refresh", "stats_refresh"),
            InlineKeyboardButton::callback("📋 Tokens", "tokens"),
        ]]);

        self.bot
            .send_message(self.chat_id, render_stats(snapshot, &self.date_format))
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_token_detail(&self, token: &TokenRecord) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "← Back to Tokens",
            "tokens",
        )]]);

        self.bot
            .send_message(self.chat_id, render_token_detail(token, &self.date_format))
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard)
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("❌ {}", error_message))
            .await?;

        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn flags(king: bool, migrated: bool) -> &'static str {
    match (king, migrated) {
        (true, true) => " 👑🚀",
        (true, false) => " 👑",
        (false, true) => " 🚀",
        (false, false) => "",
    }
}

/// Token table as an HTML message, cut short to fit one Telegram message
pub fn render_table(table: &RankedTableView, date_format: &str) -> String {
    let sort = table.sort_state();
    let title = format!(
        "<b>🏆 Top Tokens</b> · sorted by {} {}\n",
        sort.field.label(),
        sort.direction.arrow()
    );

    if table.is_empty() {
        return format!("{}\nNo tokens found.", title);
    }

    let header = format!(
        "{:>2} {:<width$} {:>11} {:>14} {:>14} {:>7}\n",
        "#",
        "Token",
        "Price",
        "Market Cap",
        "Volume 24h",
        "Curve",
        width = NAME_COLUMN_WIDTH
    );

    let rows = table.rows(date_format);
    let total = rows.len();
    // Room for the closing tag and the "more" line
    let budget = MAX_MESSAGE_LEN - 64;

    let mut body = String::new();
    body.push_str(&title);
    body.push_str("<pre>");
    body.push_str(&html::escape(&header));

    let mut shown = 0;
    for row in &rows {
        let label = truncate(&format!("{} {}", row.symbol, row.name), NAME_COLUMN_WIDTH);
        let line = format!(
            "{:>2} {:<width$} {:>11} {:>14} {:>14} {:>6}%{}\n",
            row.rank,
            label,
            row.price,
            row.market_cap,
            row.volume_24h,
            row.bonding_curve_progress,
            flags(row.is_king_of_hill, row.raydium_migrated),
            width = NAME_COLUMN_WIDTH
        );
        let line = html::escape(&line);

        if body.chars().count() + line.chars().count() > budget {
            break;
        }
        body.push_str(&line);
        shown += 1;
    }

    body.push_str("</pre>");
    if shown < total {
        body.push_str(&format!("\n… and {} more", total - shown));
    }

    body
}

/// Sort buttons, the active field carries its direction arrow
pub fn sort_keyboard(sort: SortState) -> InlineKeyboardMarkup {
    let button = |field: SortField| {
        let text = if field == sort.field {
            format!("{} {}", field.label(), sort.direction.arrow())
        } else {
            field.label().to_string()
        };
        InlineKeyboardButton::callback(text, format!("sort_{}", field.as_str()))
    };

    let mut rows: Vec<Vec<InlineKeyboardButton>> = SortField::ALL
        .chunks(3)
        .map(|fields| fields.iter().copied().map(&button).collect())
        .collect();

    rows.push(vec![
        InlineKeyboardButton::callback("🔄 Refresh", "dashboard_refresh"),
        InlineKeyboardButton::callback("📊 Stats", "stats_refresh"),
    ]);

    InlineKeyboardMarkup::new(rows)
}

pub fn render_stats(snapshot: &StatsSnapshot, date_format: &str) -> String {
    let stats = &snapshot.stats;
    let mut text = format!(
        "<b>📊 Token Dashboard</b>\n\n\
        • Total Tokens: <b>{}</b>\n\
        • King of the Hill: <b>{}</b>\n\
        • Raydium Migrated: <b>{}</b>\n\
        • Avg Market Cap: <b>{}</b>",
        stats.total_tokens,
        stats.kings_of_hill,
        stats.raydium_migrated,
        format_currency(Some(stats.average_market_cap), CurrencyPrecision::Aggregate),
    );

    let updated = format_date(snapshot.refreshed_at, date_format);
    if snapshot.stale {
        text.push_str(&format!(
            "\n\n⚠️ Refresh failed, showing stats from {}",
            html::escape(&updated)
        ));
    } else {
        text.push_str(&format!("\n\nUpdated: {}", html::escape(&updated)));
    }

    text
}

pub fn render_token_detail(token: &TokenRecord, date_format: &str) -> String {
    let yes_no_since = |flag: bool, since: Option<DateTime<Utc>>| {
        if flag {
            format!("Yes (since {})", format_date(since, date_format))
        } else {
            "No".to_string()
        }
    };

    format!(
        "<b>{} ({})</b>\n\n\
        • Address: <code>{}</code>\n\
        • Creator: <code>{}</code>\n\
        • Price: <b>{}</b>\n\
        • Market Cap: <b>{}</b>\n\
        • Highest Market Cap: {} ({})\n\
        • Volume 24h: {}\n\
        • Holders: {}\n\
        • Bonding Curve: {}%\n\
        • King of the Hill: {}\n\
        • Raydium Migrated: {}\n\
        • Created: {}\n\
        • Last Updated: {}",
        html::escape(token.display_name()),
        html::escape(token.display_symbol()),
        html::escape(&token.token_address),
        html::escape(token.creator_address.as_deref().unwrap_or("N/A")),
        format_currency(token.price, CurrencyPrecision::Row),
        format_currency(token.market_cap, CurrencyPrecision::Row),
        format_currency(token.highest_market_cap, CurrencyPrecision::Row),
        html::escape(&format_date(token.highest_market_cap_time, date_format)),
        format_currency(token.volume_24h, CurrencyPrecision::Row),
        token
            .holders_count
            .map_or_else(|| "N/A".to_string(), |holders| holders.to_string()),
        format_percentage(token.bonding_curve_progress),
        html::escape(&yes_no_since(token.is_king_of_hill, token.king_of_hill_time)),
        html::escape(&yes_no_since(token.raydium_migrated, token.raydium_migration_time)),
        html::escape(&format_date(token.creation_time, date_format)),
        html::escape(&format_date(token.last_updated, date_format)),
    )
}
