//! Ranking and aggregation rules behind the token dashboard.
//!
//! Both halves are pure: they never touch the store or Telegram.
mod ranked_table;
mod stats_aggregator;

pub use ranked_table::{sort_records, RankedTableView, TokenRow};
pub use stats_aggregator::{AggregateInputs, StatsAggregator};
