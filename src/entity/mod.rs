mod dashboard_error;
mod sort;
mod state;
mod summary_stats;
mod token_record;

pub use dashboard_error::DashboardError;
pub use sort::{SortDirection, SortField, SortKey, SortState};
pub use state::State;
pub use summary_stats::{StatsSnapshot, SummaryStats};
pub use token_record::TokenRecord;
