pub mod commands;
pub mod config;
pub mod dashboard;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod repository;
pub mod router;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use config::DashboardConfig;
pub use dashboard::{RankedTableView, StatsAggregator};
pub use di::ServiceContainer;
pub use entity::*;
pub use router::{Router, TelegramRouter};

use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, Bot};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire the router, service container and chat storage for the dispatcher
pub fn create_application(
    bot: Bot,
    db_pool: Arc<sqlx::PgPool>,
    config: DashboardConfig,
) -> (
    TelegramRouter,
    Bot,
    Arc<ServiceContainer>,
    Arc<InMemStorage<State>>,
) {
    let services = Arc::new(ServiceContainer::new(db_pool, config));
    let router = TelegramRouter::new(services.clone());
    let storage = InMemStorage::<State>::new();

    (router, bot, services, storage)
}
