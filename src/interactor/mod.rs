pub mod db;
pub mod stats_interactor;
pub mod token_table_interactor;

pub use stats_interactor::{StatsInteractor, StatsInteractorImpl};
pub use token_table_interactor::{TokenTableInteractor, TokenTableInteractorImpl};
