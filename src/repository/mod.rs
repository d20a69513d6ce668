pub mod token_repository;

#[cfg(test)]
pub mod fake;

pub use token_repository::{PgTokenRepository, TokenRepository};
