use crate::entity::TokenRecord;
use log::debug;
use sqlx::{Error as SqlxError, PgPool};

// Columns are cast so NUMERIC and naive TIMESTAMP columns decode the same way
const TOKEN_COLUMNS: &str = "id::int8 AS id, \
    token_address, \
    token_name, \
    token_symbol, \
    creator_address, \
    creation_time::timestamptz AS creation_time, \
    price::float8 AS price, \
    market_cap::float8 AS market_cap, \
    volume_24h::float8 AS volume_24h, \
    holders_count::int8 AS holders_count, \
    bonding_curve_progress::float8 AS bonding_curve_progress, \
    COALESCE(is_king_of_hill, FALSE) AS is_king_of_hill, \
    king_of_hill_time::timestamptz AS king_of_hill_time, \
    COALESCE(raydium_migrated, FALSE) AS raydium_migrated, \
    raydium_migration_time::timestamptz AS raydium_migration_time, \
    highest_market_cap::float8 AS highest_market_cap, \
    highest_market_cap_time::timestamptz AS highest_market_cap_time, \
    last_updated::timestamptz AS last_updated";

// Get the top tokens by market cap, tokens without a market cap last
pub async fn get_top_tokens_by_market_cap(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<TokenRecord>, SqlxError> {
    let sql = format!(
        "SELECT {} FROM tokens ORDER BY market_cap DESC NULLS LAST LIMIT $1",
        TOKEN_COLUMNS
    );

    let tokens = sqlx::query_as::<_, TokenRecord>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    debug!("Fetched {} tokens ordered by market cap", tokens.len());

    Ok(tokens)
}

// Get a token by its address
pub async fn get_token_by_address(
    pool: &PgPool,
    token_address: &str,
) -> Result<Option<TokenRecord>, SqlxError> {
    let sql = format!(
        "SELECT {} FROM tokens WHERE token_address = $1 LIMIT 1",
        TOKEN_COLUMNS
    );

    sqlx::query_as::<_, TokenRecord>(&sql)
        .bind(token_address)
        .fetch_optional(pool)
        .await
}

// Count all tracked tokens
pub async fn count_tokens(pool: &PgPool) -> Result<Option<i64>, SqlxError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) AS count FROM tokens")
        .fetch_optional(pool)
        .await
}

// Count tokens currently holding king of the hill
pub async fn count_king_of_hill_tokens(pool: &PgPool) -> Result<Option<i64>, SqlxError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) AS count FROM tokens WHERE is_king_of_hill = TRUE")
        .fetch_optional(pool)
        .await
}

// Count tokens that moved to Raydium
pub async fn count_raydium_migrated_tokens(pool: &PgPool) -> Result<Option<i64>, SqlxError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) AS count FROM tokens WHERE raydium_migrated = TRUE")
        .fetch_optional(pool)
        .await
}

// Get the market cap of every token, including missing ones
pub async fn get_all_market_caps(pool: &PgPool) -> Result<Vec<Option<f64>>, SqlxError> {
    let market_caps =
        sqlx::query_scalar::<_, Option<f64>>("SELECT market_cap::float8 AS market_cap FROM tokens")
            .fetch_all(pool)
            .await?;

    debug!("Fetched {} market cap values", market_caps.len());

    Ok(market_caps)
}
