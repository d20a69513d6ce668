use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::TokenRecord;

/// Column the token table can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Symbol,
    Price,
    #[default]
    MarketCap,
    Volume24h,
    BondingCurveProgress,
    CreationTime,
    KingOfHillTime,
    RaydiumMigrationTime,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Name,
        SortField::Symbol,
        SortField::Price,
        SortField::MarketCap,
        SortField::Volume24h,
        SortField::BondingCurveProgress,
        SortField::CreationTime,
        SortField::KingOfHillTime,
        SortField::RaydiumMigrationTime,
    ];

    /// Column identifier, matches the `tokens` table column name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "token_name",
            SortField::Symbol => "token_symbol",
            SortField::Price => "price",
            SortField::MarketCap => "market_cap",
            SortField::Volume24h => "volume_24h",
            SortField::BondingCurveProgress => "bonding_curve_progress",
            SortField::CreationTime => "creation_time",
            SortField::KingOfHillTime => "king_of_hill_time",
            SortField::RaydiumMigrationTime => "raydium_migration_time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Symbol => "Symbol",
            SortField::Price => "Price",
            SortField::MarketCap => "Market Cap",
            SortField::Volume24h => "Volume 24h",
            SortField::BondingCurveProgress => "Curve",
            SortField::CreationTime => "Created",
            SortField::KingOfHillTime => "King Since",
            SortField::RaydiumMigrationTime => "Migrated",
        }
    }

    /// Parse a field identifier, falling back to market cap for anything unknown.
    pub fn parse_or_default(value: &str) -> SortField {
        value.parse().unwrap_or_default()
    }

    /// Typed accessor for this field. `None` means the record has no usable value.
    pub fn key<'a>(&self, record: &'a TokenRecord) -> Option<SortKey<'a>> {
        match self {
            SortField::Name => record.token_name.as_deref().map(SortKey::Text),
            SortField::Symbol => record.token_symbol.as_deref().map(SortKey::Text),
            SortField::Price => SortKey::number(record.price),
            SortField::MarketCap => SortKey::number(record.market_cap),
            SortField::Volume24h => SortKey::number(record.volume_24h),
            SortField::BondingCurveProgress => SortKey::number(record.bonding_curve_progress),
            SortField::CreationTime => record.creation_time.map(SortKey::Time),
            SortField::KingOfHillTime => record.king_of_hill_time.map(SortKey::Time),
            SortField::RaydiumMigrationTime => record.raydium_migration_time.map(SortKey::Time),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| format!("Unknown sort field: {}", value))
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

/// Active sort column and direction. Defaults to market cap, largest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field flips the direction, a different field starts descending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Descending)
        }
    }

    /// Compare two records under this state. Missing values always go last.
    pub fn compare(&self, a: &TokenRecord, b: &TokenRecord) -> Ordering {
        match (self.field.key(a), self.field.key(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => {
                let ordering = left.compare(&right);
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

/// Value extracted from a record for ordering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Time(DateTime<Utc>),
}

impl<'a> SortKey<'a> {
    // NaN has no place in an ordering, treat it like a missing value
    fn number(value: Option<f64>) -> Option<SortKey<'a>> {
        value.filter(|v| !v.is_nan()).map(SortKey::Number)
    }

    pub fn compare(&self, other: &SortKey<'_>) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            // A single field always yields one kind of key
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let state = SortState::default();
        let once = state.toggled(SortField::MarketCap);
        assert_eq!(once.direction, SortDirection::Ascending);

        let twice = once.toggled(SortField::MarketCap);
        assert_eq!(twice, state);
    }

    #[test]
    fn test_toggle_new_field_starts_descending() {
        let state = SortState::new(SortField::MarketCap, SortDirection::Ascending);
        let next = state.toggled(SortField::Price);
        assert_eq!(next, SortState::new(SortField::Price, SortDirection::Descending));

        let next = SortState::new(SortField::Price, SortDirection::Descending)
            .toggled(SortField::Name);
        assert_eq!(next.direction, SortDirection::Descending);
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(SortField::parse_or_default("volume_24h"), SortField::Volume24h);
        assert_eq!(SortField::parse_or_default("creation_time"), SortField::CreationTime);
        assert_eq!(
            SortField::parse_or_default("king_of_hill_time"),
            SortField::KingOfHillTime
        );
        assert_eq!(
            SortField::parse_or_default("raydium_migration_time"),
            SortField::RaydiumMigrationTime
        );
        assert_eq!(SortField::parse_or_default("holders"), SortField::MarketCap);
        assert!("".parse::<SortField>().is_err());
    }

    #[test]
    fn test_missing_values_rank_last_both_directions() {
        let with_cap = TokenRecord {
            market_cap: Some(10.0),
            ..Default::default()
        };
        let without_cap = TokenRecord::default();

        let desc = SortState::new(SortField::MarketCap, SortDirection::Descending);
        let asc = SortState::new(SortField::MarketCap, SortDirection::Ascending);

        assert_eq!(desc.compare(&without_cap, &with_cap), Ordering::Greater);
        assert_eq!(desc.compare(&with_cap, &without_cap), Ordering::Less);
        assert_eq!(asc.compare(&without_cap, &with_cap), Ordering::Greater);
        assert_eq!(asc.compare(&without_cap, &without_cap), Ordering::Equal);
    }

    #[test]
    fn test_missing_milestone_times_rank_last() {
        let crowned = TokenRecord {
            king_of_hill_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            raydium_migration_time: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let earlier = TokenRecord {
            king_of_hill_time: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let never = TokenRecord::default();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let king = SortState::new(SortField::KingOfHillTime, direction);
            assert_eq!(king.compare(&never, &crowned), Ordering::Greater);
            assert_eq!(king.compare(&crowned, &never), Ordering::Less);

            let migrated = SortState::new(SortField::RaydiumMigrationTime, direction);
            assert_eq!(migrated.compare(&earlier, &crowned), Ordering::Greater);
        }

        let newest_first = SortState::new(SortField::KingOfHillTime, SortDirection::Descending);
        assert_eq!(newest_first.compare(&crowned, &earlier), Ordering::Less);
    }

    #[test]
    fn test_nan_is_treated_as_missing() {
        let nan = TokenRecord {
            price: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(SortField::Price.key(&nan), None);
    }
}
