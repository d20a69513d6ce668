use crate::entity::{SortDirection, SortField, SortState, TokenRecord};
use crate::utils::{format_currency, format_date, format_percentage, shorten_address, CurrencyPrecision};

/// One formatted line of the token table
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub rank: usize,
    pub token_address: String,
    pub short_address: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub market_cap: String,
    pub volume_24h: String,
    pub bonding_curve_progress: String,
    pub is_king_of_hill: bool,
    pub raydium_migrated: bool,
    pub created: String,
}

impl TokenRow {
    fn from_record(rank: usize, record: &TokenRecord, date_format: &str) -> Self {
        Self {
            rank,
            token_address: record.token_address.clone(),
            short_address: shorten_address(&record.token_address),
            name: record.display_name().to_string(),
            symbol: record.display_symbol().to_string(),
            price: format_currency(record.price, CurrencyPrecision::Row),
            market_cap: format_currency(record.market_cap, CurrencyPrecision::Row),
            volume_24h: format_currency(record.volume_24h, CurrencyPrecision::Row),
            bonding_curve_progress: format_percentage(record.bonding_curve_progress),
            is_king_of_hill: record.is_king_of_hill,
            raydium_migrated: record.raydium_migrated,
            created: format_date(record.creation_time, date_format),
        }
    }
}

/// Working copy of the fetched tokens plus the sort the user picked.
///
/// The fetched order is never modified; every sort is computed from it, so
/// equal keys keep the order the store returned them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedTableView {
    records: Vec<TokenRecord>,
    sort: SortState,
}

impl RankedTableView {
    pub fn new(records: Vec<TokenRecord>) -> Self {
        Self {
            records,
            sort: SortState::default(),
        }
    }

    pub fn with_sort(records: Vec<TokenRecord>, sort: SortState) -> Self {
        Self { records, sort }
    }

    pub fn records(&self) -> &[TokenRecord] {
        &self.records
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort = SortState::new(field, direction);
    }

    /// Apply a user sort request and return the new state
    pub fn toggle_sort(&mut self, field: SortField) -> SortState {
        self.sort = self.sort.toggled(field);
        self.sort
    }

    /// Swap in freshly fetched records, keeping the current sort
    pub fn replace_records(&mut self, records: Vec<TokenRecord>) {
        self.records = records;
    }

    pub fn sorted(&self) -> Vec<&TokenRecord> {
        let mut ordered: Vec<&TokenRecord> = self.records.iter().collect();
        // sort_by is stable
        ordered.sort_by(|a, b| self.sort.compare(a, b));
        ordered
    }

    pub fn rows(&self, date_format: &str) -> Vec<TokenRow> {
        self.sorted()
            .into_iter()
            .enumerate()
            .map(|(i, record)| TokenRow::from_record(i + 1, record, date_format))
            .collect()
    }
}

/// Sorted copy of `records`; the input slice is left as is.
pub fn sort_records(records: &[TokenRecord], sort: SortState) -> Vec<TokenRecord> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| sort.compare(a, b));
    ordered
}
