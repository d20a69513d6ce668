use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// How many fractional digits a dollar amount is shown with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPrecision {
    /// Per-token price, market cap and volume: 2 to 6 digits
    Row,
    /// Dashboard totals: whole dollars
    Aggregate,
}

impl CurrencyPrecision {
    fn fraction_digits(&self) -> (usize, usize) {
        match self {
            CurrencyPrecision::Row => (2, 6),
            CurrencyPrecision::Aggregate => (0, 0),
        }
    }
}

// Format an optional amount as US dollars, "N/A" when absent
pub fn format_currency(value: Option<f64>, precision: CurrencyPrecision) -> String {
    match value {
        Some(amount) if amount.is_finite() => {
            let (min_digits, max_digits) = precision.fraction_digits();
            format_usd(amount, min_digits, max_digits)
        }
        _ => "N/A".to_string(),
    }
}

fn format_usd(amount: f64, min_digits: usize, max_digits: usize) -> String {
    // Round half away from zero before formatting
    let factor = 10f64.powi(max_digits as i32);
    let mut rounded = (amount.abs() * factor).round() / factor;
    if !rounded.is_finite() {
        rounded = amount.abs();
    }

    let fixed = format!("{:.*}", max_digits, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_digits {
        frac.push('0');
    }

    let sign = if amount < 0.0 && rounded != 0.0 { "-" } else { "" };
    let grouped = group_thousands(int_part);

    if frac.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Bonding curve progress with two decimals, bare "0" when unknown or not finite
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(progress) if progress.is_finite() => format!("{:.2}", progress),
        _ => "0".to_string(),
    }
}

// Format a timestamp with a strftime pattern, "N/A" when absent
pub fn format_date(value: Option<DateTime<Utc>>, pattern: &str) -> String {
    let Some(time) = value else {
        return "N/A".to_string();
    };

    let mut formatted = String::new();
    if write!(formatted, "{}", time.format(pattern)).is_err() {
        return time.to_rfc3339();
    }
    formatted
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..5].iter().collect();
    let end: String = chars[chars.len() - 5..].iter().collect();

    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_currency_missing_value() {
        assert_eq!(format_currency(None, CurrencyPrecision::Row), "N/A");
        assert_eq!(format_currency(None, CurrencyPrecision::Aggregate), "N/A");
        assert_eq!(format_currency(Some(f64::NAN), CurrencyPrecision::Row), "N/A");
    }

    #[test]
    fn test_currency_row_precision() {
        assert_eq!(format_currency(Some(1234.5), CurrencyPrecision::Row), "$1,234.50");
        assert_eq!(format_currency(Some(0.0), CurrencyPrecision::Row), "$0.00");
        assert_eq!(
            format_currency(Some(0.0000123456), CurrencyPrecision::Row),
            "$0.000012"
        );
        assert_eq!(
            format_currency(Some(1_000_000.125), CurrencyPrecision::Row),
            "$1,000,000.125"
        );
        assert_eq!(format_currency(Some(-42.1), CurrencyPrecision::Row), "-$42.10");
    }

    #[test]
    fn test_currency_aggregate_precision() {
        assert_eq!(
            format_currency(Some(1234.5), CurrencyPrecision::Aggregate),
            "$1,235"
        );
        assert_eq!(
            format_currency(Some(750_000.0), CurrencyPrecision::Aggregate),
            "$750,000"
        );
        assert_eq!(format_currency(Some(999.0), CurrencyPrecision::Aggregate), "$999");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(None), "0");
        assert_eq!(format_percentage(Some(0.0)), "0.00");
        assert_eq!(format_percentage(Some(45.678)), "45.68");
        assert_eq!(format_percentage(Some(100.0)), "100.00");
    }

    #[test]
    fn test_percentage_not_finite() {
        assert_eq!(format_percentage(Some(f64::NAN)), "0");
        assert_eq!(format_percentage(Some(f64::INFINITY)), "0");
        assert_eq!(format_percentage(Some(f64::NEG_INFINITY)), "0");
    }

    #[test]
    fn test_date() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_date(None, DEFAULT_DATE_FORMAT), "N/A");
        assert_eq!(format_date(Some(time), DEFAULT_DATE_FORMAT), "2024-03-09 14:05");
        assert_eq!(format_date(Some(time), "%d.%m.%Y"), "09.03.2024");
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address("short"), "short");
        assert_eq!(
            shorten_address("7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr"),
            "7GCih...mW2hr"
        );
    }
}
