use crate::entity::SummaryStats;

/// Raw results of the four aggregate queries. A count the store returned no
/// row for is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateInputs {
    pub total_tokens: Option<i64>,
    pub kings_of_hill: Option<i64>,
    pub raydium_migrated: Option<i64>,
    pub market_caps: Vec<Option<f64>>,
}

pub struct StatsAggregator;

impl StatsAggregator {
    pub fn aggregate(inputs: &AggregateInputs) -> SummaryStats {
        SummaryStats {
            total_tokens: inputs.total_tokens.unwrap_or(0),
            kings_of_hill: inputs.kings_of_hill.unwrap_or(0),
            raydium_migrated: inputs.raydium_migrated.unwrap_or(0),
            average_market_cap: Self::average_market_cap(&inputs.market_caps),
        }
    }

    /// Mean of the market caps that are present and non-zero, 0 if none are.
    ///
    /// Zero caps are skipped along with missing ones, including tokens whose
    /// market cap genuinely is zero.
    pub fn average_market_cap(market_caps: &[Option<f64>]) -> f64 {
        let (sum, count) = market_caps
            .iter()
            .filter_map(|cap| *cap)
            .filter(|cap| *cap != 0.0 && !cap.is_nan())
            .fold((0.0, 0usize), |(sum, count), cap| (sum + cap, count + 1));

        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(StatsAggregator::average_market_cap(&[]), 0.0);
        assert_eq!(StatsAggregator::average_market_cap(&[None, None]), 0.0);
    }

    #[test]
    fn test_average_skips_missing_and_zero() {
        let caps = [Some(100.0), Some(200.0), None, Some(300.0)];
        assert_eq!(StatsAggregator::average_market_cap(&caps), 200.0);

        let caps = [Some(0.0), Some(90.0), Some(f64::NAN), Some(30.0)];
        assert_eq!(StatsAggregator::average_market_cap(&caps), 60.0);
    }

    #[test]
    fn test_aggregate_summary() {
        let inputs = AggregateInputs {
            total_tokens: Some(120),
            kings_of_hill: Some(3),
            raydium_migrated: Some(40),
            market_caps: vec![Some(1_000_000.0), Some(500_000.0), None],
        };

        assert_eq!(
            StatsAggregator::aggregate(&inputs),
            SummaryStats {
                total_tokens: 120,
                kings_of_hill: 3,
                raydium_migrated: 40,
                average_market_cap: 750_000.0,
            }
        );
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let stats = StatsAggregator::aggregate(&AggregateInputs::default());
        assert_eq!(stats, SummaryStats::default());
    }
}
