//! Per-category spending statistics
//!
//! The `trend` slope is computed against each expense's position in the
//! analyzed order, not its date. With `OrderBy::Input` that is the caller's
//! order; callers who want a chronological slope pre-sort or use
//! `OrderBy::Date`.

use std::collections::BTreeMap;

use crate::models::{CategoryPattern, Transaction};
use crate::stats::{mean, ols_slope, population_std_dev, round2};

pub fn detect(transactions: &[&Transaction]) -> BTreeMap<String, CategoryPattern> {
    let mut by_category: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        by_category
            .entry(tx.category.as_str())
            .or_default()
            .push(tx.amount);
    }

    by_category
        .into_iter()
        .map(|(category, amounts)| (category.to_string(), pattern_for(&amounts)))
        .collect()
}

/// Statistics for a non-empty amount sequence
fn pattern_for(amounts: &[f64]) -> CategoryPattern {
    let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = amounts.iter().copied().fold(f64::INFINITY, f64::min);

    CategoryPattern {
        average: round2(mean(amounts)),
        max: round2(max),
        min: round2(min),
        standard_deviation: round2(population_std_dev(amounts)),
        frequency: amounts.len(),
        trend: ols_slope(amounts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_only_expenses_are_grouped() {
        let txs = vec![
            income(5000.0, date(2024, 1, 1)),
            expense("Lazer", 100.0, date(2024, 1, 2)),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let patterns = detect(&refs);
        assert_eq!(patterns.len(), 1);
        assert!(patterns.contains_key("Lazer"));
    }

    #[test]
    fn test_category_statistics() {
        let txs = vec![
            expense("Alimentação", 500.0, date(2024, 1, 2)),
            expense("Alimentação", 520.0, date(2024, 1, 3)),
            expense("Alimentação", 2000.0, date(2024, 1, 4)),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let pattern = &detect(&refs)["Alimentação"];
        assert_eq!(pattern.average, 1006.67);
        assert_eq!(pattern.max, 2000.0);
        assert_eq!(pattern.min, 500.0);
        assert_eq!(pattern.frequency, 3);
        assert_eq!(pattern.standard_deviation, 702.44);
        assert!((pattern.trend - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_observation_has_zero_spread_and_trend() {
        let txs = vec![expense("Saúde", 80.0, date(2024, 1, 2))];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let pattern = &detect(&refs)["Saúde"];
        assert_eq!(pattern.standard_deviation, 0.0);
        assert_eq!(pattern.trend, 0.0);
        assert_eq!(pattern.frequency, 1);
    }

    #[test]
    fn test_trend_follows_supplied_order() {
        let txs = vec![
            expense("Lazer", 300.0, date(2024, 1, 1)),
            expense("Lazer", 100.0, date(2024, 3, 1)),
        ];
        let mut refs: Vec<&Transaction> = txs.iter().collect();
        assert_eq!(detect(&refs)["Lazer"].trend, -200.0);

        refs.reverse();
        assert_eq!(detect(&refs)["Lazer"].trend, 200.0);
    }
}
