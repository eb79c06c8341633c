//! Month-over-month category trends
//!
//! Expenses are summed per (category, calendar month). Months that sum to zero
//! are dropped, and a category needs at least two remaining months to get a
//! trend entry.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{CategoryTrend, Transaction, TrendDirection};
use crate::stats::{ols_slope, round1, round2};

pub fn analyze(transactions: &[&Transaction]) -> BTreeMap<String, CategoryTrend> {
    // category -> (year, month) -> sum; inner map keys sort chronologically
    let mut buckets: BTreeMap<&str, BTreeMap<(i32, u32), f64>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *buckets
            .entry(tx.category.as_str())
            .or_default()
            .entry((tx.date.year(), tx.date.month()))
            .or_insert(0.0) += tx.amount;
    }

    buckets
        .into_iter()
        .filter_map(|(category, months)| {
            let values: Vec<f64> = months.into_values().filter(|v| *v != 0.0).collect();
            trend_for(&values).map(|trend| (category.to_string(), trend))
        })
        .collect()
}

/// Trend over chronological monthly sums; `None` with fewer than two months
fn trend_for(values: &[f64]) -> Option<CategoryTrend> {
    let [.., previous, current] = values else {
        return None;
    };
    let (previous, current) = (*previous, *current);

    let change = if previous != 0.0 {
        Some(round1((current - previous) / previous * 100.0))
    } else {
        None
    };

    let direction = if current > previous {
        TrendDirection::Crescente
    } else {
        TrendDirection::Decrescente
    };

    Some(CategoryTrend {
        trend: ols_slope(values),
        current: round2(current),
        previous: round2(previous),
        change,
        direction,
    })
}
