//! Statistical outlier detection over recent expenses
//!
//! Only the last [`RECENT_WINDOW`] expenses of the analyzed order are
//! considered. Each is scored against its category pattern:
//!
//! ```text
//! z = |amount - average| / max(standard_deviation, 1)
//! ```
//!
//! The denominator floor is 1 so single-observation categories (zero spread)
//! never divide by zero.

use std::collections::BTreeMap;

use crate::models::{Anomaly, AnomalySeverity, CategoryPattern, Transaction};

/// Number of most recent expenses examined
pub const RECENT_WINDOW: usize = 30;
/// z-score above which an expense is anomalous
pub const ANOMALY_Z: f64 = 2.0;
/// z-score above which an anomaly is high severity
pub const HIGH_SEVERITY_Z: f64 = 3.0;

pub fn z_score(amount: f64, pattern: &CategoryPattern) -> f64 {
    (amount - pattern.average).abs() / pattern.standard_deviation.max(1.0)
}

pub fn detect(
    transactions: &[&Transaction],
    patterns: &BTreeMap<String, CategoryPattern>,
) -> Vec<Anomaly> {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .copied()
        .filter(|t| t.is_expense())
        .collect();
    let start = expenses.len().saturating_sub(RECENT_WINDOW);

    let mut anomalies: Vec<Anomaly> = expenses[start..]
        .iter()
        .filter_map(|tx| {
            let pattern = patterns.get(&tx.category)?;
            let z = z_score(tx.amount, pattern);
            if z <= ANOMALY_Z {
                return None;
            }

            let severity = if z > HIGH_SEVERITY_Z {
                AnomalySeverity::Alta
            } else {
                AnomalySeverity::Media
            };

            Some(Anomaly {
                transaction: tx.label().to_string(),
                category: tx.category.clone(),
                amount: tx.amount,
                date: tx.date,
                severity,
                reason: reason(tx, pattern),
                z_score: z,
            })
        })
        .collect();

    // Most recent first; stable so same-day anomalies keep analyzed order
    anomalies.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::debug!(
        examined = expenses.len() - start,
        flagged = anomalies.len(),
        "Anomaly detection complete"
    );

    anomalies
}

fn reason(tx: &Transaction, pattern: &CategoryPattern) -> String {
    let multiplier = if pattern.average != 0.0 {
        tx.amount / pattern.average
    } else {
        0.0
    };
    format!(
        "Valor {:.1}x a média de {:.2} em {}",
        multiplier, pattern.average, tx.category
    )
}
