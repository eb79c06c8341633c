//! Analysis Engine - turns transactions and goals into an [`AnalysisReport`]
//!
//! The pipeline is a fixed sequence of pure stages over one input snapshot:
//!
//! - **Summary** - income, expenses, balance and savings rate
//! - **Patterns** - per-category expense statistics
//! - **Anomalies** - recent expenses far from their category mean
//! - **Trends** - month-over-month trajectory per category
//! - **Forecast** - next-period spend per category plus total
//! - **Health** - rule-based 0-100 score
//! - **Recommendations** - prioritized suggestions from independent rules
//! - **Insights** - short highlight messages
//!
//! Nothing is cached between runs; every call recomputes from the inputs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finsight_core::{Analyzer, AnalysisConfig, OrderBy};
//!
//! let analyzer = Analyzer::with_config(AnalysisConfig::default().with_order_by(OrderBy::Date));
//! let report = analyzer.analyze(&transactions, &goals)?;
//! ```

pub mod anomalies;
pub mod forecast;
pub mod health;
pub mod insights;
pub mod patterns;
pub mod recommendations;
pub mod summary;
pub mod trends;

use std::collections::BTreeMap;

use crate::config::{AnalysisConfig, OrderBy};
use crate::error::Result;
use crate::models::{
    AnalysisReport, Anomaly, CategoryPattern, CategoryTrend, Forecast, Goal, Summary, Transaction,
};

pub use health::{HealthRule, HealthScorer};
pub use recommendations::{RecommendationGenerator, RecommendationRule};

/// Inputs plus the outputs of the statistical stages
///
/// Built once per run and handed read-only to the rule-based stages
/// (health, recommendations, insights).
pub struct AnalysisContext<'a> {
    /// Transactions in analysis order (caller order, or date-sorted)
    pub transactions: Vec<&'a Transaction>,
    pub goals: &'a [Goal],
    pub summary: Summary,
    pub patterns: BTreeMap<String, CategoryPattern>,
    pub anomalies: Vec<Anomaly>,
    pub category_analysis: BTreeMap<String, CategoryTrend>,
    pub forecast: Forecast,
}

impl<'a> AnalysisContext<'a> {
    /// Run the statistical stages over an already-ordered snapshot
    pub fn build(transactions: Vec<&'a Transaction>, goals: &'a [Goal]) -> Self {
        let summary = summary::calculate(&transactions);
        let patterns = patterns::detect(&transactions);
        let anomalies = anomalies::detect(&transactions, &patterns);
        let category_analysis = trends::analyze(&transactions);
        let forecast = forecast::project(&patterns);

        Self {
            transactions,
            goals,
            summary,
            patterns,
            anomalies,
            category_analysis,
            forecast,
        }
    }

    pub fn expenses(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions.iter().copied().filter(|t| t.is_expense())
    }

    /// Category with the highest average expense; the first one wins ties
    pub fn top_category(&self) -> Option<(&str, &CategoryPattern)> {
        let mut top: Option<(&str, &CategoryPattern)> = None;
        for (name, pattern) in &self.patterns {
            match top {
                Some((_, best)) if pattern.average <= best.average => {}
                _ => top = Some((name.as_str(), pattern)),
            }
        }
        top
    }
}

/// Runs the full pipeline with a fixed configuration and rule set
pub struct Analyzer {
    config: AnalysisConfig,
    scorer: HealthScorer,
    recommender: RecommendationGenerator,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with default config and built-in rules
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            scorer: HealthScorer::new(),
            recommender: RecommendationGenerator::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a snapshot of transactions and goals
    ///
    /// Fails only on contract violations in the input (non-numeric amounts);
    /// everything else degrades to empty or zero-valued report fields.
    pub fn analyze(&self, transactions: &[Transaction], goals: &[Goal]) -> Result<AnalysisReport> {
        for tx in transactions {
            tx.validate()?;
        }

        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        if self.config.order_by == OrderBy::Date {
            // sort_by_key is stable: same-day records keep caller order
            ordered.sort_by_key(|t| t.date);
        }

        let ctx = AnalysisContext::build(ordered, goals);
        let health_score = self.scorer.score(&ctx);
        let recommendations = self.recommender.generate(&ctx);
        let insights = insights::generate(&ctx);

        tracing::debug!(
            transactions = transactions.len(),
            goals = goals.len(),
            order_by = self.config.order_by.as_str(),
            categories = ctx.patterns.len(),
            anomalies = ctx.anomalies.len(),
            health_score,
            "Analysis complete"
        );

        let AnalysisContext {
            summary,
            patterns,
            anomalies,
            category_analysis,
            forecast,
            ..
        } = ctx;

        Ok(AnalysisReport {
            summary,
            patterns,
            anomalies,
            category_analysis,
            forecast_monthly: forecast,
            health_score,
            recommendations,
            insights,
        })
    }
}

/// Analyze with the default configuration (caller order, built-in rules)
pub fn analyze(transactions: &[Transaction], goals: &[Goal]) -> Result<AnalysisReport> {
    Analyzer::new().analyze(transactions, goals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_top_category_prefers_first_on_tie() {
        let txs = vec![
            expense("Moradia", 300.0, date(2024, 1, 1)),
            expense("Lazer", 300.0, date(2024, 1, 2)),
            expense("Transporte", 50.0, date(2024, 1, 3)),
        ];
        let ctx = AnalysisContext::build(txs.iter().collect(), &[]);

        let (name, pattern) = ctx.top_category().unwrap();
        assert_eq!(name, "Lazer");
        assert_eq!(pattern.average, 300.0);
    }

    #[test]
    fn test_top_category_empty() {
        let ctx = AnalysisContext::build(vec![], &[]);
        assert!(ctx.top_category().is_none());
    }

    #[test]
    fn test_order_by_date_changes_positional_trend() {
        let txs = vec![
            expense("Lazer", 300.0, date(2024, 3, 1)),
            expense("Lazer", 200.0, date(2024, 2, 1)),
            expense("Lazer", 100.0, date(2024, 1, 1)),
            income(1000.0, date(2024, 1, 5)),
        ];

        let by_input = Analyzer::new().analyze(&txs, &[]).unwrap();
        let by_date = Analyzer::with_config(AnalysisConfig::default().with_order_by(OrderBy::Date))
            .analyze(&txs, &[])
            .unwrap();

        assert!(by_input.patterns["Lazer"].trend < 0.0);
        assert!(by_date.patterns["Lazer"].trend > 0.0);
        // Month-bucketed trends are chronological either way
        assert_eq!(
            by_input.category_analysis["Lazer"],
            by_date.category_analysis["Lazer"]
        );
    }

    #[test]
    fn test_analyze_rejects_non_finite_amount() {
        let txs = vec![expense("Lazer", f64::INFINITY, date(2024, 1, 1))];
        assert!(matches!(
            analyze(&txs, &[]),
            Err(crate::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_analyzer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
