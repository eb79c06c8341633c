//! Financial health score
//!
//! The score starts at [`BASE_SCORE`] and each registered [`HealthRule`]
//! contributes a capped adjustment. The folded result is clamped to 0..=100.
//!
//! Built-in rules, in evaluation order:
//!
//! | Rule              | Adjustment                                   |
//! |-------------------|----------------------------------------------|
//! | savings_rate      | +15 (>= 20%), +10 (>= 10%), +5 (>= 0%)       |
//! | anomalies         | -2 per anomaly, at most -10                  |
//! | high_ticket       | -1 per expense above 500, at most -10        |
//! | active_goals      | +5 per active goal, at most +15              |
//! | completed_goals   | +10 per completed goal, at most +10          |

use super::AnalysisContext;
use crate::models::GoalStatus;

pub const BASE_SCORE: i32 = 50;
/// Expenses above this amount count as high-ticket
pub const HIGH_TICKET_AMOUNT: f64 = 500.0;

/// One named, independently testable score adjustment
pub trait HealthRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Signed contribution to the running score
    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32;
}

/// Rewards the share of income kept
///
/// A savings rate only exists when there is income; with zero income this
/// rule contributes nothing.
pub struct SavingsRateRule;

impl HealthRule for SavingsRateRule {
    fn name(&self) -> &'static str {
        "savings_rate"
    }

    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32 {
        if ctx.summary.total_income <= 0.0 {
            return 0;
        }
        let rate = ctx.summary.savings_rate;
        if rate >= 20.0 {
            15
        } else if rate >= 10.0 {
            10
        } else if rate >= 0.0 {
            5
        } else {
            0
        }
    }
}

pub struct AnomalyPenaltyRule;

impl HealthRule for AnomalyPenaltyRule {
    fn name(&self) -> &'static str {
        "anomalies"
    }

    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32 {
        -capped(ctx.anomalies.len(), 2, 10)
    }
}

pub struct HighTicketRule;

impl HealthRule for HighTicketRule {
    fn name(&self) -> &'static str {
        "high_ticket"
    }

    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32 {
        let count = ctx
            .expenses()
            .filter(|t| t.amount > HIGH_TICKET_AMOUNT)
            .count();
        -capped(count, 1, 10)
    }
}

pub struct ActiveGoalsRule;

impl HealthRule for ActiveGoalsRule {
    fn name(&self) -> &'static str {
        "active_goals"
    }

    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32 {
        capped(count_goals(ctx, GoalStatus::Active), 5, 15)
    }
}

pub struct CompletedGoalsRule;

impl HealthRule for CompletedGoalsRule {
    fn name(&self) -> &'static str {
        "completed_goals"
    }

    fn adjustment(&self, ctx: &AnalysisContext<'_>) -> i32 {
        capped(count_goals(ctx, GoalStatus::Completed), 10, 10)
    }
}

fn count_goals(ctx: &AnalysisContext<'_>, status: GoalStatus) -> usize {
    ctx.goals.iter().filter(|g| g.status == status).count()
}

/// `min(count * per_item, cap)` without overflowing on huge counts
fn capped(count: usize, per_item: i32, cap: i32) -> i32 {
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    count.saturating_mul(per_item).min(cap)
}

/// Folds an ordered rule list into a 0-100 score
pub struct HealthScorer {
    rules: Vec<Box<dyn HealthRule>>,
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthScorer {
    /// Create a scorer with the built-in rules
    pub fn new() -> Self {
        let mut scorer = Self::empty();

        scorer.register(Box::new(SavingsRateRule));
        scorer.register(Box::new(AnomalyPenaltyRule));
        scorer.register(Box::new(HighTicketRule));
        scorer.register(Box::new(ActiveGoalsRule));
        scorer.register(Box::new(CompletedGoalsRule));

        scorer
    }

    /// Create a scorer with no rules (always scores [`BASE_SCORE`])
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn HealthRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn score(&self, ctx: &AnalysisContext<'_>) -> u8 {
        let raw = self.rules.iter().fold(BASE_SCORE, |score, rule| {
            let adjustment = rule.adjustment(ctx);
            tracing::trace!(rule = rule.name(), adjustment, "Health rule applied");
            score.saturating_add(adjustment)
        });

        let score = raw.clamp(0, 100) as u8;
        tracing::debug!(raw, score, "Health score computed");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Anomaly, AnomalySeverity, Goal, Transaction};
    use crate::test_utils::{date, expense, goal, income};

    fn ctx<'a>(txs: &'a [Transaction], goals: &'a [Goal]) -> AnalysisContext<'a> {
        AnalysisContext::build(txs.iter().collect(), goals)
    }

    #[test]
    fn test_empty_input_scores_base() {
        let ctx = ctx(&[], &[]);
        assert_eq!(HealthScorer::new().score(&ctx), 50);
    }

    #[test]
    fn test_savings_rate_tiers() {
        let cases = [
            (5000.0, 3000.0, 15), // 40%
            (5000.0, 4500.0, 10), // 10%
            (5000.0, 5000.0, 5),  // 0%
            (5000.0, 6000.0, 0),  // negative
        ];
        for (earned, spent, expected) in cases {
            let txs = vec![
                income(earned, date(2024, 1, 1)),
                expense("Moradia", spent, date(2024, 1, 2)),
            ];
            let ctx = ctx(&txs, &[]);
            assert_eq!(SavingsRateRule.adjustment(&ctx), expected, "spent {spent}");
        }
    }

    #[test]
    fn test_savings_rule_without_income_is_neutral() {
        let txs = vec![expense("Moradia", 100.0, date(2024, 1, 2))];
        assert_eq!(SavingsRateRule.adjustment(&ctx(&txs, &[])), 0);
    }

    fn anomaly(day: u32) -> Anomaly {
        Anomaly {
            transaction: "Lazer".to_string(),
            category: "Lazer".to_string(),
            amount: 900.0,
            date: date(2024, 1, day),
            severity: AnomalySeverity::Media,
            reason: String::new(),
            z_score: 2.5,
        }
    }

    #[test]
    fn test_anomaly_penalty_is_capped() {
        let mut ctx = ctx(&[], &[]);
        assert_eq!(AnomalyPenaltyRule.adjustment(&ctx), 0);

        let cases = [(1, -2), (3, -6), (5, -10), (7, -10)];
        for (count, expected) in cases {
            ctx.anomalies = (1..=count).map(anomaly).collect();
            assert_eq!(
                AnomalyPenaltyRule.adjustment(&ctx),
                expected,
                "{count} anomalies"
            );
        }
        assert_eq!(HealthScorer::new().score(&ctx), 40);
    }

    #[test]
    fn test_high_ticket_penalty_is_capped() {
        let txs: Vec<Transaction> = (1..=15)
            .map(|d| expense("Moradia", 501.0, date(2024, 1, d)))
            .collect();
        assert_eq!(HighTicketRule.adjustment(&ctx(&txs, &[])), -10);

        let txs = vec![
            expense("Moradia", 500.0, date(2024, 1, 1)),
            expense("Moradia", 500.01, date(2024, 1, 2)),
        ];
        assert_eq!(HighTicketRule.adjustment(&ctx(&txs, &[])), -1);
    }

    #[test]
    fn test_goal_bonuses_are_capped() {
        let goals = vec![
            goal(GoalStatus::Active),
            goal(GoalStatus::Active),
            goal(GoalStatus::Active),
            goal(GoalStatus::Active),
            goal(GoalStatus::Completed),
            goal(GoalStatus::Completed),
            goal(GoalStatus::Paused),
        ];
        let ctx = ctx(&[], &goals);
        assert_eq!(ActiveGoalsRule.adjustment(&ctx), 15);
        assert_eq!(CompletedGoalsRule.adjustment(&ctx), 10);
        assert_eq!(HealthScorer::new().score(&ctx), 75);
    }

    #[test]
    fn test_score_is_clamped() {
        struct Boost(i32);
        impl HealthRule for Boost {
            fn name(&self) -> &'static str {
                "boost"
            }
            fn adjustment(&self, _ctx: &AnalysisContext<'_>) -> i32 {
                self.0
            }
        }

        let ctx = ctx(&[], &[]);

        let mut scorer = HealthScorer::empty();
        scorer.register(Box::new(Boost(500)));
        assert_eq!(scorer.score(&ctx), 100);

        let mut scorer = HealthScorer::empty();
        scorer.register(Box::new(Boost(-500)));
        assert_eq!(scorer.score(&ctx), 0);
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            HealthScorer::new().rule_names(),
            vec![
                "savings_rate",
                "anomalies",
                "high_ticket",
                "active_goals",
                "completed_goals"
            ]
        );
    }
}
