//! Prioritized recommendations
//!
//! Every registered [`RecommendationRule`] is evaluated in order and may emit
//! at most one recommendation. Rules are independent (several can fire on the
//! same input). The collected list is then stably sorted by priority weight,
//! so equal priorities keep rule order.

use super::AnalysisContext;
use crate::models::{Priority, Recommendation, RecommendationType, TrendDirection};
use crate::stats::round2;

/// Savings rate below which saving more is recommended
pub const LOW_SAVINGS_RATE: f64 = 10.0;
/// Minimum average for the top category to warrant optimization
pub const TOP_CATEGORY_MIN_AVERAGE: f64 = 200.0;
/// Share of the top category average estimated as savings
pub const OPTIMIZATION_SHARE: f64 = 0.15;
/// Month-over-month change (percent) that flags a rising category
pub const RISING_CHANGE_PERCENT: f64 = 15.0;

pub trait RecommendationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation>;
}

pub struct LowSavingsRule;

impl RecommendationRule for LowSavingsRule {
    fn name(&self) -> &'static str {
        "low_savings"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation> {
        let rate = ctx.summary.savings_rate;
        if rate >= LOW_SAVINGS_RATE {
            return None;
        }
        Some(Recommendation {
            priority: Priority::Alta,
            kind: RecommendationType::Economia,
            title: "Aumente sua taxa de poupança".to_string(),
            description: format!(
                "Sua taxa de poupança está em {:.1}%, abaixo dos {:.0}% recomendados.",
                rate, LOW_SAVINGS_RATE
            ),
            action: "Revise despesas não essenciais e reserve um valor fixo todo mês.".to_string(),
            impact: "Mais segurança financeira e uma reserva para emergências.".to_string(),
        })
    }
}

/// Points at the first (most recent) anomaly
pub struct RecentAnomalyRule;

impl RecommendationRule for RecentAnomalyRule {
    fn name(&self) -> &'static str {
        "recent_anomaly"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation> {
        let anomaly = ctx.anomalies.first()?;
        Some(Recommendation {
            priority: Priority::Media,
            kind: RecommendationType::Anomalia,
            title: "Gasto incomum detectado".to_string(),
            description: format!(
                "{} ({}) em {}: {}.",
                anomaly.transaction,
                anomaly.category,
                anomaly.date.format("%Y-%m-%d"),
                anomaly.reason
            ),
            action: "Confira se o gasto foi planejado ou se há cobrança indevida.".to_string(),
            impact: format!("Evitar gastos imprevistos de {:.2}.", anomaly.amount),
        })
    }
}

pub struct TopCategoryRule;

impl RecommendationRule for TopCategoryRule {
    fn name(&self) -> &'static str {
        "top_category"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation> {
        let (category, pattern) = ctx.top_category()?;
        if pattern.average <= TOP_CATEGORY_MIN_AVERAGE {
            return None;
        }
        Some(Recommendation {
            priority: Priority::Media,
            kind: RecommendationType::Otimizacao,
            title: format!("Otimize os gastos com {}", category),
            description: format!(
                "{} tem a maior média de gasto: {:.2} por transação.",
                category, pattern.average
            ),
            action: "Compare preços e procure alternativas mais baratas nesta categoria."
                .to_string(),
            impact: format!(
                "Economia estimada de {:.2} por transação.",
                round2(pattern.average * OPTIMIZATION_SHARE)
            ),
        })
    }
}

/// First category (in map order) rising by more than the threshold
///
/// Stops at the first match, so at most one trend recommendation is emitted.
pub struct RisingCategoryRule;

impl RecommendationRule for RisingCategoryRule {
    fn name(&self) -> &'static str {
        "rising_category"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation> {
        let (category, change) = ctx.category_analysis.iter().find_map(|(category, trend)| {
            let change = trend.change?;
            (trend.direction == TrendDirection::Crescente && change.abs() > RISING_CHANGE_PERCENT)
                .then_some((category, change))
        })?;

        Some(Recommendation {
            priority: Priority::Media,
            kind: RecommendationType::Tendencia,
            title: format!("Gastos crescentes com {}", category),
            description: format!(
                "Os gastos com {} subiram {:.1}% em relação ao mês anterior.",
                category, change
            ),
            action: "Defina um limite mensal para esta categoria.".to_string(),
            impact: "Evitar que a categoria continue pressionando o orçamento.".to_string(),
        })
    }
}

pub struct MissingGoalsRule;

impl RecommendationRule for MissingGoalsRule {
    fn name(&self) -> &'static str {
        "missing_goals"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Recommendation> {
        if !ctx.goals.is_empty() {
            return None;
        }
        Some(Recommendation {
            priority: Priority::Baixa,
            kind: RecommendationType::Planejamento,
            title: "Crie metas financeiras".to_string(),
            description: "Você ainda não tem metas cadastradas.".to_string(),
            action: "Comece por uma reserva de emergência ou um objetivo com prazo definido."
                .to_string(),
            impact: "Mais foco e motivação para poupar.".to_string(),
        })
    }
}

pub struct RecommendationGenerator {
    rules: Vec<Box<dyn RecommendationRule>>,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationGenerator {
    /// Create a generator with the built-in rules in evaluation order
    pub fn new() -> Self {
        let mut generator = Self::empty();

        generator.register(Box::new(LowSavingsRule));
        generator.register(Box::new(RecentAnomalyRule));
        generator.register(Box::new(TopCategoryRule));
        generator.register(Box::new(RisingCategoryRule));
        generator.register(Box::new(MissingGoalsRule));

        generator
    }

    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn RecommendationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let recommendation = rule.evaluate(ctx);
                if recommendation.is_some() {
                    tracing::trace!(rule = rule.name(), "Recommendation rule fired");
                }
                recommendation
            })
            .collect();

        // sort_by is stable: equal priorities keep rule order
        recommendations.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));

        tracing::debug!(count = recommendations.len(), "Recommendations generated");
        recommendations
    }
}
