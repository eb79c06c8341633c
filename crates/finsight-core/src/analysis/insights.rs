//! Short highlight messages
//!
//! Each message is gated independently and simply omitted when its data is
//! missing. Numbers are rendered with plain `{:.2}` / `{:.1}` formatting;
//! locale-aware presentation belongs to the caller.

use std::collections::BTreeSet;

use chrono::Datelike;

use super::AnalysisContext;

/// Distinct months needed before the data-breadth message is emitted
pub const MIN_MONTHS_FOR_BREADTH: usize = 3;

pub fn generate(ctx: &AnalysisContext<'_>) -> Vec<String> {
    let mut insights = Vec::new();

    let balance = ctx.summary.balance;
    if balance > 0.0 {
        insights.push(format!(
            "Seu saldo está positivo em {:.2} no período analisado.",
            balance
        ));
    } else {
        insights.push(format!(
            "Atenção: suas despesas igualam ou superam suas receitas (saldo de {:.2}).",
            balance
        ));
    }

    if let Some((category, pattern)) = ctx.top_category() {
        insights.push(format!(
            "Sua maior média de gasto é em {}: {:.2} por transação.",
            category, pattern.average
        ));
    }

    if ctx.summary.savings_rate > 0.0 {
        insights.push(format!(
            "Você está poupando {:.1}% da sua renda.",
            ctx.summary.savings_rate
        ));
    }

    let months = distinct_months(ctx);
    if months >= MIN_MONTHS_FOR_BREADTH {
        insights.push(format!("Análise baseada em {} meses de dados.", months));
    }

    insights
}

/// Calendar months represented across all transactions (income and expense)
fn distinct_months(ctx: &AnalysisContext<'_>) -> usize {
    ctx.transactions
        .iter()
        .map(|t| (t.date.year(), t.date.month()))
        .collect::<BTreeSet<_>>()
        .len()
}
