//! Console summary command

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::AnalysisReport;

use super::core::{build_analyzer, load_inputs};
use super::truncate;
use crate::cli::InputArgs;

/// Anomalies listed in the console summary
const MAX_ANOMALIES_SHOWN: usize = 5;

pub fn cmd_report(config_path: Option<&Path>, input: &InputArgs) -> Result<()> {
    let analyzer = build_analyzer(config_path, input)?;
    let (transactions, goals) = load_inputs(input)?;

    let report = analyzer
        .analyze(&transactions, &goals)
        .context("Analysis failed")?;

    print!("{}", render_report(&report)?);
    Ok(())
}

/// Render the report as a plain-text console summary
pub fn render_report(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, report).context("Failed to render report")?;
    Ok(out)
}

fn write_report(out: &mut String, report: &AnalysisReport) -> fmt::Result {
    let rule = "   ─────────────────────────────────────────────────────────────";

    let s = &report.summary;
    writeln!(out)?;
    writeln!(out, "📊 Resumo")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "   Receitas:          {:>12.2}", s.total_income)?;
    writeln!(out, "   Despesas:          {:>12.2}", s.total_expenses)?;
    writeln!(out, "   Saldo:             {:>12.2}", s.balance)?;
    writeln!(out, "   Taxa de poupança:  {:>11.1}%", s.savings_rate)?;
    writeln!(out, "   Saúde financeira:  {:>9}/100", report.health_score)?;

    if !report.patterns.is_empty() {
        writeln!(out)?;
        writeln!(out, "🏷️  Categorias")?;
        writeln!(out, "{}", rule)?;
        writeln!(
            out,
            "   {:20} │ {:>10} │ {:>10} │ {:>5} │ {:>10}",
            "Categoria", "Média", "Desvio", "Qtd", "Previsão"
        )?;
        for (category, pattern) in &report.patterns {
            let forecast = report
                .forecast_monthly
                .categories
                .get(category)
                .copied()
                .unwrap_or(0.0);
            writeln!(
                out,
                "   {:20} │ {:>10.2} │ {:>10.2} │ {:>5} │ {:>10.2}",
                truncate(category, 20),
                pattern.average,
                pattern.standard_deviation,
                pattern.frequency,
                forecast
            )?;
        }
        writeln!(
            out,
            "   {:20}   {:>10}   {:>10}   {:>5}   {:>10.2}",
            "Total previsto", "", "", "", report.forecast_monthly.total
        )?;
    }

    if !report.anomalies.is_empty() {
        writeln!(out)?;
        writeln!(out, "⚠️  Gastos incomuns ({})", report.anomalies.len())?;
        writeln!(out, "{}", rule)?;
        for anomaly in report.anomalies.iter().take(MAX_ANOMALIES_SHOWN) {
            writeln!(
                out,
                "   [{}] {} {} - {:.2} ({})",
                anomaly.severity,
                anomaly.date,
                truncate(&anomaly.transaction, 30),
                anomaly.amount,
                anomaly.reason
            )?;
        }
    }

    if !report.recommendations.is_empty() {
        writeln!(out)?;
        writeln!(out, "💡 Recomendações")?;
        writeln!(out, "{}", rule)?;
        for rec in &report.recommendations {
            writeln!(out, "   [{}] {}", rec.priority, rec.title)?;
            writeln!(out, "      {}", rec.description)?;
            writeln!(out, "      → {}", rec.action)?;
        }
    }

    if !report.insights.is_empty() {
        writeln!(out)?;
        writeln!(out, "📝 Destaques")?;
        writeln!(out, "{}", rule)?;
        for insight in &report.insights {
            writeln!(out, "   • {}", insight)?;
        }
    }

    Ok(())
}
