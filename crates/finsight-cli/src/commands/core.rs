//! Shared command utilities
//!
//! - `build_analyzer` - Resolve config and apply CLI overrides
//! - `load_inputs` - Read and validate transaction/goal files

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::input::{parse_goals, parse_transactions};
use finsight_core::{AnalysisConfig, Analyzer, Goal, Transaction};

use crate::cli::InputArgs;

/// Resolve the analysis config (explicit file > user override > defaults)
/// and apply the `--order-by` override
pub fn build_analyzer(config_path: Option<&Path>, input: &InputArgs) -> Result<Analyzer> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load().context("Failed to load config")?,
    };

    if let Some(order) = input.order_by {
        config = config.with_order_by(order.into());
    }

    tracing::debug!(order_by = config.order_by.as_str(), "Analysis config resolved");
    Ok(Analyzer::with_config(config))
}

/// Read transactions and (optional) goals from JSON files
pub fn load_inputs(input: &InputArgs) -> Result<(Vec<Transaction>, Vec<Goal>)> {
    let raw = fs::read_to_string(&input.transactions).with_context(|| {
        format!(
            "Failed to read transactions file {}",
            input.transactions.display()
        )
    })?;
    let transactions = parse_transactions(&raw).context("Invalid transactions file")?;

    let goals = match &input.goals {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read goals file {}", path.display()))?;
            parse_goals(&raw).context("Invalid goals file")?
        }
        None => Vec::new(),
    };

    tracing::info!(
        transactions = transactions.len(),
        goals = goals.len(),
        "Loaded input records"
    );
    Ok((transactions, goals))
}
