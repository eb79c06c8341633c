//! JSON report command

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::AnalysisReport;

use super::core::{build_analyzer, load_inputs};
use crate::cli::InputArgs;

pub fn cmd_analyze(config_path: Option<&Path>, input: &InputArgs, pretty: bool) -> Result<()> {
    let analyzer = build_analyzer(config_path, input)?;
    let (transactions, goals) = load_inputs(input)?;

    let report = analyzer
        .analyze(&transactions, &goals)
        .context("Analysis failed")?;

    println!("{}", report_json(&report, pretty)?);
    Ok(())
}

pub fn report_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("Failed to serialize report")
}
