//! Finsight Core Library
//!
//! Deterministic analysis engine for personal finance records:
//! - Domain models for transactions, goals and the analysis report
//! - Input parsing with contract validation
//! - Layered analysis configuration (embedded default + user override)
//! - Analysis pipeline: summary, spending patterns, anomalies, monthly
//!   category trends, forecast, health score, recommendations and insights
//!
//! ```rust,ignore
//! use finsight_core::{analyze, input};
//!
//! let transactions = input::parse_transactions(&json)?;
//! let report = analyze(&transactions, &[])?;
//! println!("{}", report.health_score);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod stats;

/// Transaction and goal builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{analyze, AnalysisContext, Analyzer};
pub use config::{AnalysisConfig, OrderBy};
pub use error::{Error, Result};
pub use models::{
    AnalysisReport, Anomaly, AnomalySeverity, CategoryPattern, CategoryTrend, Forecast, Goal,
    GoalStatus, Priority, Recommendation, RecommendationType, Summary, Transaction,
    TransactionType, TrendDirection,
};
