//! Domain models for Finsight
//!
//! Input records (`Transaction`, `Goal`) are owned by the caller and only read
//! by the engine. Everything else in this module is report output, rebuilt from
//! scratch on every analysis run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// Direction of a transaction's contribution to the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(Self::Income),
            "expense" | "despesa" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense record
///
/// `amount` is expected to be non-negative; the sign of its contribution comes
/// from `kind` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    /// Informational only, amounts are assumed to share one unit
    #[serde(default)]
    pub currency: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            category: category.into(),
            description: None,
            date,
            currency: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Display label: the description when present, otherwise the category
    pub fn label(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.category,
        }
    }

    /// Reject amounts that would poison every aggregate they touch
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidInput(format!(
                "transaction {} has non-numeric amount {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

/// Lifecycle state of a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
    Cancelled,
    /// Any status the engine does not score
    #[serde(other)]
    Other,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    /// Unknown statuses map to `Other` rather than failing
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other,
        })
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal; read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
        status: GoalStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            status,
        }
    }

    pub fn with_current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }
}

// ========== Report ==========

/// Income/expense totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    /// Percentage of income kept, one decimal
    pub savings_rate: f64,
}

/// Descriptive statistics over one category's expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPattern {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// Population standard deviation (divides by n)
    pub standard_deviation: f64,
    pub frequency: usize,
    /// OLS slope of amounts against their position in the analyzed order
    pub trend: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalySeverity {
    #[serde(rename = "alta")]
    Alta,
    #[serde(rename = "média")]
    Media,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "média",
        }
    }
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recent expense far from its category mean
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    /// Transaction label (description, or category when absent)
    pub transaction: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub severity: AnomalySeverity,
    pub reason: String,
    #[serde(skip_serializing)]
    pub z_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Crescente,
    Decrescente,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crescente => "crescente",
            Self::Decrescente => "decrescente",
        }
    }
}

/// Month-over-month trajectory of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    /// OLS slope over the chronological monthly sums
    pub trend: f64,
    pub current: f64,
    pub previous: f64,
    /// Percent change from `previous` to `current`; `None` when `previous` is zero
    pub change: Option<f64>,
    pub direction: TrendDirection,
}

/// Next-period projection per category
///
/// Serializes as one flat map where the reserved `total` key sits beside the
/// category entries. A category literally named `total` is never emitted and
/// never counted in the sum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    pub categories: BTreeMap<String, f64>,
    pub total: f64,
}

impl Forecast {
    pub const TOTAL_KEY: &'static str = "total";

    pub fn get(&self, key: &str) -> Option<f64> {
        if key == Self::TOTAL_KEY {
            Some(self.total)
        } else {
            self.categories.get(key).copied()
        }
    }
}

impl Serialize for Forecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self
            .categories
            .iter()
            .filter(|(name, _)| name.as_str() != Self::TOTAL_KEY);
        let mut map = serializer.serialize_map(None)?;
        for (name, amount) in entries {
            map.serialize_entry(name, amount)?;
        }
        map.serialize_entry(Self::TOTAL_KEY, &self.total)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    #[serde(rename = "alta")]
    Alta,
    #[serde(rename = "média")]
    Media,
    #[serde(rename = "baixa")]
    Baixa,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "média",
            Self::Baixa => "baixa",
        }
    }

    /// Sort weight (higher = more urgent)
    pub fn weight(&self) -> u8 {
        match self {
            Self::Alta => 3,
            Self::Media => 2,
            Self::Baixa => 1,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Economia,
    Anomalia,
    Otimizacao,
    Tendencia,
    Planejamento,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    pub action: String,
    pub impact: String,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: Summary,
    pub patterns: BTreeMap<String, CategoryPattern>,
    pub anomalies: Vec<Anomaly>,
    pub category_analysis: BTreeMap<String, CategoryTrend>,
    pub forecast_monthly: Forecast,
    pub health_score: u8,
    pub recommendations: Vec<Recommendation>,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "Despesa".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_goal_status_unknown_maps_to_other() {
        assert_eq!("archived".parse::<GoalStatus>().unwrap(), GoalStatus::Other);
        let goal: GoalStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(goal, GoalStatus::Other);
    }

    #[test]
    fn test_transaction_label_falls_back_to_category() {
        let tx = Transaction::new("1", TransactionType::Expense, 10.0, "Lazer", date());
        assert_eq!(tx.label(), "Lazer");
        let tx = tx.with_description("Cinema");
        assert_eq!(tx.label(), "Cinema");
        let tx = tx.with_description("   ");
        assert_eq!(tx.label(), "Lazer");
    }

    #[test]
    fn test_validate_rejects_nan_amount() {
        let tx = Transaction::new("1", TransactionType::Expense, f64::NAN, "Lazer", date());
        assert!(matches!(tx.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_forecast_serializes_total_inside_map() {
        let mut categories = BTreeMap::new();
        categories.insert("Lazer".to_string(), 120.5);
        categories.insert("total".to_string(), 3.0);
        let forecast = Forecast {
            categories,
            total: 123.5,
        };

        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(json, serde_json::json!({ "Lazer": 120.5, "total": 123.5 }));
        assert_eq!(forecast.get("total"), Some(123.5));
    }

    #[test]
    fn test_priority_weights() {
        assert!(Priority::Alta.weight() > Priority::Media.weight());
        assert!(Priority::Media.weight() > Priority::Baixa.weight());
        assert_eq!(
            serde_json::to_string(&Priority::Media).unwrap(),
            "\"média\""
        );
    }
}
