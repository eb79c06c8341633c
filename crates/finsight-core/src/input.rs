//! Input parsing for transaction and goal records
//!
//! Records usually arrive as JSON from an external store. Fields are read
//! loosely (amounts as numbers or numeric strings, dates as `YYYY-MM-DD` or
//! RFC 3339 timestamps) and converted into typed models. Anything that breaks
//! the input contract fails fast with [`Error::InvalidInput`].

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Goal, GoalStatus, Transaction, TransactionType};

/// Transaction record as delivered by the store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Goal record as delivered by the store
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGoal {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_amount: Option<Value>,
    #[serde(default)]
    pub current_amount: Option<Value>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parse a JSON array of transaction records
pub fn parse_transactions(json: &str) -> Result<Vec<Transaction>> {
    let raw: Vec<RawTransaction> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.into_transaction(index))
        .collect()
}

/// Parse a JSON array of goal records
pub fn parse_goals(json: &str) -> Result<Vec<Goal>> {
    let raw: Vec<RawGoal> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.into_goal(index))
        .collect()
}

impl RawTransaction {
    /// Convert into a typed transaction; `index` is only used in error messages
    pub fn into_transaction(self, index: usize) -> Result<Transaction> {
        let kind = match self.kind.as_deref() {
            Some(kind) => kind
                .parse::<TransactionType>()
                .map_err(|e| invalid("transaction", index, &e))?,
            None => return Err(invalid("transaction", index, "missing type")),
        };

        let amount = match &self.amount {
            Some(value) => parse_amount(value).map_err(|e| invalid("transaction", index, &e))?,
            None => return Err(invalid("transaction", index, "missing amount")),
        };

        let date = match self.date.as_deref() {
            Some(date) => parse_date(date).map_err(|e| invalid("transaction", index, &e))?,
            None => return Err(invalid("transaction", index, "missing date")),
        };

        Ok(Transaction {
            id: id_or_index(self.id, index),
            kind,
            amount,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Outros".to_string()),
            description: self.description,
            date,
            currency: self.currency,
        })
    }
}

impl RawGoal {
    /// Convert into a typed goal; `index` is only used in error messages
    pub fn into_goal(self, index: usize) -> Result<Goal> {
        let target_amount = match &self.target_amount {
            Some(value) => parse_amount(value).map_err(|e| invalid("goal", index, &e))?,
            None => return Err(invalid("goal", index, "missing targetAmount")),
        };

        let current_amount = match &self.current_amount {
            Some(Value::Null) | None => 0.0,
            Some(value) => parse_amount(value).map_err(|e| invalid("goal", index, &e))?,
        };

        let deadline = match self.deadline.as_deref() {
            Some(date) => parse_date(date).map_err(|e| invalid("goal", index, &e))?,
            None => return Err(invalid("goal", index, "missing deadline")),
        };

        let status = self
            .status
            .as_deref()
            .map(|s| s.parse::<GoalStatus>().unwrap_or(GoalStatus::Other))
            .unwrap_or(GoalStatus::Active);

        Ok(Goal {
            id: id_or_index(self.id, index),
            name: self.name.unwrap_or_default(),
            target_amount,
            current_amount,
            deadline,
            status,
        })
    }
}

fn invalid(kind: &str, index: usize, detail: &str) -> Error {
    Error::InvalidInput(format!("{} #{}: {}", kind, index, detail))
}

fn id_or_index(id: Option<Value>, index: usize) -> String {
    match id {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => index.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Accept JSON numbers and numeric strings; reject everything else
fn parse_amount(value: &Value) -> std::result::Result<f64, String> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.is_finite() => Ok(a),
        _ => Err(format!("non-numeric amount {}", value)),
    }
}

/// Calendar date, or the date part of an RFC 3339 timestamp
fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| format!("malformed date '{}'", value))
}
