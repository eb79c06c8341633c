//! Builders for transactions and goals used across test suites

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

use crate::models::{Goal, GoalStatus, Transaction, TransactionType};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id(prefix: &str) -> String {
    format!("{}_{}", prefix, COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn income(amount: f64, date: NaiveDate) -> Transaction {
    Transaction::new(next_id("tx"), TransactionType::Income, amount, "Salário", date)
}

pub fn expense(category: &str, amount: f64, date: NaiveDate) -> Transaction {
    Transaction::new(next_id("tx"), TransactionType::Expense, amount, category, date)
}

pub fn goal(status: GoalStatus) -> Goal {
    Goal::new(
        next_id("goal"),
        "Reserva de emergência",
        10_000.0,
        date(2030, 12, 31),
        status,
    )
}
