//! Income/expense totals

use crate::models::{Summary, Transaction};
use crate::stats::{round1, round2};

pub fn calculate(transactions: &[&Transaction]) -> Summary {
    let (income, expenses) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expenses), tx| {
            if tx.is_income() {
                (income + tx.amount, expenses)
            } else {
                (income, expenses + tx.amount)
            }
        });

    let total_income = round2(income);
    let total_expenses = round2(expenses);
    let balance = round2(total_income - total_expenses);
    let savings_rate = if total_income > 0.0 {
        round1(balance / total_income * 100.0)
    } else {
        0.0
    };

    Summary {
        total_income,
        total_expenses,
        balance,
        savings_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(calculate(&[]), Summary::default());
    }

    #[test]
    fn test_totals_and_savings_rate() {
        let txs = vec![
            income(5000.0, date(2024, 1, 1)),
            expense("Alimentação", 500.0, date(2024, 1, 2)),
            expense("Alimentação", 520.0, date(2024, 1, 3)),
            expense("Alimentação", 2000.0, date(2024, 1, 4)),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let summary = calculate(&refs);
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expenses, 3020.0);
        assert_eq!(summary.balance, 1980.0);
        assert_eq!(summary.savings_rate, 39.6);
    }

    #[test]
    fn test_zero_income_means_zero_savings_rate() {
        let txs = vec![expense("Lazer", 250.0, date(2024, 1, 2))];
        let refs: Vec<&Transaction> = txs.iter().collect();

        let summary = calculate(&refs);
        assert_eq!(summary.balance, -250.0);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn test_negative_savings_rate() {
        let txs = vec![
            income(1000.0, date(2024, 1, 1)),
            expense("Lazer", 1500.0, date(2024, 1, 2)),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();

        assert_eq!(calculate(&refs).savings_rate, -50.0);
    }
}
