//! Dashboard aggregation over an already-scoped set of ledger rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::models::{Money, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flow {
    pub income: Money,
    pub expense: Money,
}

impl Flow {
    fn record(&mut self, kind: TransactionKind, amount: Money) {
        match kind {
            TransactionKind::Income => self.income += amount,
            TransactionKind::Expense => self.expense += amount,
        }
    }

    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFlow {
    pub category: String,
    pub flow: Flow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub flow: Flow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub totals: Flow,
    /// Sorted by category name
    pub by_category: Vec<CategoryFlow>,
    /// Ascending by day, only days that have rows
    pub trend: Vec<DailyFlow>,
}

/// Fold rows into totals, per-category and per-day buckets.
///
/// The result does not depend on input order.
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Flow::default();
    let mut categories: BTreeMap<&str, Flow> = BTreeMap::new();
    let mut days: BTreeMap<NaiveDate, Flow> = BTreeMap::new();

    for tx in transactions {
        totals.record(tx.kind, tx.amount);
        categories
            .entry(tx.category.as_str())
            .or_default()
            .record(tx.kind, tx.amount);
        days.entry(tx.date).or_default().record(tx.kind, tx.amount);
    }

    Summary {
        totals,
        by_category: categories
            .into_iter()
            .map(|(category, flow)| CategoryFlow {
                category: category.to_string(),
                flow,
            })
            .collect(),
        trend: days
            .into_iter()
            .map(|(date, flow)| DailyFlow { date, flow })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MemberKey;
    use chrono::Utc;

    fn tx(date: &str, kind: TransactionKind, cents: i64, category: &str) -> Transaction {
        Transaction {
            id: Transaction::generate_id(),
            account_id: "account::a".to_string(),
            member_key: MemberKey::Primary,
            amount: Money::from_cents(cents),
            category: category.to_string(),
            kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            notes: String::new(),
            split_with: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("2024-01-01", TransactionKind::Income, 100_000, "Salary"),
            tx("2024-01-01", TransactionKind::Expense, 20_000, "Food"),
            tx("2024-01-02", TransactionKind::Expense, 5_000, "Food"),
        ]
    }

    #[test]
    fn test_summary_of_mixed_rows() {
        let summary = summarize(&sample());

        assert_eq!(summary.totals.income.cents(), 100_000);
        assert_eq!(summary.totals.expense.cents(), 25_000);
        assert_eq!(summary.totals.net().cents(), 75_000);

        let categories: Vec<_> = summary
            .by_category
            .iter()
            .map(|c| (c.category.as_str(), c.flow.income.cents(), c.flow.expense.cents()))
            .collect();
        assert_eq!(categories, vec![("Food", 0, 25_000), ("Salary", 100_000, 0)]);

        let trend: Vec<_> = summary
            .trend
            .iter()
            .map(|d| (d.date.to_string(), d.flow.income.cents(), d.flow.expense.cents()))
            .collect();
        assert_eq!(
            trend,
            vec![
                ("2024-01-01".to_string(), 100_000, 20_000),
                ("2024-01-02".to_string(), 0, 5_000),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&Vec::<Transaction>::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.totals.net(), Money::ZERO);
    }

    #[test]
    fn test_order_independence() {
        let rows = sample();
        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(summarize(&rows), summarize(&reversed));
    }

    #[test]
    fn test_buckets_agree_with_totals() {
        let mut rows = sample();
        rows.push(tx("2023-12-31", TransactionKind::Income, 1_234, "Gift"));
        rows.push(tx("2024-01-02", TransactionKind::Expense, 999, "Travel"));
        let summary = summarize(&rows);

        let category_income: Money = summary.by_category.iter().map(|c| c.flow.income).sum();
        let category_expense: Money = summary.by_category.iter().map(|c| c.flow.expense).sum();
        let daily_income: Money = summary.trend.iter().map(|d| d.flow.income).sum();
        let daily_expense: Money = summary.trend.iter().map(|d| d.flow.expense).sum();

        assert_eq!(category_income, summary.totals.income);
        assert_eq!(category_expense, summary.totals.expense);
        assert_eq!(daily_income, summary.totals.income);
        assert_eq!(daily_expense, summary.totals.expense);

        let dates: Vec<_> = summary.trend.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
