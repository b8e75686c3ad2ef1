//! Derives budget spending from the ledger. Nothing computed here is stored.

use crate::domain::models::{Budget, BudgetStatus, BudgetView, Money, Transaction, TransactionKind};

/// Whether a ledger row counts against a budget
pub fn counts_toward(budget: &Budget, tx: &Transaction) -> bool {
    tx.kind == TransactionKind::Expense
        && tx.account_id == budget.account_id
        && tx.category == budget.category
        && budget.member_key.map_or(true, |k| tx.member_key == k)
        && budget.start_date.map_or(true, |d| tx.date >= d)
        && budget.end_date.map_or(true, |d| tx.date <= d)
}

pub fn spent<'a, I>(budget: &Budget, transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| counts_toward(budget, tx))
        .map(|tx| tx.amount)
        .sum()
}

/// Over at 100% of the limit, warning from 80%.
///
/// A non-positive limit is always over.
pub fn status(spent: Money, limit: Money) -> BudgetStatus {
    if !limit.is_positive() {
        return BudgetStatus::Over;
    }
    let spent = i128::from(spent.cents()) * 100;
    let limit = i128::from(limit.cents());
    if spent >= limit * 100 {
        BudgetStatus::Over
    } else if spent >= limit * 80 {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    }
}

pub fn evaluate<'a, I>(budget: Budget, transactions: I) -> BudgetView
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let spent = spent(&budget, transactions);
    BudgetView {
        remaining: budget.limit - spent,
        status: status(spent, budget.limit),
        spent,
        budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BudgetPeriod, MemberKey};
    use chrono::{NaiveDate, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn budget(member_key: Option<MemberKey>, limit_cents: i64) -> Budget {
        Budget {
            id: Budget::generate_id(),
            account_id: "account::a".to_string(),
            member_key,
            category: "Food".to_string(),
            limit: Money::from_cents(limit_cents),
            period: BudgetPeriod::Monthly,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }

    fn expense(member_key: MemberKey, cents: i64, category: &str, day: &str) -> Transaction {
        Transaction {
            id: Transaction::generate_id(),
            account_id: "account::a".to_string(),
            member_key,
            amount: Money::from_cents(cents),
            category: category.to_string(),
            kind: TransactionKind::Expense,
            date: date(day),
            notes: String::new(),
            split_with: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_over_budget_scenario() {
        let rows = vec![
            expense(MemberKey::Primary, 4_000, "Food", "2024-01-03"),
            expense(MemberKey::Secondary, 2_000, "Food", "2024-01-04"),
        ];
        let view = evaluate(budget(None, 5_000), &rows);
        assert_eq!(view.spent.cents(), 6_000);
        assert_eq!(view.remaining.cents(), -1_000);
        assert_eq!(view.status, BudgetStatus::Over);
    }

    #[test]
    fn test_status_thresholds() {
        let limit = Money::from_cents(10_000);
        assert_eq!(status(Money::from_cents(7_999), limit), BudgetStatus::OnTrack);
        assert_eq!(status(Money::from_cents(8_000), limit), BudgetStatus::Warning);
        assert_eq!(status(Money::from_cents(9_999), limit), BudgetStatus::Warning);
        assert_eq!(status(Money::from_cents(10_000), limit), BudgetStatus::Over);
        assert_eq!(status(Money::ZERO, limit), BudgetStatus::OnTrack);
    }

    #[test]
    fn test_zero_limit_is_over() {
        assert_eq!(status(Money::ZERO, Money::ZERO), BudgetStatus::Over);
        assert_eq!(status(Money::from_cents(1), Money::ZERO), BudgetStatus::Over);
    }

    #[test]
    fn test_only_matching_expenses_count() {
        let mut income = expense(MemberKey::Primary, 9_999, "Food", "2024-01-01");
        income.kind = TransactionKind::Income;
        let mut foreign = expense(MemberKey::Primary, 7_777, "Food", "2024-01-01");
        foreign.account_id = "account::other".to_string();
        let rows = vec![
            income,
            foreign,
            expense(MemberKey::Primary, 1_000, "food", "2024-01-01"),
            expense(MemberKey::Primary, 2_500, "Food", "2024-01-01"),
        ];
        assert_eq!(spent(&budget(None, 5_000), &rows).cents(), 2_500);
    }

    #[test]
    fn test_member_scoped_budget() {
        let rows = vec![
            expense(MemberKey::Primary, 4_000, "Food", "2024-01-03"),
            expense(MemberKey::Secondary, 2_000, "Food", "2024-01-04"),
        ];
        assert_eq!(spent(&budget(Some(MemberKey::Secondary), 5_000), &rows).cents(), 2_000);
        assert_eq!(spent(&budget(Some(MemberKey::Primary), 5_000), &rows).cents(), 4_000);
    }

    #[test]
    fn test_date_window_bounds_are_inclusive() {
        let mut b = budget(None, 5_000);
        b.start_date = Some(date("2024-01-02"));
        b.end_date = Some(date("2024-01-31"));
        let rows = vec![
            expense(MemberKey::Primary, 100, "Food", "2024-01-01"),
            expense(MemberKey::Primary, 200, "Food", "2024-01-02"),
            expense(MemberKey::Primary, 400, "Food", "2024-01-31"),
            expense(MemberKey::Primary, 800, "Food", "2024-02-01"),
        ];
        assert_eq!(spent(&b, &rows).cents(), 600);
    }

    #[test]
    fn test_spent_is_order_independent() {
        let rows = vec![
            expense(MemberKey::Primary, 1_234, "Food", "2024-01-03"),
            expense(MemberKey::Secondary, 4_321, "Food", "2024-01-01"),
            expense(MemberKey::Primary, 5, "Rent", "2024-01-02"),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        let b = budget(None, 10_000);
        assert_eq!(spent(&b, &rows), spent(&b, &reversed));
    }
}
