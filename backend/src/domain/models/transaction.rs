use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use super::account::MemberKey;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(anyhow::anyhow!("unknown transaction kind: {}", other)),
        }
    }
}

/// One ledger row, attributed to exactly one member.
///
/// `amount` is always a positive magnitude; `kind` carries the direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub member_key: MemberKey,
    pub amount: Money,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub notes: String,
    pub split_with: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn generate_id() -> String {
        format!("transaction::{}", uuid::Uuid::new_v4().simple())
    }
}

/// Row filter used by listings, the dashboard and exports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub member_key: Option<MemberKey>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.member_key.map_or(true, |k| transaction.member_key == k)
            && self.kind.map_or(true, |k| transaction.kind == k)
            && self
                .category
                .as_deref()
                .map_or(true, |c| transaction.category == c)
            && self.from.map_or(true, |d| transaction.date >= d)
            && self.to.map_or(true, |d| transaction.date <= d)
    }
}
