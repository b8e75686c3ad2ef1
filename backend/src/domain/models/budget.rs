use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

use super::account::MemberKey;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(anyhow::anyhow!("unknown budget period: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

/// Persisted budget definition. Spending is never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub account_id: String,
    /// None for a family-wide budget
    pub member_key: Option<MemberKey>,
    pub category: String,
    pub limit: Money,
    pub period: BudgetPeriod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn generate_id() -> String {
        format!("budget::{}", uuid::Uuid::new_v4().simple())
    }
}

/// A budget together with the spending derived from the ledger at read time
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetView {
    pub budget: Budget,
    pub spent: Money,
    pub remaining: Money,
    pub status: BudgetStatus,
}
