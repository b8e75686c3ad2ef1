use chrono::{DateTime, NaiveDate, Utc};

use super::account::MemberKey;
use super::money::Money;

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: String,
    pub account_id: String,
    pub member_key: Option<MemberKey>,
    pub name: String,
    pub target_amount: Money,
    /// Edited directly by the user, not derived from transactions
    pub current_amount: Money,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn generate_id() -> String {
        format!("goal::{}", uuid::Uuid::new_v4().simple())
    }

    pub fn progress_percent(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        self.current_amount.cents() as f64 / self.target_amount.cents() as f64 * 100.0
    }
}
