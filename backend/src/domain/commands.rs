//! Domain-level command and query types.
//!
//! Services take these instead of the wire DTOs from the `shared` crate; the
//! REST layer maps between the two. Amounts arrive as wire decimals and are
//! converted to [`Money`](crate::domain::models::Money) by the services, which
//! also validate them.

pub mod accounts {
    use crate::domain::member_directory::MemberEntry;
    use crate::domain::models::{Account, User};

    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub username: String,
        pub email: String,
        pub password: String,
        pub member1_name: String,
        pub member2_name: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct ChangePasswordCommand {
        pub old_password: String,
        pub new_password: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMembersCommand {
        pub members: Vec<MemberEntry>,
    }

    /// A user together with the account they belong to
    #[derive(Debug, Clone)]
    pub struct Profile {
        pub user: User,
        pub account: Account,
    }

    /// Result of a successful register or login
    #[derive(Debug, Clone)]
    pub struct Session {
        pub token: String,
        pub profile: Profile,
    }
}

pub mod transactions {
    use chrono::NaiveDate;

    use crate::domain::models::{MemberKey, Transaction, TransactionKind};

    /// Input for recording a new entry, possibly split between members
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub member_key: MemberKey,
        pub amount: f64,
        pub kind: TransactionKind,
        pub category: String,
        pub date: NaiveDate,
        pub notes: Option<String>,
        pub split_with: Vec<String>,
    }

    /// Full replacement of one stored row. Never re-splits.
    #[derive(Debug, Clone)]
    pub struct UpdateTransactionCommand {
        pub member_key: MemberKey,
        pub amount: f64,
        pub kind: TransactionKind,
        pub category: String,
        pub date: NaiveDate,
        pub notes: Option<String>,
        pub split_with: Vec<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateTransactionResult {
        /// Payer row first
        pub transactions: Vec<Transaction>,
        pub unresolved_participants: Vec<String>,
    }
}

pub mod dashboard {
    use chrono::NaiveDate;

    use crate::domain::models::MemberKey;

    /// Which members' rows a summary covers
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DashboardScope {
        Family,
        Individual(MemberKey),
    }

    #[derive(Debug, Clone)]
    pub struct DashboardQuery {
        pub scope: DashboardScope,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }
}

pub mod budgets {
    use chrono::NaiveDate;

    use crate::domain::models::{BudgetPeriod, MemberKey};

    #[derive(Debug, Clone)]
    pub struct CreateBudgetCommand {
        pub member_key: Option<MemberKey>,
        pub category: String,
        pub amount: f64,
        pub period: Option<BudgetPeriod>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Partial update; `None` keeps the stored value, `Some(None)` clears it
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBudgetCommand {
        pub member_key: Option<Option<MemberKey>>,
        pub category: Option<String>,
        pub amount: Option<f64>,
        pub period: Option<BudgetPeriod>,
        pub start_date: Option<Option<NaiveDate>>,
        pub end_date: Option<Option<NaiveDate>>,
    }
}

pub mod goals {
    use chrono::NaiveDate;

    use crate::domain::models::MemberKey;

    #[derive(Debug, Clone)]
    pub struct CreateGoalCommand {
        pub member_key: Option<MemberKey>,
        pub name: String,
        pub target_amount: f64,
        pub current_amount: Option<f64>,
        pub deadline: NaiveDate,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateGoalCommand {
        pub name: Option<String>,
        pub target_amount: Option<f64>,
        pub current_amount: Option<f64>,
        pub deadline: Option<NaiveDate>,
    }
}
