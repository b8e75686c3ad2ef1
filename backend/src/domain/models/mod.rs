pub mod account;
pub mod budget;
pub mod goal;
pub mod money;
pub mod transaction;
pub mod user;

pub use account::{Account, Member, MemberKey};
pub use budget::{Budget, BudgetPeriod, BudgetStatus, BudgetView};
pub use goal::Goal;
pub use money::Money;
pub use transaction::{Transaction, TransactionFilter, TransactionKind};
pub use user::User;

/// Which rows of a member-scopable collection a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeFilter {
    /// Every row of the account
    #[default]
    All,
    /// Only rows not tied to a member
    Family,
    /// Only rows tied to this member
    Member(MemberKey),
}
