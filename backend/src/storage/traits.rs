//! # Storage Traits
//!
//! Persistence interfaces the domain services are written against. Every
//! lookup takes the owning account id so that records of other accounts are
//! simply invisible.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Account, Budget, Goal, ScopeFilter, Transaction, TransactionFilter, User};

#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Store a new account, its members and its owning user atomically
    async fn store_registration(&self, account: &Account, owner: &User) -> Result<()>;

    /// Load an account together with its member roster
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>>;

    /// Persist the member roster of an account, inserting new slots and
    /// overwriting existing ones
    async fn save_members(&self, account: &Account) -> Result<()>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Lookup by normalized email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Update username and password hash
    async fn update_user(&self, user: &User) -> Result<()>;
}

/// Ledger rows
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store every row in a single database transaction. Either all rows are
    /// written or none are.
    async fn store_transactions(&self, transactions: &[Transaction]) -> Result<()>;

    async fn get_transaction(&self, account_id: &str, transaction_id: &str) -> Result<Option<Transaction>>;

    /// Rows matching the filter, newest first (date descending, then most
    /// recently inserted first)
    async fn list_transactions(&self, account_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Replace a stored row. Returns false when no such row exists.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool>;

    /// Returns false when no such row exists
    async fn delete_transaction(&self, account_id: &str, transaction_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait BudgetStorage: Send + Sync {
    async fn store_budget(&self, budget: &Budget) -> Result<()>;

    async fn get_budget(&self, account_id: &str, budget_id: &str) -> Result<Option<Budget>>;

    /// Budgets in scope, newest first
    async fn list_budgets(&self, account_id: &str, scope: ScopeFilter) -> Result<Vec<Budget>>;

    async fn update_budget(&self, budget: &Budget) -> Result<bool>;

    async fn delete_budget(&self, account_id: &str, budget_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait GoalStorage: Send + Sync {
    async fn store_goal(&self, goal: &Goal) -> Result<()>;

    async fn get_goal(&self, account_id: &str, goal_id: &str) -> Result<Option<Goal>>;

    /// Goals in scope, earliest deadline first
    async fn list_goals(&self, account_id: &str, scope: ScopeFilter) -> Result<Vec<Goal>>;

    async fn update_goal(&self, goal: &Goal) -> Result<bool>;

    async fn delete_goal(&self, account_id: &str, goal_id: &str) -> Result<bool>;
}

/// Factory for the repositories of one storage backend.
///
/// Services are generic over this trait so they never name a concrete
/// backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type AccountRepository: AccountStorage;
    type UserRepository: UserStorage;
    type TransactionRepository: TransactionStorage;
    type BudgetRepository: BudgetStorage;
    type GoalRepository: GoalStorage;

    fn create_account_repository(&self) -> Self::AccountRepository;
    fn create_user_repository(&self) -> Self::UserRepository;
    fn create_transaction_repository(&self) -> Self::TransactionRepository;
    fn create_budget_repository(&self) -> Self::BudgetRepository;
    fn create_goal_repository(&self) -> Self::GoalRepository;
}
