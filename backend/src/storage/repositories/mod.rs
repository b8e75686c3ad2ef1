// Repository modules
pub mod account_repository;
pub mod budget_repository;
pub mod goal_repository;
pub mod transaction_repository;
pub mod user_repository;

pub use account_repository::AccountRepository;
pub use budget_repository::BudgetRepository;
pub use goal_repository::GoalRepository;
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;
