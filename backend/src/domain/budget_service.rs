//! Budget CRUD. Reads always recompute spending from the ledger.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::budget_tracker;
use crate::domain::commands::budgets::{CreateBudgetCommand, UpdateBudgetCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Budget, BudgetView, ScopeFilter, Transaction, TransactionFilter, TransactionKind};
use crate::domain::validation::{positive_amount, required_text};
use crate::storage::{BudgetStorage, Connection, TransactionStorage};

const MAX_CATEGORY_LEN: usize = 100;

pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    transaction_repository: C::TransactionRepository,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            transaction_repository: connection.create_transaction_repository(),
        }
    }

    pub async fn create_budget(
        &self,
        account_id: &str,
        command: CreateBudgetCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<BudgetView> {
        let category = required_text(&command.category, "category", MAX_CATEGORY_LEN)?;
        let limit = positive_amount(command.amount, "amount")?;
        validate_window(command.start_date, command.end_date)?;

        let budget = Budget {
            id: Budget::generate_id(),
            account_id: account_id.to_string(),
            member_key: command.member_key,
            category,
            limit,
            period: command.period.unwrap_or_default(),
            start_date: command.start_date,
            end_date: command.end_date,
            created_at: now,
        };
        self.budget_repository.store_budget(&budget).await?;
        info!("Created budget {} for {} in account {}", budget.id, budget.category, account_id);

        self.evaluate(budget).await
    }

    /// Budgets in scope, newest first, each with its current spending
    pub async fn list_budgets(&self, account_id: &str, scope: ScopeFilter) -> DomainResult<Vec<BudgetView>> {
        let budgets = self.budget_repository.list_budgets(account_id, scope).await?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let expenses = self.expenses(account_id).await?;
        Ok(budgets
            .into_iter()
            .map(|budget| budget_tracker::evaluate(budget, &expenses))
            .collect())
    }

    pub async fn update_budget(
        &self,
        account_id: &str,
        budget_id: &str,
        command: UpdateBudgetCommand,
    ) -> DomainResult<BudgetView> {
        let mut budget = self
            .budget_repository
            .get_budget(account_id, budget_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Budget not found"))?;

        if let Some(category) = command.category {
            budget.category = required_text(&category, "category", MAX_CATEGORY_LEN)?;
        }
        if let Some(amount) = command.amount {
            budget.limit = positive_amount(amount, "amount")?;
        }
        if let Some(period) = command.period {
            budget.period = period;
        }
        if let Some(member_key) = command.member_key {
            budget.member_key = member_key;
        }
        if let Some(start_date) = command.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = command.end_date {
            budget.end_date = end_date;
        }
        validate_window(budget.start_date, budget.end_date)?;

        if !self.budget_repository.update_budget(&budget).await? {
            return Err(DomainError::not_found("Budget not found"));
        }
        info!("Updated budget {}", budget.id);
        self.evaluate(budget).await
    }

    pub async fn delete_budget(&self, account_id: &str, budget_id: &str) -> DomainResult<()> {
        if !self.budget_repository.delete_budget(account_id, budget_id).await? {
            warn!("Delete requested for unknown budget {}", budget_id);
            return Err(DomainError::not_found("Budget not found"));
        }
        info!("Deleted budget {}", budget_id);
        Ok(())
    }

    async fn evaluate(&self, budget: Budget) -> DomainResult<BudgetView> {
        let expenses = self.expenses(&budget.account_id).await?;
        Ok(budget_tracker::evaluate(budget, &expenses))
    }

    async fn expenses(&self, account_id: &str) -> DomainResult<Vec<Transaction>> {
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            ..TransactionFilter::default()
        };
        Ok(self.transaction_repository.list_transactions(account_id, &filter).await?)
    }
}

fn validate_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DomainResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => {
            Err(DomainError::validation("startDate must not be after endDate"))
        }
        _ => Ok(()),
    }
}
