use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};

use crate::domain::models::{Budget, MemberKey, Money, ScopeFilter};
use crate::storage::connection::DbConnection;
use crate::storage::traits::BudgetStorage;

const BUDGET_COLUMNS: &str =
    "id, account_id, member_key, category, limit_cents, period, start_date, end_date, created_at";

/// Repository for budget definitions
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_budget(row: &SqliteRow) -> Result<Budget> {
        let member_key: Option<String> = row.get("member_key");
        let period: String = row.get("period");

        Ok(Budget {
            id: row.get("id"),
            account_id: row.get("account_id"),
            member_key: member_key.map(|k| k.parse::<MemberKey>()).transpose()?,
            category: row.get("category"),
            limit: Money::from_cents(row.get("limit_cents")),
            period: period.parse()?,
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            created_at: row.get("created_at"),
        })
    }
}

/// Append the member scope condition shared by budget and goal listings
pub(crate) fn push_scope(query: &mut QueryBuilder<'_, Sqlite>, scope: ScopeFilter) {
    match scope {
        ScopeFilter::All => {}
        ScopeFilter::Family => {
            query.push(" AND member_key IS NULL");
        }
        ScopeFilter::Member(key) => {
            query.push(" AND member_key = ").push_bind(key.as_str());
        }
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, account_id, member_key, category, limit_cents, period, start_date, end_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.account_id)
        .bind(budget.member_key.map(|k| k.as_str()))
        .bind(&budget.category)
        .bind(budget.limit.cents())
        .bind(budget.period.as_str())
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(budget.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_budget(&self, account_id: &str, budget_id: &str) -> Result<Option<Budget>> {
        let query = format!(
            "SELECT {} FROM budgets WHERE account_id = ? AND id = ?",
            BUDGET_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(account_id)
            .bind(budget_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_budget).transpose()
    }

    async fn list_budgets(&self, account_id: &str, scope: ScopeFilter) -> Result<Vec<Budget>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM budgets WHERE account_id = ", BUDGET_COLUMNS));
        query.push_bind(account_id);
        push_scope(&mut query, scope);
        query.push(" ORDER BY created_at DESC, ROWID DESC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::row_to_budget).collect()
    }

    async fn update_budget(&self, budget: &Budget) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET member_key = ?, category = ?, limit_cents = ?, period = ?, start_date = ?, end_date = ?
            WHERE account_id = ? AND id = ?
            "#,
        )
        .bind(budget.member_key.map(|k| k.as_str()))
        .bind(&budget.category)
        .bind(budget.limit.cents())
        .bind(budget.period.as_str())
        .bind(budget.start_date)
        .bind(budget.end_date)
        .bind(&budget.account_id)
        .bind(&budget.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_budget(&self, account_id: &str, budget_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE account_id = ? AND id = ?")
            .bind(account_id)
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
