use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};

use super::budget_repository::push_scope;
use crate::domain::models::{Goal, MemberKey, Money, ScopeFilter};
use crate::storage::connection::DbConnection;
use crate::storage::traits::GoalStorage;

const GOAL_COLUMNS: &str =
    "id, account_id, member_key, name, target_cents, current_cents, deadline, created_at";

/// Repository for savings goals
#[derive(Clone)]
pub struct GoalRepository {
    db: DbConnection,
}

impl GoalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_goal(row: &SqliteRow) -> Result<Goal> {
        let member_key: Option<String> = row.get("member_key");

        Ok(Goal {
            id: row.get("id"),
            account_id: row.get("account_id"),
            member_key: member_key.map(|k| k.parse::<MemberKey>()).transpose()?,
            name: row.get("name"),
            target_amount: Money::from_cents(row.get("target_cents")),
            current_amount: Money::from_cents(row.get("current_cents")),
            deadline: row.get("deadline"),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl GoalStorage for GoalRepository {
    async fn store_goal(&self, goal: &Goal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO goals (id, account_id, member_key, name, target_cents, current_cents, deadline, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.account_id)
        .bind(goal.member_key.map(|k| k.as_str()))
        .bind(&goal.name)
        .bind(goal.target_amount.cents())
        .bind(goal.current_amount.cents())
        .bind(goal.deadline)
        .bind(goal.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_goal(&self, account_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let query = format!("SELECT {} FROM goals WHERE account_id = ? AND id = ?", GOAL_COLUMNS);
        let row = sqlx::query(&query)
            .bind(account_id)
            .bind(goal_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_goal).transpose()
    }

    async fn list_goals(&self, account_id: &str, scope: ScopeFilter) -> Result<Vec<Goal>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM goals WHERE account_id = ", GOAL_COLUMNS));
        query.push_bind(account_id);
        push_scope(&mut query, scope);
        query.push(" ORDER BY deadline ASC, ROWID ASC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::row_to_goal).collect()
    }

    async fn update_goal(&self, goal: &Goal) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET name = ?, target_cents = ?, current_cents = ?, deadline = ?
            WHERE account_id = ? AND id = ?
            "#,
        )
        .bind(&goal.name)
        .bind(goal.target_amount.cents())
        .bind(goal.current_amount.cents())
        .bind(goal.deadline)
        .bind(&goal.account_id)
        .bind(&goal.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_goal(&self, account_id: &str, goal_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE account_id = ? AND id = ?")
            .bind(account_id)
            .bind(goal_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
