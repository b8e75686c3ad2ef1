use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};
use tracing::debug;

use crate::domain::models::{Money, Transaction, TransactionFilter};
use crate::storage::connection::DbConnection;
use crate::storage::traits::TransactionStorage;

const TRANSACTION_COLUMNS: &str =
    "id, account_id, member_key, amount_cents, category, kind, date, notes, split_with, created_at";

/// Repository for ledger rows
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
        let member_key: String = row.get("member_key");
        let kind: String = row.get("kind");
        let split_with: String = row.get("split_with");

        Ok(Transaction {
            id: row.get("id"),
            account_id: row.get("account_id"),
            member_key: member_key.parse()?,
            amount: Money::from_cents(row.get("amount_cents")),
            category: row.get("category"),
            kind: kind.parse()?,
            date: row.get("date"),
            notes: row.get("notes"),
            split_with: serde_json::from_str(&split_with).context("decoding split_with")?,
            created_at: row.get("created_at"),
        })
    }
}

async fn insert_transaction(conn: &mut SqliteConnection, transaction: &Transaction) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (id, account_id, member_key, amount_cents, category, kind, date, notes, split_with, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&transaction.id)
    .bind(&transaction.account_id)
    .bind(transaction.member_key.as_str())
    .bind(transaction.amount.cents())
    .bind(&transaction.category)
    .bind(transaction.kind.as_str())
    .bind(transaction.date)
    .bind(&transaction.notes)
    .bind(serde_json::to_string(&transaction.split_with)?)
    .bind(transaction.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        for transaction in transactions {
            if let Err(e) = insert_transaction(&mut tx, transaction).await {
                tx.rollback().await?;
                return Err(e.context(format!("storing transaction {}", transaction.id)));
            }
        }

        tx.commit().await?;
        debug!("Stored {} transaction row(s)", transactions.len());
        Ok(())
    }

    async fn get_transaction(&self, account_id: &str, transaction_id: &str) -> Result<Option<Transaction>> {
        let query = format!(
            "SELECT {} FROM transactions WHERE account_id = ? AND id = ?",
            TRANSACTION_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(account_id)
            .bind(transaction_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_transaction).transpose()
    }

    async fn list_transactions(&self, account_id: &str, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM transactions WHERE account_id = ",
            TRANSACTION_COLUMNS
        ));
        query.push_bind(account_id);

        if let Some(member_key) = filter.member_key {
            query.push(" AND member_key = ").push_bind(member_key.as_str());
        }
        if let Some(kind) = filter.kind {
            query.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(category) = filter.category.as_deref() {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(from) = filter.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND date <= ").push_bind(to);
        }
        query.push(" ORDER BY date DESC, ROWID DESC");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::row_to_transaction).collect()
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET member_key = ?, amount_cents = ?, category = ?, kind = ?, date = ?, notes = ?, split_with = ?
            WHERE account_id = ? AND id = ?
            "#,
        )
        .bind(transaction.member_key.as_str())
        .bind(transaction.amount.cents())
        .bind(&transaction.category)
        .bind(transaction.kind.as_str())
        .bind(transaction.date)
        .bind(&transaction.notes)
        .bind(serde_json::to_string(&transaction.split_with)?)
        .bind(&transaction.account_id)
        .bind(&transaction.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_transaction(&self, account_id: &str, transaction_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE account_id = ? AND id = ?")
            .bind(account_id)
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
