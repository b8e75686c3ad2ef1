use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use crate::domain::models::{Account, Member, MemberKey, User};
use crate::storage::connection::DbConnection;
use crate::storage::traits::AccountStorage;

/// Repository for accounts and their member rosters
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    async fn load_members(&self, account_id: &str) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT member_key, name, email
            FROM members
            WHERE account_id = ?
            ORDER BY member_key
            "#,
        )
        .bind(account_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let key: String = row.get("member_key");
                Ok(Member {
                    key: key.parse::<MemberKey>()?,
                    name: row.get("name"),
                    email: row.get("email"),
                })
            })
            .collect()
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn store_registration(&self, account: &Account, owner: &User) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        match insert_registration(&mut tx, account, owner).await {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        }

        debug!("Stored account {} with {} member(s)", account.id, account.members.len());
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT id, created_at FROM accounts WHERE id = ?")
            .bind(account_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(Account {
                id: r.get("id"),
                created_at: r.get("created_at"),
                members: self.load_members(account_id).await?,
            })),
            None => Ok(None),
        }
    }

    async fn save_members(&self, account: &Account) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        for member in &account.members {
            sqlx::query(
                r#"
                INSERT INTO members (account_id, member_key, name, email)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (account_id, member_key)
                DO UPDATE SET name = excluded.name, email = excluded.email
                "#,
            )
            .bind(&account.id)
            .bind(member.key.as_str())
            .bind(&member.name)
            .bind(&member.email)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_registration(conn: &mut SqliteConnection, account: &Account, owner: &User) -> Result<()> {
    sqlx::query("INSERT INTO accounts (id, created_at) VALUES (?, ?)")
        .bind(&account.id)
        .bind(account.created_at)
        .execute(&mut *conn)
        .await?;

    for member in &account.members {
        sqlx::query(
            r#"
            INSERT INTO members (account_id, member_key, name, email)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(member.key.as_str())
        .bind(&member.name)
        .bind(&member.email)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, account_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&owner.id)
    .bind(&owner.username)
    .bind(&owner.email)
    .bind(&owner.password_hash)
    .bind(&owner.account_id)
    .bind(owner.created_at)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("storing user {}", owner.id))?;

    Ok(())
}
