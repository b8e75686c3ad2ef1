//! Ledger row management: split-aware creation, listing, single-row edits and
//! CSV export.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::transactions::{
    CreateTransactionCommand, CreateTransactionResult, UpdateTransactionCommand,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Account, MemberKey, Transaction, TransactionFilter};
use crate::domain::split_allocator::{self, SplitRequest};
use crate::domain::validation::{positive_amount, required_text};
use crate::storage::{AccountStorage, Connection, TransactionStorage};

const MAX_CATEGORY_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;

/// Rendered CSV download
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    account_repository: C::AccountRepository,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            account_repository: connection.create_account_repository(),
        }
    }

    /// Record an entry, emitting one row per participant.
    ///
    /// All rows are written atomically.
    pub async fn create_transaction(
        &self,
        account_id: &str,
        command: CreateTransactionCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<CreateTransactionResult> {
        let amount = positive_amount(command.amount, "amount")?;
        let category = required_text(&command.category, "category", MAX_CATEGORY_LEN)?;
        let notes = normalize_notes(command.notes)?;

        let account = self.load_account(account_id).await?;
        require_member(&account, command.member_key)?;

        let request = SplitRequest {
            payer: command.member_key,
            amount,
            kind: command.kind,
            category,
            date: command.date,
            notes,
            split_with: command.split_with,
        };
        let allocation = split_allocator::allocate(&account, &request)?;
        if !allocation.unresolved.is_empty() {
            warn!(
                "Split names not found in account {}: {:?}; their share stays with {}",
                account_id, allocation.unresolved, request.payer
            );
        }

        let transactions: Vec<Transaction> = allocation
            .rows
            .into_iter()
            .map(|row| Transaction {
                id: Transaction::generate_id(),
                account_id: account_id.to_string(),
                member_key: row.member_key,
                amount: row.amount,
                category: row.category,
                kind: row.kind,
                date: row.date,
                notes: row.notes,
                split_with: row.split_with,
                created_at: now,
            })
            .collect();

        self.transaction_repository.store_transactions(&transactions).await?;
        info!(
            "Created {} row(s) for a {} of {} in account {}",
            transactions.len(),
            request.kind,
            amount,
            account_id
        );

        Ok(CreateTransactionResult {
            transactions,
            unresolved_participants: allocation.unresolved,
        })
    }

    pub async fn list_transactions(&self, account_id: &str, filter: &TransactionFilter) -> DomainResult<Vec<Transaction>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(DomainError::validation("from must not be after to"));
            }
        }
        Ok(self.transaction_repository.list_transactions(account_id, filter).await?)
    }

    pub async fn get_transaction(&self, account_id: &str, transaction_id: &str) -> DomainResult<Transaction> {
        self.transaction_repository
            .get_transaction(account_id, transaction_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Transaction not found"))
    }

    /// Replace every editable field of one row
    pub async fn update_transaction(
        &self,
        account_id: &str,
        transaction_id: &str,
        command: UpdateTransactionCommand,
    ) -> DomainResult<Transaction> {
        let amount = positive_amount(command.amount, "amount")?;
        let category = required_text(&command.category, "category", MAX_CATEGORY_LEN)?;
        let notes = normalize_notes(command.notes)?.unwrap_or_default();

        let mut transaction = self.get_transaction(account_id, transaction_id).await?;
        require_member(&self.load_account(account_id).await?, command.member_key)?;
        transaction.member_key = command.member_key;
        transaction.amount = amount;
        transaction.kind = command.kind;
        transaction.category = category;
        transaction.date = command.date;
        transaction.notes = notes;
        transaction.split_with = command.split_with;

        if !self.transaction_repository.update_transaction(&transaction).await? {
            return Err(DomainError::not_found("Transaction not found"));
        }
        info!("Updated transaction {}", transaction.id);
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, account_id: &str, transaction_id: &str) -> DomainResult<()> {
        if !self
            .transaction_repository
            .delete_transaction(account_id, transaction_id)
            .await?
        {
            warn!("Delete requested for unknown transaction {}", transaction_id);
            return Err(DomainError::not_found("Transaction not found"));
        }
        info!("Deleted transaction {}", transaction_id);
        Ok(())
    }

    /// Render the filtered rows as CSV, oldest first
    pub async fn export_csv(
        &self,
        account_id: &str,
        filter: &TransactionFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<CsvExport> {
        let account = self.load_account(account_id).await?;
        let mut transactions = self.list_transactions(account_id, filter).await?;
        transactions.reverse();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["date", "member", "type", "category", "amount", "notes", "split_with"])
            .map_err(anyhow::Error::from)?;
        for tx in &transactions {
            writer
                .write_record([
                    tx.date.format("%Y-%m-%d").to_string(),
                    account.display_name(tx.member_key),
                    tx.kind.to_string(),
                    tx.category.clone(),
                    tx.amount.to_string(),
                    tx.notes.clone(),
                    tx.split_with.join("; "),
                ])
                .map_err(anyhow::Error::from)?;
        }
        let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("flushing csv: {}", e))?;
        let content = String::from_utf8(bytes).map_err(anyhow::Error::from)?;

        info!("Exported {} transaction(s) for account {}", transactions.len(), account_id);
        Ok(CsvExport {
            filename: format!("transactions_{}.csv", now.format("%Y%m%d")),
            content,
            row_count: transactions.len(),
        })
    }

    async fn load_account(&self, account_id: &str) -> DomainResult<Account> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Family account not found"))
    }
}

fn require_member(account: &Account, key: MemberKey) -> DomainResult<()> {
    if account.member(key).is_none() {
        return Err(DomainError::validation(format!(
            "memberKey {} is not a member of this account",
            key
        )));
    }
    Ok(())
}

fn normalize_notes(notes: Option<String>) -> DomainResult<Option<String>> {
    let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(n) = &notes {
        if n.chars().count() > MAX_NOTES_LEN {
            return Err(DomainError::validation(format!(
                "notes cannot exceed {} characters",
                MAX_NOTES_LEN
            )));
        }
    }
    Ok(notes)
}
