use std::sync::Arc;
use tracing::info;

use crate::domain::aggregator::{self, Summary};
use crate::domain::commands::dashboard::{DashboardQuery, DashboardScope};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::TransactionFilter;
use crate::storage::{Connection, TransactionStorage};

/// Income/expense summaries for the dashboard
pub struct DashboardService<C: Connection> {
    transaction_repository: C::TransactionRepository,
}

impl<C: Connection> DashboardService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
        }
    }

    pub async fn summary(&self, account_id: &str, query: &DashboardQuery) -> DomainResult<Summary> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(DomainError::validation("from must not be after to"));
            }
        }

        let filter = TransactionFilter {
            member_key: match query.scope {
                DashboardScope::Family => None,
                DashboardScope::Individual(key) => Some(key),
            },
            from: query.from,
            to: query.to,
            ..TransactionFilter::default()
        };
        let rows = self
            .transaction_repository
            .list_transactions(account_id, &filter)
            .await?;
        info!("Summarizing {} row(s) for account {} ({:?})", rows.len(), account_id, query.scope);

        Ok(aggregator::summarize(&rows))
    }
}
