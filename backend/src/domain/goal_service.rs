//! Savings goals.
//!
//! Progress is tracked by hand: `current_amount` is whatever the family last
//! entered and is not linked to the ledger.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::goals::{CreateGoalCommand, UpdateGoalCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Goal, Money, ScopeFilter};
use crate::domain::validation::{non_negative_amount, positive_amount, required_text};
use crate::storage::{Connection, GoalStorage};

const MAX_NAME_LEN: usize = 256;

pub struct GoalService<C: Connection> {
    goal_repository: C::GoalRepository,
}

impl<C: Connection> GoalService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            goal_repository: connection.create_goal_repository(),
        }
    }

    pub async fn create_goal(
        &self,
        account_id: &str,
        command: CreateGoalCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<Goal> {
        let name = required_text(&command.name, "name", MAX_NAME_LEN)?;
        let target_amount = positive_amount(command.target_amount, "targetAmount")?;
        let current_amount = match command.current_amount {
            Some(amount) => non_negative_amount(amount, "currentAmount")?,
            None => Money::ZERO,
        };

        let goal = Goal {
            id: Goal::generate_id(),
            account_id: account_id.to_string(),
            member_key: command.member_key,
            name,
            target_amount,
            current_amount,
            deadline: command.deadline,
            created_at: now,
        };
        self.goal_repository.store_goal(&goal).await?;
        info!("Created goal {} ({}) in account {}", goal.id, goal.name, account_id);
        Ok(goal)
    }

    /// Goals in scope, earliest deadline first
    pub async fn list_goals(&self, account_id: &str, scope: ScopeFilter) -> DomainResult<Vec<Goal>> {
        Ok(self.goal_repository.list_goals(account_id, scope).await?)
    }

    pub async fn update_goal(&self, account_id: &str, goal_id: &str, command: UpdateGoalCommand) -> DomainResult<Goal> {
        let mut goal = self
            .goal_repository
            .get_goal(account_id, goal_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Goal not found"))?;

        if let Some(name) = command.name {
            goal.name = required_text(&name, "name", MAX_NAME_LEN)?;
        }
        if let Some(target) = command.target_amount {
            goal.target_amount = positive_amount(target, "targetAmount")?;
        }
        if let Some(current) = command.current_amount {
            goal.current_amount = non_negative_amount(current, "currentAmount")?;
        }
        if let Some(deadline) = command.deadline {
            goal.deadline = deadline;
        }

        if !self.goal_repository.update_goal(&goal).await? {
            return Err(DomainError::not_found("Goal not found"));
        }
        info!("Updated goal {}", goal.id);
        Ok(goal)
    }

    pub async fn delete_goal(&self, account_id: &str, goal_id: &str) -> DomainResult<()> {
        if !self.goal_repository.delete_goal(account_id, goal_id).await? {
            warn!("Delete requested for unknown goal {}", goal_id);
            return Err(DomainError::not_found("Goal not found"));
        }
        info!("Deleted goal {}", goal_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Account, MemberKey, User};
    use crate::storage::{AccountStorage, DbConnection};
    use chrono::NaiveDate;

    async fn setup() -> (GoalService<DbConnection>, String) {
        let connection = Arc::new(DbConnection::init_test().await.unwrap());
        let account = Account::with_members(Account::generate_id(), "Sam", None, Utc::now()).unwrap();
        let user = User {
            id: User::generate_id(),
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password_hash: "x".to_string(),
            account_id: account.id.clone(),
            created_at: Utc::now(),
        };
        connection.create_account_repository().store_registration(&account, &user).await.unwrap();
        (GoalService::new(connection), account.id)
    }

    fn create_command(name: &str, target: f64, deadline: (i32, u32, u32)) -> CreateGoalCommand {
        CreateGoalCommand {
            member_key: None,
            name: name.to_string(),
            target_amount: target,
            current_amount: None,
            deadline: NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_by_deadline() {
        let (service, account_id) = setup().await;
        service
            .create_goal(&account_id, create_command("Car", 5_000.0, (2026, 1, 1)), Utc::now())
            .await
            .unwrap();
        let mut trip = create_command("Trip", 1_200.0, (2025, 6, 1));
        trip.member_key = Some(MemberKey::Primary);
        trip.current_amount = Some(300.0);
        let trip = service.create_goal(&account_id, trip, Utc::now()).await.unwrap();
        assert_eq!(trip.progress_percent(), 25.0);

        let goals = service.list_goals(&account_id, ScopeFilter::All).await.unwrap();
        let names: Vec<_> = goals.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Trip", "Car"]);

        let primary = service
            .list_goals(&account_id, ScopeFilter::Member(MemberKey::Primary))
            .await
            .unwrap();
        assert_eq!(primary.len(), 1);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (service, account_id) = setup().await;
        let zero = service
            .create_goal(&account_id, create_command("Car", 0.0, (2026, 1, 1)), Utc::now())
            .await;
        assert!(matches!(zero, Err(DomainError::Validation(_))));

        let blank = service
            .create_goal(&account_id, create_command("  ", 10.0, (2026, 1, 1)), Utc::now())
            .await;
        assert!(matches!(blank, Err(DomainError::Validation(_))));

        let mut negative = create_command("Car", 10.0, (2026, 1, 1));
        negative.current_amount = Some(-1.0);
        let result = service.create_goal(&account_id, negative, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_progress_and_delete() {
        let (service, account_id) = setup().await;
        let goal = service
            .create_goal(&account_id, create_command("Car", 100.0, (2026, 1, 1)), Utc::now())
            .await
            .unwrap();

        let updated = service
            .update_goal(
                &account_id,
                &goal.id,
                UpdateGoalCommand {
                    current_amount: Some(40.0),
                    ..UpdateGoalCommand::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.progress_percent(), 40.0);
        assert_eq!(updated.name, "Car");

        let missing = service
            .update_goal("account::other", &goal.id, UpdateGoalCommand::default())
            .await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));

        service.delete_goal(&account_id, &goal.id).await.unwrap();
        assert!(service.list_goals(&account_id, ScopeFilter::All).await.unwrap().is_empty());
    }
}
