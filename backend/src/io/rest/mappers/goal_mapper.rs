use shared::{CreateGoalRequest, Goal as SharedGoal, UpdateGoalRequest};

use crate::domain::commands::goals::{CreateGoalCommand, UpdateGoalCommand};
use crate::domain::models::Goal as DomainGoal;
use crate::io::rest::mappers::account_mapper::AccountMapper;

pub struct GoalMapper;

impl GoalMapper {
    pub fn to_dto(domain: DomainGoal) -> SharedGoal {
        let progress_percent = domain.progress_percent();
        SharedGoal {
            id: domain.id,
            account_id: domain.account_id,
            member_key: domain.member_key.map(AccountMapper::member_key_to_dto),
            name: domain.name,
            target_amount: domain.target_amount.to_decimal(),
            current_amount: domain.current_amount.to_decimal(),
            deadline: domain.deadline,
            progress_percent,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain_goals: Vec<DomainGoal>) -> Vec<SharedGoal> {
        domain_goals.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateGoalRequest) -> CreateGoalCommand {
        CreateGoalCommand {
            member_key: request.member_key.map(AccountMapper::member_key_to_domain),
            name: request.name,
            target_amount: request.target_amount,
            current_amount: request.current_amount,
            deadline: request.deadline,
        }
    }

    pub fn to_update_command(request: UpdateGoalRequest) -> UpdateGoalCommand {
        UpdateGoalCommand {
            name: request.name,
            target_amount: request.target_amount,
            current_amount: request.current_amount,
            deadline: request.deadline,
        }
    }
}
