use shared::{
    Budget as SharedBudget, BudgetPeriod as SharedBudgetPeriod, BudgetStatus as SharedBudgetStatus,
    CreateBudgetRequest, UpdateBudgetRequest,
};

use crate::domain::commands::budgets::{CreateBudgetCommand, UpdateBudgetCommand};
use crate::domain::models::{
    BudgetPeriod as DomainBudgetPeriod, BudgetStatus as DomainBudgetStatus, BudgetView,
};
use crate::io::rest::mappers::account_mapper::AccountMapper;

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn period_to_domain(dto_period: SharedBudgetPeriod) -> DomainBudgetPeriod {
        match dto_period {
            SharedBudgetPeriod::Weekly => DomainBudgetPeriod::Weekly,
            SharedBudgetPeriod::Monthly => DomainBudgetPeriod::Monthly,
            SharedBudgetPeriod::Yearly => DomainBudgetPeriod::Yearly,
        }
    }

    pub fn period_to_dto(domain_period: DomainBudgetPeriod) -> SharedBudgetPeriod {
        match domain_period {
            DomainBudgetPeriod::Weekly => SharedBudgetPeriod::Weekly,
            DomainBudgetPeriod::Monthly => SharedBudgetPeriod::Monthly,
            DomainBudgetPeriod::Yearly => SharedBudgetPeriod::Yearly,
        }
    }

    fn status_to_dto(domain_status: DomainBudgetStatus) -> SharedBudgetStatus {
        match domain_status {
            DomainBudgetStatus::OnTrack => SharedBudgetStatus::OnTrack,
            DomainBudgetStatus::Warning => SharedBudgetStatus::Warning,
            DomainBudgetStatus::Over => SharedBudgetStatus::Over,
        }
    }

    /// Flatten a budget and its computed spending into the wire shape
    pub fn to_dto(view: BudgetView) -> SharedBudget {
        let budget = view.budget;
        SharedBudget {
            id: budget.id,
            account_id: budget.account_id,
            member_key: budget.member_key.map(AccountMapper::member_key_to_dto),
            category: budget.category,
            amount: budget.limit.to_decimal(),
            period: Self::period_to_dto(budget.period),
            start_date: budget.start_date,
            end_date: budget.end_date,
            created_at: budget.created_at,
            spent: view.spent.to_decimal(),
            remaining: view.remaining.to_decimal(),
            status: Self::status_to_dto(view.status),
        }
    }

    pub fn to_dto_list(views: Vec<BudgetView>) -> Vec<SharedBudget> {
        views.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateBudgetRequest) -> CreateBudgetCommand {
        CreateBudgetCommand {
            member_key: request.member_key.map(AccountMapper::member_key_to_domain),
            category: request.category,
            amount: request.amount,
            period: request.period.map(Self::period_to_domain),
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }

    pub fn to_update_command(request: UpdateBudgetRequest) -> UpdateBudgetCommand {
        UpdateBudgetCommand {
            member_key: request
                .member_key
                .map(|key| key.map(AccountMapper::member_key_to_domain)),
            category: request.category,
            amount: request.amount,
            period: request.period.map(Self::period_to_domain),
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }
}
