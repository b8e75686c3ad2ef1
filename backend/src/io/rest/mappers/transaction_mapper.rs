use shared::{
    CreateTransactionRequest, CreateTransactionResponse, Transaction as SharedTransaction,
    TransactionKind as SharedTransactionKind, UpdateTransactionRequest,
};

use crate::domain::commands::transactions::{
    CreateTransactionCommand, CreateTransactionResult, UpdateTransactionCommand,
};
use crate::domain::models::{Transaction as DomainTransaction, TransactionKind as DomainTransactionKind};
use crate::io::rest::mappers::account_mapper::AccountMapper;

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            account_id: domain.account_id,
            member_key: AccountMapper::member_key_to_dto(domain.member_key),
            amount: domain.amount.to_decimal(),
            category: domain.category,
            kind: Self::kind_to_dto(domain.kind),
            date: domain.date,
            notes: domain.notes,
            split_with: domain.split_with,
            created_at: domain.created_at,
        }
    }

    pub fn to_dto_list(domain_transactions: Vec<DomainTransaction>) -> Vec<SharedTransaction> {
        domain_transactions.into_iter().map(Self::to_dto).collect()
    }

    pub fn kind_to_domain(dto_kind: SharedTransactionKind) -> DomainTransactionKind {
        match dto_kind {
            SharedTransactionKind::Income => DomainTransactionKind::Income,
            SharedTransactionKind::Expense => DomainTransactionKind::Expense,
        }
    }

    pub fn kind_to_dto(domain_kind: DomainTransactionKind) -> SharedTransactionKind {
        match domain_kind {
            DomainTransactionKind::Income => SharedTransactionKind::Income,
            DomainTransactionKind::Expense => SharedTransactionKind::Expense,
        }
    }

    pub fn to_create_command(request: CreateTransactionRequest) -> CreateTransactionCommand {
        CreateTransactionCommand {
            member_key: AccountMapper::member_key_to_domain(request.member_key),
            amount: request.amount,
            kind: Self::kind_to_domain(request.kind),
            category: request.category,
            date: request.date,
            notes: request.notes,
            split_with: request.split_with,
        }
    }

    pub fn to_update_command(request: UpdateTransactionRequest) -> UpdateTransactionCommand {
        UpdateTransactionCommand {
            member_key: AccountMapper::member_key_to_domain(request.member_key),
            amount: request.amount,
            kind: Self::kind_to_domain(request.kind),
            category: request.category,
            date: request.date,
            notes: request.notes,
            split_with: request.split_with,
        }
    }

    pub fn to_create_response(result: CreateTransactionResult) -> CreateTransactionResponse {
        CreateTransactionResponse {
            transactions: Self::to_dto_list(result.transactions),
            unresolved_participants: result.unresolved_participants,
        }
    }
}
