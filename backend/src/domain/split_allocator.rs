//! Split allocation: turn one submitted entry into one ledger row per
//! participant.
//!
//! Shares are computed in cents. Every participant receives
//! `amount / N` (integer division, `N = 1 + co-participants`) and the payer
//! additionally keeps the remainder cents, so the rows always sum to the
//! submitted amount. Names that resolve to no member (or to the payer) emit no
//! row; their share stays with the payer and the unresolved names are
//! reported back.
//!
//! An amount smaller than one cent per participant is rejected, so no row is
//! ever written for zero.

use chrono::NaiveDate;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Account, MemberKey, Money, TransactionKind};

/// A submitted entry before allocation
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    pub payer: MemberKey,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Co-participant display names, in submission order
    pub split_with: Vec<String>,
}

/// One row to persist
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedRow {
    pub member_key: MemberKey,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub notes: String,
    pub split_with: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Payer row first, then one row per resolved co-participant
    pub rows: Vec<AllocatedRow>,
    /// Names that matched no member of the account
    pub unresolved: Vec<String>,
}

impl Allocation {
    pub fn total(&self) -> Money {
        self.rows.iter().map(|r| r.amount).sum()
    }
}

pub fn allocate(account: &Account, request: &SplitRequest) -> DomainResult<Allocation> {
    let notes = request.notes.clone().unwrap_or_default();

    if request.split_with.is_empty() {
        return Ok(Allocation {
            rows: vec![AllocatedRow {
                member_key: request.payer,
                amount: request.amount,
                kind: request.kind,
                category: request.category.clone(),
                date: request.date,
                notes,
                split_with: Vec::new(),
            }],
            unresolved: Vec::new(),
        });
    }

    let participants = u32::try_from(1 + request.split_with.len())
        .map_err(|_| DomainError::validation("too many split participants"))?;
    let (share, remainder) = request.amount.split_evenly(participants);
    if !share.is_positive() {
        return Err(DomainError::validation(format!(
            "amount is too small to split between {} participants",
            participants
        )));
    }

    let split_note = format!(
        "{} (split with {})",
        if notes.is_empty() { &request.category } else { &notes },
        account.display_name(request.payer)
    );

    let mut payer_amount = share + remainder;
    let mut co_rows = Vec::with_capacity(request.split_with.len());
    let mut unresolved = Vec::new();

    for name in &request.split_with {
        match account.resolve_by_name(name) {
            Some(key) if key != request.payer => co_rows.push(AllocatedRow {
                member_key: key,
                amount: share,
                kind: request.kind,
                category: request.category.clone(),
                date: request.date,
                notes: split_note.clone(),
                split_with: request.split_with.clone(),
            }),
            Some(_) => payer_amount += share,
            None => {
                payer_amount += share;
                unresolved.push(name.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(1 + co_rows.len());
    rows.push(AllocatedRow {
        member_key: request.payer,
        amount: payer_amount,
        kind: request.kind,
        category: request.category.clone(),
        date: request.date,
        notes,
        split_with: request.split_with.clone(),
    });
    rows.extend(co_rows);

    Ok(Allocation { rows, unresolved })
}
