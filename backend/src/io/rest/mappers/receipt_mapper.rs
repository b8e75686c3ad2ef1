use shared::{ParseReceiptResponse, ReceiptDraft as SharedReceiptDraft};

use crate::domain::receipt_parser::ReceiptDraft;
use crate::io::rest::mappers::transaction_mapper::TransactionMapper;

pub struct ReceiptMapper;

impl ReceiptMapper {
    pub fn to_parse_response(draft: ReceiptDraft, raw_text: String) -> ParseReceiptResponse {
        ParseReceiptResponse {
            transaction: SharedReceiptDraft {
                description: draft.description,
                category: draft.category,
                kind: TransactionMapper::kind_to_dto(draft.kind),
                amount: draft.amount.to_decimal(),
                date: draft.date,
            },
            raw_text,
        }
    }
}
