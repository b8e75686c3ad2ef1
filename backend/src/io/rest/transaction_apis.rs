//! # REST API for Ledger Rows
//!
//! Creating a row goes through the split allocator, so one request may write
//! several rows. Listing and CSV export share the same query filters.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::domain::models::TransactionFilter;
use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::account_mapper::AccountMapper;
use crate::io::rest::mappers::transaction_mapper::TransactionMapper;
use crate::AppState;
use shared::{CreateTransactionRequest, DeleteResponse, MemberKey, TransactionKind, UpdateTransactionRequest};

/// Create a router for ledger row APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/export", get(export_transactions))
        .route(
            "/:id",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
}

/// Query parameters shared by the list and export endpoints
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    pub member_key: Option<MemberKey>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionListQuery {
    fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            member_key: self.member_key.map(AccountMapper::member_key_to_domain),
            kind: self.kind.map(TransactionMapper::kind_to_domain),
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
            from: self.from,
            to: self.to,
        }
    }
}

pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    let command = TransactionMapper::to_create_command(request);
    match state
        .transaction_service
        .create_transaction(&user.account_id, command, Utc::now())
        .await
    {
        Ok(result) => {
            (StatusCode::CREATED, Json(TransactionMapper::to_create_response(result))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    match state
        .transaction_service
        .list_transactions(&user.account_id, &query.to_filter())
        .await
    {
        Ok(transactions) => (StatusCode::OK, Json(TransactionMapper::to_dto_list(transactions))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn export_transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions/export - query: {:?}", query);

    match state
        .transaction_service
        .export_csv(&user.account_id, &query.to_filter(), Utc::now())
        .await
    {
        Ok(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.content,
            )
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/transactions/{}", id);

    match state.transaction_service.get_transaction(&user.account_id, &id).await {
        Ok(transaction) => (StatusCode::OK, Json(TransactionMapper::to_dto(transaction))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/transactions/{} - request: {:?}", id, request);

    let command = TransactionMapper::to_update_command(request);
    match state
        .transaction_service
        .update_transaction(&user.account_id, &id, command)
        .await
    {
        Ok(transaction) => (StatusCode::OK, Json(TransactionMapper::to_dto(transaction))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", id);

    match state.transaction_service.delete_transaction(&user.account_id, &id).await {
        Ok(()) => {
            let response = DeleteResponse {
                message: "Deleted".to_string(),
                id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
