//! # REST API for Budgets
//!
//! Responses always carry `spent`, `remaining` and `status` recomputed from
//! the ledger at request time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::account_mapper::AccountMapper;
use crate::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::AppState;
use shared::{CreateBudgetRequest, DeleteResponse, UpdateBudgetRequest};

/// Create a router for budget APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/:id", put(update_budget).delete(delete_budget))
}

/// `memberKey` is `member1`, `member2` or `family`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScopeQuery {
    pub member_key: Option<String>,
}

pub async fn create_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    info!("POST /api/budgets - request: {:?}", request);

    let command = BudgetMapper::to_create_command(request);
    match state.budget_service.create_budget(&user.account_id, command, Utc::now()).await {
        Ok(view) => (StatusCode::CREATED, Json(BudgetMapper::to_dto(view))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_budgets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ScopeQuery>,
) -> impl IntoResponse {
    info!("GET /api/budgets - query: {:?}", query);

    let scope = match AccountMapper::scope_to_domain(query.member_key.as_deref()) {
        Ok(scope) => scope,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.budget_service.list_budgets(&user.account_id, scope).await {
        Ok(views) => (StatusCode::OK, Json(BudgetMapper::to_dto_list(views))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/budgets/{} - request: {:?}", id, request);

    let command = BudgetMapper::to_update_command(request);
    match state.budget_service.update_budget(&user.account_id, &id, command).await {
        Ok(view) => (StatusCode::OK, Json(BudgetMapper::to_dto(view))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/budgets/{}", id);

    match state.budget_service.delete_budget(&user.account_id, &id).await {
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
