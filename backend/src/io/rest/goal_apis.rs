//! # REST API for Savings Goals

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use chrono::Utc;
use tracing::info;

use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::budget_apis::ScopeQuery;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::account_mapper::AccountMapper;
use crate::io::rest::mappers::goal_mapper::GoalMapper;
use crate::AppState;
use shared::{CreateGoalRequest, DeleteResponse, UpdateGoalRequest};

/// Create a router for goal related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goals).post(create_goal))
        .route("/:id", put(update_goal).delete(delete_goal))
}

pub async fn create_goal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateGoalRequest>,
) -> impl IntoResponse {
    info!("POST /api/goals - request: {:?}", request);

    let command = GoalMapper::to_create_command(request);
    match state.goal_service.create_goal(&user.account_id, command, Utc::now()).await {
        Ok(goal) => (StatusCode::CREATED, Json(GoalMapper::to_dto(goal))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn list_goals(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ScopeQuery>,
) -> impl IntoResponse {
    info!("GET /api/goals - query: {:?}", query);

    let scope = match AccountMapper::scope_to_domain(query.member_key.as_deref()) {
        Ok(scope) => scope,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.goal_service.list_goals(&user.account_id, scope).await {
        Ok(goals) => (StatusCode::OK, Json(GoalMapper::to_dto_list(goals))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_goal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateGoalRequest>,
) -> impl IntoResponse {
    info!("PUT /api/goals/{} - request: {:?}", id, request);

    let command = GoalMapper::to_update_command(request);
    match state.goal_service.update_goal(&user.account_id, &id, command).await {
        Ok(goal) => (StatusCode::OK, Json(GoalMapper::to_dto(goal))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_goal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/goals/{}", id);

    match state.goal_service.delete_goal(&user.account_id, &id).await {
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
