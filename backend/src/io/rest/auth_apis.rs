//! # REST API for Accounts
//!
//! Registration, login and management of the caller's profile and member
//! roster. `register` and `login` are the only routes reachable without a
//! bearer token.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::accounts::{ChangePasswordCommand, LoginCommand, RegisterCommand};
use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::account_mapper::AccountMapper;
use crate::AppState;
use shared::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, UpdateMembersRequest,
    UpdateProfileRequest, UpdateProfileResponse,
};

/// Create a router for account related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
        .route("/change-password", post(change_password))
        .route("/members", put(update_members))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/register - email: {}", request.email);

    let command = RegisterCommand {
        username: request.username,
        email: request.email,
        password: request.password,
        member1_name: request.member1_name,
        member2_name: request.member2_name,
    };

    match state.account_service.register(command, Utc::now()).await {
        Ok(session) => (StatusCode::CREATED, Json(AccountMapper::to_auth_response(session))).into_response(),
        Err(e) => {
            warn!("Registration failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - email: {}", request.email);

    let command = LoginCommand {
        email: request.email,
        password: request.password,
    };

    match state.account_service.login(command, Utc::now()).await {
        Ok(session) => (StatusCode::OK, Json(AccountMapper::to_auth_response(session))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn me(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/auth/me - user: {}", user.user_id);

    match state.account_service.profile(&user.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(AccountMapper::to_profile_response(profile))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/auth/profile - user: {}", user.user_id);

    match state.account_service.update_username(&user.user_id, &request.username).await {
        Ok(updated) => {
            let response = UpdateProfileResponse {
                user: AccountMapper::user_to_dto(updated),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/change-password - user: {}", user.user_id);

    let command = ChangePasswordCommand {
        old_password: request.old_password,
        new_password: request.new_password,
    };

    match state.account_service.change_password(&user.user_id, command).await {
        Ok(()) => {
            let response = MessageResponse {
                message: "Password updated".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_members(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateMembersRequest>,
) -> impl IntoResponse {
    info!("PUT /api/auth/members - account: {}, request: {:?}", user.account_id, request);

    let command = AccountMapper::to_update_members_command(request);
    match state.account_service.update_members(&user.account_id, command).await {
        Ok(account) => (StatusCode::OK, Json(AccountMapper::account_to_dto(account))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
