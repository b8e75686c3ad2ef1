//! # Family Ledger Backend
//!
//! Shared household ledger for a family of up to two members: split-aware
//! income/expense tracking, dashboard summaries, budgets, savings goals and
//! receipt text parsing, served as a JSON REST API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (engines, services)
//!     ↓
//! Storage Layer (sqlx / SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::auth::{PasswordHasher, TokenSigner};
use crate::domain::{AccountService, BudgetService, DashboardService, GoalService, TransactionService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<DbConnection>>,
    pub transaction_service: Arc<TransactionService<DbConnection>>,
    pub dashboard_service: Arc<DashboardService<DbConnection>>,
    pub budget_service: Arc<BudgetService<DbConnection>>,
    pub goal_service: Arc<GoalService<DbConnection>>,
}

impl AppState {
    pub fn new(db_conn: Arc<DbConnection>, config: &AppConfig) -> Self {
        let hasher = PasswordHasher::new(config.password_hash_cost);
        let signer = TokenSigner::new(&config.token_secret, config.token_ttl_hours);

        Self {
            account_service: Arc::new(AccountService::new(db_conn.clone(), hasher, signer)),
            transaction_service: Arc::new(TransactionService::new(db_conn.clone())),
            dashboard_service: Arc::new(DashboardService::new(db_conn.clone())),
            budget_service: Arc::new(BudgetService::new(db_conn.clone())),
            goal_service: Arc::new(GoalService::new(db_conn)),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = Arc::new(DbConnection::new(&config.database_url).await?);

    info!("Setting up domain services");
    Ok(AppState::new(db_conn, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {}", origin))?,
            )
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };

    Ok(Router::new()
        .route("/health", get(health))
        .nest("/api", io::rest::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
