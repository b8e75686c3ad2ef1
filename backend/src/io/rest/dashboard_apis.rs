//! # REST API for the Dashboard

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::domain::commands::dashboard::{DashboardQuery, DashboardScope};
use crate::domain::DomainError;
use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::account_mapper::AccountMapper;
use crate::io::rest::mappers::dashboard_mapper::DashboardMapper;
use crate::AppState;
use shared::{DashboardView, MemberKey};

/// Create a router for dashboard APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(get_summary))
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    #[serde(default)]
    pub view: DashboardView,
    pub member_key: Option<MemberKey>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SummaryQuery {
    fn to_domain(&self) -> Result<DashboardQuery, DomainError> {
        let scope = match (self.view, self.member_key) {
            (DashboardView::Family, _) => DashboardScope::Family,
            (DashboardView::Individual, Some(key)) => {
                DashboardScope::Individual(AccountMapper::member_key_to_domain(key))
            }
            (DashboardView::Individual, None) => {
                return Err(DomainError::validation(
                    "memberKey is required as 'member1' or 'member2' for individual view",
                ))
            }
        };
        Ok(DashboardQuery {
            scope,
            from: self.from,
            to: self.to,
        })
    }
}

pub async fn get_summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard/summary - query: {:?}", query);

    let dashboard_query = match query.to_domain() {
        Ok(dashboard_query) => dashboard_query,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match state.dashboard_service.summary(&user.account_id, &dashboard_query).await {
        Ok(summary) => (StatusCode::OK, Json(DashboardMapper::to_summary_response(summary))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
