//! # REST API for Receipt Parsing
//!
//! The client runs OCR and posts the extracted text; the response is a draft
//! transaction for the user to review. Nothing is stored.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use chrono::Utc;
use tracing::info;

use crate::domain::receipt_parser;
use crate::io::rest::auth::AuthenticatedUser;
use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::receipt_mapper::ReceiptMapper;
use crate::AppState;
use shared::ParseReceiptRequest;

/// Create a router for receipt APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/parse", post(parse_receipt))
}

pub async fn parse_receipt(user: AuthenticatedUser, Json(request): Json<ParseReceiptRequest>) -> impl IntoResponse {
    info!("POST /api/receipts/parse - account: {}, {} chars", user.account_id, request.text.len());

    match receipt_parser::parse(&request.text, Utc::now().date_naive()) {
        Ok(draft) => (StatusCode::OK, Json(ReceiptMapper::to_parse_response(draft, request.text))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
