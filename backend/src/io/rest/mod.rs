//! # REST API Interface Layer
//!
//! One module per resource, each exposing a `router()` nested under `/api`.
//! Every route except `auth/register` and `auth/login` requires a bearer
//! token, enforced by the [`AuthenticatedUser`](auth::AuthenticatedUser)
//! extractor. Resources are always scoped to the caller's account.

pub mod auth;
pub mod auth_apis;
pub mod budget_apis;
pub mod dashboard_apis;
pub mod error;
pub mod goal_apis;
pub mod mappers;
pub mod receipt_apis;
pub mod transaction_apis;

use axum::Router;

use crate::AppState;

/// All `/api` routes, before state and middleware are attached
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_apis::router())
        .nest("/transactions", transaction_apis::router())
        .nest("/dashboard", dashboard_apis::router())
        .nest("/budgets", budget_apis::router())
        .nest("/goals", goal_apis::router())
        .nest("/receipts", receipt_apis::router())
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::storage::DbConnection;
    use crate::{create_router, AppState};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt; // for `oneshot`

    async fn setup_test_app() -> Router {
        let config = AppConfig::for_test();
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        create_router(AppState::new(db, &config), &config).expect("Failed to build router")
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };
        (status, value)
    }

    async fn register(app: &Router, email: &str, member2: Option<&str>) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "sam",
                "email": email,
                "password": "hunter22",
                "member1Name": "Sam",
                "member2Name": member2,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let app = setup_test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_protected_routes_require_valid_token() {
        let app = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/transactions", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_login_and_profile() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", Some("Alice")).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "other",
                "email": "SAM@example.com",
                "password": "hunter22",
                "member1Name": "Other",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Email already in use");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "sam@example.com", "password": "nope-nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "sam@example.com");
        assert!(body["user"].get("passwordHash").is_none());
        assert_eq!(body["account"]["members"][1]["key"], "member2");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/auth/profile",
            Some(&token),
            Some(json!({"username": "Samuel"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "Samuel");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/change-password",
            Some(&token),
            Some(json!({"oldPassword": "wrong-one", "newPassword": "brand-new"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_member_roster_update() {
        let app = setup_test_app().await;
        let token = register(&app, "solo@example.com", None).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/auth/members",
            Some(&token),
            Some(json!({"members": [{"key": "member2", "name": "Alice"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["members"].as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/auth/members",
            Some(&token),
            Some(json!({"members": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_split_transaction_flow() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", Some("Alice")).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "memberKey": "member1",
                "amount": 90,
                "type": "expense",
                "category": "Food",
                "date": "2024-01-05",
                "notes": "Dinner",
                "splitWith": ["Alice", "Bob"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let rows = body["transactions"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["memberKey"], "member1");
        assert_eq!(rows[0]["amount"], 60.0);
        assert_eq!(rows[1]["memberKey"], "member2");
        assert_eq!(rows[1]["amount"], 30.0);
        assert_eq!(body["unresolvedParticipants"], json!(["Bob"]));

        let (status, body) = send(&app, Method::GET, "/api/transactions?memberKey=member2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/dashboard/summary", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["expense"], 90.0);
        assert_eq!(body["totals"]["net"], -90.0);
        assert_eq!(body["byCategory"][0]["category"], "Food");

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/dashboard/summary?view=individual",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("memberKey"));
    }

    #[tokio::test]
    async fn test_amount_limits_keep_dashboard_consistent() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", Some("Alice")).await;
        let entry = |amount: f64, split_with: Vec<&str>| {
            json!({
                "memberKey": "member1",
                "amount": amount,
                "type": "income",
                "category": "Salary",
                "date": "2024-01-05",
                "splitWith": split_with,
            })
        };

        let (status, body) = send(&app, Method::POST, "/api/transactions", Some(&token), Some(entry(9.0e16, vec![]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("cannot exceed"));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(entry(0.01, vec!["Alice"])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/transactions",
                Some(&token),
                Some(entry(1_000_000_000.0, vec![])),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, Method::GET, "/api/dashboard/summary", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["income"], 2_000_000_000.0);
    }

    #[tokio::test]
    async fn test_transaction_edit_delete_and_isolation() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", None).await;
        let intruder = register(&app, "eve@example.com", None).await;

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "memberKey": "member1",
                "amount": 1200,
                "type": "income",
                "category": "Salary",
                "date": "2024-01-01",
            })),
        )
        .await;
        let id = body["transactions"][0]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/transactions/{}", id);

        let (status, _) = send(&app, Method::GET, &uri, Some(&intruder), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "memberKey": "member1",
                "amount": 1250.5,
                "type": "income",
                "category": "Salary",
                "date": "2024-01-02",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], 1250.5);

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Deleted", "id": id}));

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_csv_export() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", None).await;
        send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "memberKey": "member1",
                "amount": 12.5,
                "type": "expense",
                "category": "Food",
                "date": "2024-03-01",
            })),
        )
        .await;

        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/transactions/export")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"transactions_"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,member,type,category,amount,notes,split_with"));
        assert!(lines.next().unwrap().starts_with("2024-03-01,Sam,expense,Food,12.50"));
    }

    #[tokio::test]
    async fn test_budget_and_goal_endpoints() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", Some("Alice")).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/budgets",
            Some(&token),
            Some(json!({"memberKey": "member2", "category": "Food", "amount": 50})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["period"], "monthly");
        assert_eq!(body["status"], "on_track");
        let budget_id = body["id"].as_str().unwrap().to_string();

        send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "memberKey": "member2",
                "amount": 45,
                "type": "expense",
                "category": "Food",
                "date": "2024-01-05",
            })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/budgets?memberKey=member2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["spent"], 45.0);
        assert_eq!(body[0]["remaining"], 5.0);
        assert_eq!(body[0]["status"], "warning");

        let (_, body) = send(&app, Method::GET, "/api/budgets?memberKey=family", Some(&token), None).await;
        assert_eq!(body.as_array().unwrap().len(), 0);

        let (status, _) = send(&app, Method::GET, "/api/budgets?memberKey=member9", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/budgets/{}", budget_id),
            Some(&token),
            Some(json!({"amount": 40})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "over");

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/budgets/{}", budget_id),
            Some(&token),
            Some(json!({"memberKey": null, "startDate": "2024-02-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["memberKey"].is_null());
        assert_eq!(body["spent"], 0.0);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/budgets/{}", budget_id),
            Some(&token),
            Some(json!({"startDate": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["spent"], 45.0);
        let (_, body) = send(&app, Method::GET, "/api/budgets?memberKey=family", Some(&token), None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/goals",
            Some(&token),
            Some(json!({"name": "Trip", "targetAmount": 0, "deadline": "2025-06-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/goals",
            Some(&token),
            Some(json!({"name": "Trip", "targetAmount": 1000, "currentAmount": 250, "deadline": "2025-06-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["progressPercent"], 25.0);
        let goal_uri = format!("/api/goals/{}", body["id"].as_str().unwrap());

        let (_, body) = send(&app, Method::GET, "/api/goals", Some(&token), None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &goal_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::PUT, &goal_uri, Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_receipt_parse() {
        let app = setup_test_app().await;
        let token = register(&app, "sam@example.com", None).await;

        let text = "Fresh Mart Grocery\n12/03/2024\nMilk 45.00\nTOTAL Rs 1,234.50\n";
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/receipts/parse",
            Some(&token),
            Some(json!({"text": text})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transaction"]["amount"], 1234.5);
        assert_eq!(body["transaction"]["date"], "2024-03-12");
        assert_eq!(body["transaction"]["type"], "expense");
        assert_eq!(body["rawText"], text);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/receipts/parse",
            Some(&token),
            Some(json!({"text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
