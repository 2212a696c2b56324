//! Integration tests for report share links.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use common::*;

/// Company, framework, assessment, and one report to hang links off.
async fn setup_report() -> (axum::Router, sqlx::PgPool, TestCompany, String) {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;
    let assessment_id = create_test_assessment(&app, &company, framework.framework_id).await;
    set_test_result(&app, &company, assessment_id, framework.controls_a[0], "implemented").await;
    let report = create_test_report(&app, &company, assessment_id).await;
    let report_id = report["id"].as_str().unwrap().to_string();
    (app, pool, company, report_id)
}

#[tokio::test]
async fn test_create_and_resolve_share_link() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link =
        create_test_share_link(&app, &company, &report_id, serde_json::json!({})).await;
    let token = link["share_token"].as_str().unwrap();
    assert!(token.starts_with("shr_"));
    assert_eq!(link["has_password"], false);
    assert_eq!(link["view_count"], 0);
    assert!(link.get("password_hash").is_none());

    // Resolution is public: no Authorization header.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let resolved = parse_response_body(response).await;
    assert_eq!(resolved["id"].as_str().unwrap(), report_id);
    assert!(resolved["report_data"]["summary"]["compliance_score"].is_number());

    // The view was consumed.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/reports/{}/share", report_id),
            &company.api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let links = parse_response_body(response).await;
    assert_eq!(links.as_array().unwrap()[0]["view_count"], 1);
}

#[tokio::test]
async fn test_resolve_unknown_token_not_found() {
    let (app, _pool) = setup().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/reports/share/shr_doesnotexist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_protected_link_gates() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({ "password": "s3cret" }),
    )
    .await;
    let token = link["share_token"].as_str().unwrap();
    assert_eq!(link["has_password"], true);

    // Missing password: 401 password_required.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "password_required");

    // Wrong password: 401 invalid_password.
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/reports/share/{}?password=guess",
            token
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "invalid_password");

    // Failed password attempts never consume views; the correct password
    // resolves with the full quota intact.
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/reports/share/{}?password=s3cret",
            token
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/reports/{}/share", report_id),
            &company.api_key,
        ))
        .await
        .unwrap();
    let links = parse_response_body(response).await;
    assert_eq!(links.as_array().unwrap()[0]["view_count"], 1);
}

#[tokio::test]
async fn test_view_limit_enforced() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({ "max_views": 1 }),
    )
    .await;
    let token = link["share_token"].as_str().unwrap();
    assert_eq!(link["remaining_views"], 1);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "view_limit_exceeded");
}

#[tokio::test]
async fn test_expired_link_denied_before_password() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({
            "password": "s3cret",
            "expires_at": Utc::now() - Duration::hours(1)
        }),
    )
    .await;
    let token = link["share_token"].as_str().unwrap();

    // Expired wins over the password gate even when no password is sent.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "share_link_expired");
}

#[tokio::test]
async fn test_deactivation_is_idempotent_and_wins_over_other_gates() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({ "password": "s3cret" }),
    )
    .await;
    let link_id = link["id"].as_str().unwrap();
    let token = link["share_token"].as_str().unwrap();

    let deactivate_uri = format!("/api/v1/reports/share/{}/deactivate", link_id);
    let request = json_request_with_auth(
        Method::POST,
        &deactivate_uri,
        serde_json::json!({}),
        &company.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["is_active"], false);

    // Deactivated reports deactivated, even without a password.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/reports/share/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "share_link_deactivated");

    // Deactivating again still succeeds.
    let request = json_request_with_auth(
        Method::POST,
        &deactivate_uri,
        serde_json::json!({}),
        &company.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn test_deactivate_cross_company_forbidden() {
    let (app, pool, company, report_id) = setup_report().await;
    let other = create_test_company(&pool).await;

    let link =
        create_test_share_link(&app, &company, &report_id, serde_json::json!({})).await;
    let link_id = link["id"].as_str().unwrap();

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/share/{}/deactivate", link_id),
        serde_json::json!({}),
        &other.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_share_link_cross_company_forbidden() {
    let (app, pool, _company, report_id) = setup_report().await;
    let other = create_test_company(&pool).await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/share", report_id),
        serde_json::json!({}),
        &other.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_share_link_rejects_zero_max_views() {
    let (app, _pool, company, report_id) = setup_report().await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/share", report_id),
        serde_json::json!({ "max_views": 0 }),
        &company.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_multiple_links_are_independent() {
    let (app, _pool, company, report_id) = setup_report().await;

    let first =
        create_test_share_link(&app, &company, &report_id, serde_json::json!({})).await;
    let second = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({ "max_views": 1 }),
    )
    .await;
    assert_ne!(first["share_token"], second["share_token"]);

    // Exhausting the second leaves the first resolvable.
    let second_token = second["share_token"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/reports/share/{}",
            second_token
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let first_token = first["share_token"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/reports/share/{}",
            first_token
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_resolutions_respect_view_limit() {
    let (app, _pool, company, report_id) = setup_report().await;

    let link = create_test_share_link(
        &app,
        &company,
        &report_id,
        serde_json::json!({ "max_views": 1 }),
    )
    .await;
    let token = link["share_token"].as_str().unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let app = app.clone();
        let uri = format!("/api/v1/reports/share/{}", token);
        handles.push(tokio::spawn(async move {
            let response = app.oneshot(get_request(&uri)).await.unwrap();
            response.status()
        }));
    }

    let mut ok = 0;
    let mut denied = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        if status == StatusCode::OK {
            ok += 1;
        } else if status == StatusCode::FORBIDDEN {
            denied += 1;
        } else {
            panic!("unexpected status {}", status);
        }
    }
    assert_eq!(ok, 1, "exactly one resolution may consume the last view");
    assert_eq!(denied, 49);
}
