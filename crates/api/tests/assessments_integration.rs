//! Integration tests for assessment endpoints.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use common::*;

#[tokio::test]
async fn test_create_assessment_seeds_one_result_per_control() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;

    let assessment_id = create_test_assessment(&app, &company, framework.framework_id).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/assessments/{}/results", assessment_id),
            &company.api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let results = parse_response_body(response).await;
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 5);
    for result in results {
        assert_eq!(result["status"], "not_implemented");
        assert!(result["evidence"].is_null());
    }
}

#[tokio::test]
async fn test_create_assessment_unknown_framework_not_found() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/assessments",
        serde_json::json!({
            "framework_id": Uuid::new_v4(),
            "name": "No such framework"
        }),
        &company.api_key,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_create_assessment_requires_authentication() {
    let (app, pool) = setup().await;
    let framework = seed_framework(&pool).await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/assessments")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({
                "framework_id": framework.framework_id,
                "name": "Unauthenticated"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_assessment_rejects_blank_name() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/assessments",
        serde_json::json!({
            "framework_id": framework.framework_id,
            "name": ""
        }),
        &company.api_key,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_get_assessment_scoped_to_owning_company() {
    let (app, pool) = setup().await;
    let owner = create_test_company(&pool).await;
    let other = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;

    let assessment_id = create_test_assessment(&app, &owner, framework.framework_id).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/assessments/{}", assessment_id),
            &owner.api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "in_progress");
    assert!(body["score"].is_null());

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/assessments/{}", assessment_id),
            &other.api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_assessment_not_found() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/assessments/{}", Uuid::new_v4()),
            &company.api_key,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_result_converges_on_one_row() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;
    let assessment_id = create_test_assessment(&app, &company, framework.framework_id).await;
    let control_id = framework.controls_a[0];

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/assessments/{}/results/{}", assessment_id, control_id),
        serde_json::json!({
            "status": "implemented",
            "evidence": "Policy doc v2"
        }),
        &company.api_key,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "implemented");
    assert_eq!(body["evidence"], "Policy doc v2");

    // A second edit replaces, it never duplicates.
    set_test_result(&app, &company, assessment_id, control_id, "partially_implemented").await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/assessments/{}/results", assessment_id),
            &company.api_key,
        ))
        .await
        .unwrap();
    let results = parse_response_body(response).await;
    let results = results.as_array().unwrap().clone();
    assert_eq!(results.len(), 5);

    let updated = results
        .iter()
        .find(|r| r["control_id"] == control_id.to_string())
        .unwrap();
    assert_eq!(updated["status"], "partially_implemented");
}

#[tokio::test]
async fn test_update_result_rejects_control_from_other_framework() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;
    let other_framework = seed_framework(&pool).await;
    let assessment_id = create_test_assessment(&app, &company, framework.framework_id).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!(
            "/api/v1/assessments/{}/results/{}",
            assessment_id, other_framework.controls_a[0]
        ),
        serde_json::json!({ "status": "implemented" }),
        &company.api_key,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_result_rejects_unknown_status() {
    let (app, pool) = setup().await;
    let company = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;
    let assessment_id = create_test_assessment(&app, &company, framework.framework_id).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!(
            "/api/v1/assessments/{}/results/{}",
            assessment_id, framework.controls_a[0]
        ),
        serde_json::json!({ "status": "done" }),
        &company.api_key,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_update_result_cross_company_forbidden() {
    let (app, pool) = setup().await;
    let owner = create_test_company(&pool).await;
    let other = create_test_company(&pool).await;
    let framework = seed_framework(&pool).await;
    let assessment_id = create_test_assessment(&app, &owner, framework.framework_id).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!(
            "/api/v1/assessments/{}/results/{}",
            assessment_id, framework.controls_a[0]
        ),
        serde_json::json!({ "status": "implemented" }),
        &other.api_key,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
