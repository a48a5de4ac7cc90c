// tests/assessment_api.rs


use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use test_helpers::{create_test_app, send, start_assessment, valid_profile};
use tower::ServiceExt;

#[tokio::test]
async fn test_start_assessment() {
    let app = create_test_app();

    let response = send(&app, "POST", "/api/assessment/start", Some(valid_profile())).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["message"], "Assessment started successfully");
    assert_eq!(body["clientInfo"]["companyName"], "Acme Logistics");
    assert_eq!(body["clientInfo"]["companySize"], "51-200");

    let session_id = body["sessionId"].as_str().unwrap();
    let status = send(&app, "GET", &format!("/api/assessment/{session_id}"), None).await;
    assert_eq!(status.status, StatusCode::OK);

    let status = status.json();
    assert_eq!(status["status"], "in_progress");
    assert_eq!(status["messageCount"], 0);
    assert_eq!(status["currentQuestion"], 0);
    assert_eq!(status["reportTier"], "free");
    assert_eq!(status["hasReport"], false);
    assert!(status["scores"].is_null());
}

#[tokio::test]
async fn test_start_missing_fields() {
    let app = create_test_app();

    let mut profile = valid_profile();
    profile["contactRole"] = json!("");
    let response = send(&app, "POST", "/api/assessment/start", Some(profile)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["error"], true);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Missing required fields");
    assert_eq!(
        body["required"],
        json!(["companyName", "contactName", "contactEmail", "contactRole"])
    );

    // Nothing was created
    let list = send(&app, "GET", "/api/assessment", None).await.json();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_start_invalid_email() {
    let app = create_test_app();

    let mut profile = valid_profile();
    profile["contactEmail"] = json!("sam at acme");
    let response = send(&app, "POST", "/api/assessment/start", Some(profile)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["message"], "Invalid email format");
    assert!(body.get("required").is_none());
}

#[tokio::test]
async fn test_unknown_assessment() {
    let app = create_test_app();

    let response = send(&app, "GET", "/api/assessment/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "Session not found");

    let response = send(&app, "DELETE", "/api/assessment/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = send(&app, "POST", "/api/assessment/does-not-exist/upgrade", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_client_info() {
    let app = create_test_app();
    let session_id = start_assessment(&app).await;
    let uri = format!("/api/assessment/{session_id}/client-info");

    let response = send(&app, "PATCH", &uri, Some(json!({ "contactRole": "COO" }))).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["sessionId"], session_id.as_str());
    assert_eq!(body["clientInfo"]["contactRole"], "COO");
    assert_eq!(body["clientInfo"]["companyName"], "Acme Logistics");

    let response = send(&app, "PATCH", &uri, Some(json!({ "contactEmail": "broken" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "PATCH",
        "/api/assessment/missing/client-info",
        Some(json!({ "contactRole": "COO" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = create_test_app();

    let first = start_assessment(&app).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = start_assessment(&app).await;

    let body = send(&app, "GET", "/api/assessment", None).await.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["assessments"][0]["sessionId"], second.as_str());
    assert_eq!(body["assessments"][1]["sessionId"], first.as_str());
    assert_eq!(body["assessments"][0]["companyName"], "Acme Logistics");
    assert_eq!(body["assessments"][0]["status"], "in_progress");
}

#[tokio::test]
async fn test_delete_assessment() {
    let app = create_test_app();
    let session_id = start_assessment(&app).await;
    let uri = format!("/api/assessment/{session_id}");

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Assessment deleted successfully");

    assert_eq!(send(&app, "GET", &uri, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &uri, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upgrade_requires_report() {
    let app = create_test_app();
    let session_id = start_assessment(&app).await;

    let response = send(&app, "POST", &format!("/api/assessment/{session_id}/upgrade"), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Report not yet generated");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = create_test_app();

    for uri in ["/health", "/api/health"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status, StatusCode::OK);
        let body = response.json();
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header("origin", "https://evil.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_patch_chat_session_requires_profile() {
    let app = create_test_app();
    let body = send(&app, "POST", "/api/chat/sync", Some(json!({ "message": "Hi" })))
        .await
        .json();
    let uri = format!("/api/assessment/{}/client-info", body["sessionId"].as_str().unwrap());

    let response = send(&app, "PATCH", &uri, Some(json!({ "contactRole": "COO" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Missing required fields");

    let response = send(&app, "PATCH", &uri, Some(valid_profile())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["clientInfo"]["companyName"], "Acme Logistics");
}
