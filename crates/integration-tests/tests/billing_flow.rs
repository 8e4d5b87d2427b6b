//! Billing change requests end to end: filing, notification fan-out, and
//! owner resolution.

use axum::http::StatusCode;
use serde_json::json;

use washlytics_integration_tests::TestApp;

fn request_body() -> serde_json::Value {
    json!({
        "washId": "WASH-1724500000000-ABC12",
        "requestDetails": "Customer was double charged for the wax service.",
    })
}

#[tokio::test]
async fn test_staff_files_a_request_and_owner_is_notified() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    let (status, request) = app
        .post("/api/billing-requests", Some(&staff), &request_body())
        .await;
    assert_eq!(status, StatusCode::CREATED, "{request}");
    assert_eq!(request["status"], "pending");
    assert_eq!(request["staffId"], "staff-001");
    assert_eq!(request["staffName"], "Staff Member");
    assert!(
        request["id"]
            .as_str()
            .is_some_and(|id| id.starts_with("BR-"))
    );

    // Exactly one broadcast to the owner role, none to the filer.
    let (_, owner_notifications) = app.get("/api/notifications", Some(&owner)).await;
    let owner_notifications = owner_notifications.as_array().expect("array").clone();
    assert_eq!(owner_notifications.len(), 1);
    let notification = &owner_notifications[0];
    assert_eq!(notification["roleTarget"], "owner");
    assert_eq!(notification["read"], false);
    assert!(
        notification["message"]
            .as_str()
            .is_some_and(|m| m.contains("Staff Member") && m.contains("WASH-1724500000000-ABC12"))
    );

    let (_, staff_notifications) = app.get("/api/notifications", Some(&staff)).await;
    assert_eq!(staff_notifications.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_owner_approval_notifies_the_filer() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    let (_, request) = app
        .post("/api/billing-requests", Some(&staff), &request_body())
        .await;
    let id = request["id"].as_str().expect("id");

    let (status, resolved) = app
        .post(
            &format!("/api/billing-requests/{id}/status"),
            Some(&owner),
            &json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{resolved}");
    assert_eq!(resolved["status"], "approved");

    let (_, staff_notifications) = app.get("/api/notifications", Some(&staff)).await;
    let staff_notifications = staff_notifications.as_array().expect("array").clone();
    assert_eq!(staff_notifications.len(), 1);
    let notification = &staff_notifications[0];
    assert_eq!(notification["userId"], "staff-001");
    assert!(
        notification["message"]
            .as_str()
            .is_some_and(|m| m.contains("approved"))
    );
}

#[tokio::test]
async fn test_resolved_requests_are_terminal() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    let (_, request) = app
        .post("/api/billing-requests", Some(&staff), &request_body())
        .await;
    let id = request["id"].as_str().expect("id");

    let path = format!("/api/billing-requests/{id}/status");
    let (status, _) = app
        .post(&path, Some(&owner), &json!({ "status": "rejected" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(&path, Some(&owner), &json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.get("/api/billing-requests", Some(&owner)).await;
    assert_eq!(list[0]["status"], "rejected");
}

#[tokio::test]
async fn test_role_gates_on_billing() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    // Owners cannot file requests.
    let (status, _) = app
        .post("/api/billing-requests", Some(&owner), &request_body())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, list) = app.get("/api/billing-requests", Some(&owner)).await;
    assert_eq!(list.as_array().map(Vec::len), Some(0));

    // Staff cannot resolve them.
    let (_, request) = app
        .post("/api/billing-requests", Some(&staff), &request_body())
        .await;
    let id = request["id"].as_str().expect("id");

    let (status, _) = app
        .post(
            &format!("/api/billing-requests/{id}/status"),
            Some(&staff),
            &json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, list) = app.get("/api/billing-requests", Some(&staff)).await;
    assert_eq!(list[0]["status"], "pending");
}

#[tokio::test]
async fn test_request_details_must_be_substantive() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;

    let (status, body) = app
        .post(
            "/api/billing-requests",
            Some(&staff),
            &json!({ "washId": "", "requestDetails": "short" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(2));
}
