//! Recording, editing, and deleting wash records end to end.

use axum::http::StatusCode;
use serde_json::{Value, json};

use washlytics_integration_tests::TestApp;

fn wash_body(services: &[&str]) -> Value {
    json!({
        "customerName": "John Doe",
        "carMake": "Toyota",
        "carModel": "Camry",
        "carYear": 2020,
        "carCondition": "Moderately dirty",
        "selectedServices": services,
    })
}

#[tokio::test]
async fn test_staff_records_a_wash_at_catalog_prices() {
    let app = TestApp::new().await;
    let token = app.login_staff().await;

    // basic_wash ($15) + premium_wash ($30)
    let (status, body) = app
        .post(
            "/api/washes",
            Some(&token),
            &wash_body(&["basic_wash", "premium_wash"]),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["totalCost"], "45");
    assert_eq!(body["discountPercentage"], "0");
    assert!(
        body["washId"]
            .as_str()
            .is_some_and(|id| id.starts_with("WASH-"))
    );

    let (status, list) = app.get("/api/washes", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_new_washes_list_newest_first() {
    let app = TestApp::new().await;
    let token = app.login_staff().await;

    let (_, first) = app
        .post("/api/washes", Some(&token), &wash_body(&["basic_wash"]))
        .await;
    let (_, second) = app
        .post("/api/washes", Some(&token), &wash_body(&["tire_shine"]))
        .await;

    let (_, list) = app.get("/api/washes", Some(&token)).await;
    let ids: Vec<&str> = list
        .as_array()
        .expect("list")
        .iter()
        .map(|r| r["washId"].as_str().expect("washId"))
        .collect();
    assert_eq!(
        ids,
        vec![
            second["washId"].as_str().expect("washId"),
            first["washId"].as_str().expect("washId"),
        ]
    );
}

#[tokio::test]
async fn test_owner_edit_applies_discount() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    let (_, created) = app
        .post(
            "/api/washes",
            Some(&staff),
            &wash_body(&["basic_wash", "premium_wash"]),
        )
        .await;
    let id = created["washId"].as_str().expect("washId");

    let mut edit = wash_body(&["basic_wash", "premium_wash"]);
    edit["discountPercentage"] = json!("10");
    let (status, updated) = app
        .put(&format!("/api/washes/{id}"), Some(&owner), &edit)
        .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["totalCost"], "40.5");
    assert_eq!(updated["discountPercentage"], "10");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_staff_cannot_edit_or_delete() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;

    let (_, created) = app
        .post("/api/washes", Some(&staff), &wash_body(&["basic_wash"]))
        .await;
    let id = created["washId"].as_str().expect("washId");

    let (status, _) = app
        .put(
            &format!("/api/washes/{id}"),
            Some(&staff),
            &wash_body(&["basic_wash"]),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&format!("/api/washes/{id}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The record is untouched.
    let (_, list) = app.get("/api/washes", Some(&staff)).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["totalCost"], "15");
}

#[tokio::test]
async fn test_owner_deletes_a_wash() {
    let app = TestApp::new().await;
    let staff = app.login_staff().await;
    let owner = app.login_owner().await;

    let (_, created) = app
        .post("/api/washes", Some(&staff), &wash_body(&["basic_wash"]))
        .await;
    let id = created["washId"].as_str().expect("washId");

    let (status, _) = app.delete(&format!("/api/washes/{id}"), Some(&owner)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&format!("/api/washes/{id}"), Some(&owner)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_failures_list_every_bad_field() {
    let app = TestApp::new().await;
    let token = app.login_staff().await;

    let (status, body) = app
        .post(
            "/api/washes",
            Some(&token),
            &json!({
                "customerName": "J",
                "carMake": "T",
                "carModel": "",
                "carYear": 1850,
                "carCondition": "ok",
                "selectedServices": [],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .map(|f| f["field"].as_str().expect("field"))
        .collect();
    assert!(fields.contains(&"customerName"));
    assert!(fields.contains(&"carMake"));
    assert!(fields.contains(&"carModel"));
    assert!(fields.contains(&"carYear"));
    assert!(fields.contains(&"carCondition"));
    assert!(fields.contains(&"selectedServices"));

    // Nothing was stored.
    let (_, list) = app.get("/api/washes", Some(&token)).await;
    assert_eq!(list.as_array().map(Vec::len), Some(0));
}
