mod common;

use axum::http::StatusCode;
use common::{build_app, send};
use serde_json::json;

#[tokio::test]
async fn created_requests_are_listed() {
    let app = build_app();

    let created = send(
        &app,
        "POST",
        "/myFoodRequest",
        Some(json!({ "email": "a@x.com", "food_name": "Rice", "request_note": "tonight" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["acknowledged"], json!(true));

    let response = send(&app, "GET", "/myFoodRequest", None).await;

    let requests = response.body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["_id"], created.body["insertedId"]);
    assert_eq!(requests[0]["request_note"], json!("tonight"));
}

#[tokio::test]
async fn requests_filter_by_requester_email() {
    let app = build_app();
    for (email, food) in [("a@x.com", "Rice"), ("b@x.com", "Beans"), ("a@x.com", "Soup")] {
        send(
            &app,
            "POST",
            "/myFoodRequest",
            Some(json!({ "email": email, "food_name": food })),
        )
        .await;
    }

    let response = send(&app, "GET", "/myFoodRequest/a@x.com", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let foods: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|request| request["food_name"].as_str().unwrap())
        .collect();
    assert_eq!(foods, ["Rice", "Soup"]);
}

#[tokio::test]
async fn unknown_requester_has_no_requests() {
    let app = build_app();

    let response = send(&app, "GET", "/myFoodRequest/nobody@x.com", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn requests_and_listings_are_separate_collections() {
    let app = build_app();
    send(
        &app,
        "POST",
        "/myFoodRequest",
        Some(json!({ "email": "a@x.com", "food_name": "Rice" })),
    )
    .await;

    let listings = send(&app, "GET", "/foods", None).await;

    assert_eq!(listings.body, json!([]));
}
