mod common;

use api::config::Environment;
use api::services::session::{COOKIE_NAME, SessionService, TOKEN_TTL_DAYS};
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use common::{TEST_SECRET, build_app, build_app_in, send};
use serde_json::json;

fn set_cookie(response: &common::TestResponse) -> &str {
    response
        .headers
        .get(SET_COOKIE)
        .expect("response sets a cookie")
        .to_str()
        .unwrap()
}

fn cookie_value(cookie: &str) -> &str {
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix(&format!("{COOKIE_NAME}=")))
        .expect("cookie is named token")
}

#[tokio::test]
async fn jwt_sets_a_cookie_carrying_the_email() {
    let app = build_app();

    let response = send(&app, "POST", "/jwt", Some(json!({ "email": "a@x.com" }))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let cookie = set_cookie(&response);
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let sessions = SessionService::new(TEST_SECRET, Environment::Development);
    let claims = sessions.decode(cookie_value(cookie)).unwrap();
    assert_eq!(claims.email, "a@x.com");

    let now = chrono::Utc::now().timestamp();
    let year = TOKEN_TTL_DAYS * 24 * 60 * 60;
    assert!((claims.exp - now - year).abs() < 60);
}

#[tokio::test]
async fn production_cookie_is_secure() {
    let app = build_app_in("production");

    let response = send(&app, "POST", "/jwt", Some(json!({ "email": "a@x.com" }))).await;

    let cookie = set_cookie(&response);
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=None"));
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = build_app();

    let response = send(&app, "GET", "/logout", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let cookie = set_cookie(&response);
    assert_eq!(cookie_value(cookie), "");
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn listings_do_not_require_a_session() {
    let app = build_app();

    let response = send(&app, "GET", "/foods", None).await;

    assert_eq!(response.status, StatusCode::OK);
}
