use axum::Router;
use axum::routing::get;

use crate::AppState;

pub mod auth;
pub mod foods;
pub mod requests;

pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(foods::food_routes())
        .merge(requests::request_routes())
        .merge(auth::auth_routes())
}

async fn root() -> &'static str {
    "food is running"
}
