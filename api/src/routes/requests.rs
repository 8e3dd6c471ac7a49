use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use food_store::{Document, InsertResult};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::{AppState, handlers};

pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/myFoodRequest", get(list_requests).post(create_request))
        .route("/myFoodRequest/{email}", get(requests_by_email))
}

async fn list_requests(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let requests = handlers::requests::list_requests(state, None).await?;
    Ok(Json(requests))
}

async fn requests_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let requests = handlers::requests::list_requests(state, Some(email)).await?;
    Ok(Json(requests))
}

async fn create_request(
    State(state): State<AppState>,
    Json(request): Json<Map<String, Value>>,
) -> Result<Json<InsertResult>, AppError> {
    let result = handlers::requests::create_request(state, request).await?;
    Ok(Json(result))
}
