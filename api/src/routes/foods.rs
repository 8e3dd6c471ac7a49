use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use food_store::{DeleteResult, Document, InsertResult, ListingFields, UpdateResult};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::{AppState, handlers};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/{id}",
            get(get_food)
                .put(replace_food)
                .patch(request_food)
                .delete(delete_food),
        )
        .route("/myFood/{email}", get(foods_by_donor))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    status: Option<String>,
}

async fn list_foods(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let foods = handlers::foods::list_foods(state, params.status).await?;
    Ok(Json(foods))
}

async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, AppError> {
    let food = handlers::foods::get_food(state, &id).await?;
    Ok(Json(food))
}

async fn create_food(
    State(state): State<AppState>,
    Json(food): Json<Map<String, Value>>,
) -> Result<Json<InsertResult>, AppError> {
    let result = handlers::foods::create_food(state, food).await?;
    Ok(Json(result))
}

async fn foods_by_donor(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let foods = handlers::foods::foods_by_donor(state, email).await?;
    Ok(Json(foods))
}

async fn replace_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<ListingFields>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = handlers::foods::replace_food(state, &id, fields).await?;
    Ok(Json(result))
}

async fn request_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let food = handlers::foods::request_food(state, &id).await?;
    Ok(Json(food))
}

async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = handlers::foods::delete_food(state, &id).await?;
    Ok(Json(result))
}
