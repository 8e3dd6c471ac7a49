use food_store::models::listings::{self, STATUS_REQUESTED};
use food_store::{
    DeleteResult, Document, DocumentId, InsertResult, ListingFields, UpdateResult,
};
use serde_json::{Map, Value};

use crate::AppState;
use crate::error::AppError;

#[tracing::instrument(skip_all, fields(status = ?status))]
pub async fn list_foods(state: AppState, status: Option<String>) -> Result<Vec<Document>, AppError> {
    let filter = status
        .filter(|status| !status.is_empty())
        .map(listings::by_status);

    let mut foods = state.listings.find(filter).await?;
    listings::sort_by_quantity_desc(&mut foods);

    Ok(foods)
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn get_food(state: AppState, id: &str) -> Result<Option<Document>, AppError> {
    let id: DocumentId = id.parse()?;
    Ok(state.listings.find_by_id(id).await?)
}

#[tracing::instrument(skip_all)]
pub async fn create_food(state: AppState, food: Map<String, Value>) -> Result<InsertResult, AppError> {
    tracing::debug!(fields = food.len(), "creating food listing");
    Ok(state.listings.insert(food).await?)
}

#[tracing::instrument(skip_all)]
pub async fn foods_by_donor(state: AppState, email: String) -> Result<Vec<Document>, AppError> {
    let foods = state.listings.find(Some(listings::by_donor_email(email))).await?;
    tracing::debug!(found = foods.len(), "looked up donor listings");

    Ok(foods)
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn replace_food(
    state: AppState,
    id: &str,
    fields: ListingFields,
) -> Result<UpdateResult, AppError> {
    let id: DocumentId = id.parse()?;
    Ok(state.listings.upsert(id, fields).await?)
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn request_food(state: AppState, id: &str) -> Result<Document, AppError> {
    let id: DocumentId = id.parse()?;

    state
        .listings
        .set_status(id, STATUS_REQUESTED.to_owned())
        .await?
        .ok_or(AppError::NotFound("Food item not found"))
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_food(state: AppState, id: &str) -> Result<DeleteResult, AppError> {
    let id: DocumentId = id.parse()?;
    Ok(state.listings.delete(id).await?)
}
