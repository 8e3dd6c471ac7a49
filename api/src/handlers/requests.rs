use food_store::models::requests;
use food_store::{Document, InsertResult};
use serde_json::{Map, Value};

use crate::AppState;
use crate::error::AppError;

#[tracing::instrument(skip_all, fields(filtered = email.is_some()))]
pub async fn list_requests(state: AppState, email: Option<String>) -> Result<Vec<Document>, AppError> {
    let filter = email.map(requests::by_email);
    let found = state.requests.find(filter).await?;
    tracing::debug!(found = found.len(), "looked up food requests");

    Ok(found)
}

#[tracing::instrument(skip_all)]
pub async fn create_request(
    state: AppState,
    request: Map<String, Value>,
) -> Result<InsertResult, AppError> {
    tracing::debug!(fields = request.len(), "recording food request");
    Ok(state.requests.insert(request).await?)
}
