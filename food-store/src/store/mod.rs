pub mod memory;
pub mod postgres;

use derive_more::{Display, Error, From};
use serde_json::{Map, Value};

use crate::BoxFuture;
use crate::models::acknowledgement::{DeleteResult, InsertResult, UpdateResult};
use crate::models::document::{Document, DocumentId, FieldMatch};
use crate::models::listings::ListingFields;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Display, From, Error)]
pub enum StoreError {
    #[from]
    Database(sqlx::Error),
    #[from]
    Migration(sqlx::migrate::MigrateError),
}

/// Food listings posted by donors.
pub trait ListingStore: Send + Sync {
    /// Every listing, or only the ones matching `filter`, in insertion order.
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>>;

    fn find_by_id(&self, id: DocumentId) -> BoxFuture<'_, Result<Option<Document>>>;

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>>;

    /// Overwrites the whitelisted fields, creating the listing under `id` when
    /// nothing matches.
    fn upsert(&self, id: DocumentId, fields: ListingFields)
    -> BoxFuture<'_, Result<UpdateResult>>;

    /// Returns the updated listing, `None` when `id` matched nothing.
    fn set_status(
        &self,
        id: DocumentId,
        status: String,
    ) -> BoxFuture<'_, Result<Option<Document>>>;

    fn delete(&self, id: DocumentId) -> BoxFuture<'_, Result<DeleteResult>>;
}

/// Requests users make for listed food. Append only.
pub trait RequestStore: Send + Sync {
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>>;

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>>;
}
