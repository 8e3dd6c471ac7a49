pub mod models;
pub mod store;

use std::pin::Pin;

pub use models::acknowledgement::{DeleteResult, InsertResult, UpdateResult};
pub use models::document::{Document, DocumentId, FieldMatch, InvalidDocumentId};
pub use models::listings::ListingFields;
pub use store::{ListingStore, RequestStore, StoreError};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
