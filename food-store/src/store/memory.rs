//! In-process stores, used for local development and by the test suites.

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{ListingStore, RequestStore, Result};
use crate::BoxFuture;
use crate::models::acknowledgement::{DeleteResult, InsertResult, UpdateResult};
use crate::models::document::{Document, DocumentId, FieldMatch, merge_fields};
use crate::models::listings::{FOOD_STATUS, ListingFields};

#[derive(Debug, Default)]
struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    async fn find(&self, filter: Option<FieldMatch>) -> Vec<Document> {
        let documents = self.documents.read().await;

        documents
            .iter()
            .filter(|document| filter.as_ref().is_none_or(|filter| filter.matches(document)))
            .cloned()
            .collect()
    }

    async fn find_by_id(&self, id: DocumentId) -> Option<Document> {
        let documents = self.documents.read().await;
        documents.iter().find(|document| document.id == id).cloned()
    }

    async fn insert(&self, fields: Map<String, Value>) -> InsertResult {
        let document = Document::new(DocumentId::generate(), fields);
        let id = document.id;

        tracing::debug!(%id, "inserting document");
        self.documents.write().await.push(document);

        InsertResult::new(id)
    }

    async fn upsert(&self, id: DocumentId, updates: Map<String, Value>) -> UpdateResult {
        let mut documents = self.documents.write().await;

        match documents.iter_mut().find(|document| document.id == id) {
            Some(document) => UpdateResult::matched(merge_fields(&mut document.fields, updates)),
            None => {
                documents.push(Document::new(id, updates));
                UpdateResult::upserted(id)
            }
        }
    }

    async fn set_field(&self, id: DocumentId, key: &str, value: Value) -> Option<Document> {
        let mut documents = self.documents.write().await;
        let document = documents.iter_mut().find(|document| document.id == id)?;

        document.fields.insert(key.to_owned(), value);
        Some(document.clone())
    }

    async fn delete(&self, id: DocumentId) -> DeleteResult {
        let mut documents = self.documents.write().await;
        let before = documents.len();

        documents.retain(|document| document.id != id);

        DeleteResult::new((before - documents.len()) as u64)
    }
}

#[derive(Debug, Default)]
pub struct MemoryListingStore {
    collection: MemoryCollection,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListingStore for MemoryListingStore {
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>> {
        Box::pin(async move { Ok(self.collection.find(filter).await) })
    }

    fn find_by_id(&self, id: DocumentId) -> BoxFuture<'_, Result<Option<Document>>> {
        Box::pin(async move { Ok(self.collection.find_by_id(id).await) })
    }

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>> {
        Box::pin(async move { Ok(self.collection.insert(fields).await) })
    }

    fn upsert(
        &self,
        id: DocumentId,
        fields: ListingFields,
    ) -> BoxFuture<'_, Result<UpdateResult>> {
        Box::pin(async move { Ok(self.collection.upsert(id, fields.into_map()).await) })
    }

    fn set_status(
        &self,
        id: DocumentId,
        status: String,
    ) -> BoxFuture<'_, Result<Option<Document>>> {
        Box::pin(async move {
            Ok(self
                .collection
                .set_field(id, FOOD_STATUS, Value::String(status))
                .await)
        })
    }

    fn delete(&self, id: DocumentId) -> BoxFuture<'_, Result<DeleteResult>> {
        Box::pin(async move { Ok(self.collection.delete(id).await) })
    }
}

#[derive(Debug, Default)]
pub struct MemoryRequestStore {
    collection: MemoryCollection,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestStore for MemoryRequestStore {
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>> {
        Box::pin(async move { Ok(self.collection.find(filter).await) })
    }

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>> {
        Box::pin(async move { Ok(self.collection.insert(fields).await) })
    }
}
