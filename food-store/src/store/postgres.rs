//! Postgres backed stores. Each collection is a table of JSONB documents,
//! `seq` keeps insertion order for listing queries.

use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::prelude::FromRow;
use sqlx::types::{Json, Uuid};

use super::{ListingStore, RequestStore, Result};
use crate::BoxFuture;
use crate::models::acknowledgement::{DeleteResult, InsertResult, UpdateResult};
use crate::models::document::{Document, DocumentId, FieldMatch, merge_fields};
use crate::models::listings::{FOOD_STATUS, ListingFields};

pub const LISTINGS_TABLE: &str = "food_listings";
pub const REQUESTS_TABLE: &str = "food_requests";

pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id.into(), row.doc.0)
    }
}

fn json_path(path: &[&str]) -> Vec<String> {
    path.iter().map(|key| key.to_string()).collect()
}

#[derive(Debug, Clone)]
struct PgCollection {
    pool: PgPool,
    table: &'static str,
}

impl PgCollection {
    async fn find(&self, filter: Option<FieldMatch>) -> Result<Vec<Document>> {
        let rows = match filter {
            Some(filter) => {
                let query = format!(
                    "SELECT id, doc FROM {} WHERE doc #> $1 = to_jsonb($2::text) ORDER BY seq",
                    self.table
                );
                sqlx::query_as::<_, DocumentRow>(&query)
                    .bind(json_path(filter.path()))
                    .bind(filter.value())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("SELECT id, doc FROM {} ORDER BY seq", self.table);
                sqlx::query_as::<_, DocumentRow>(&query)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>> {
        let query = format!("SELECT id, doc FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn insert(&self, fields: Map<String, Value>) -> Result<InsertResult> {
        let document = Document::new(DocumentId::generate(), fields);

        let query = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table);
        sqlx::query(&query)
            .bind(document.id.as_uuid())
            .bind(Json(&document.fields))
            .execute(&self.pool)
            .await?;

        Ok(InsertResult::new(document.id))
    }

    async fn upsert(&self, id: DocumentId, updates: Map<String, Value>) -> Result<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT id, doc FROM {} WHERE id = $1 FOR UPDATE", self.table);
        let existing = sqlx::query_as::<_, DocumentRow>(&select)
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        let result = match existing {
            Some(row) => {
                let mut fields = row.doc.0;
                let modified = merge_fields(&mut fields, updates);

                if modified {
                    let update = format!(
                        "UPDATE {} SET doc = $2, updated_at = NOW() WHERE id = $1",
                        self.table
                    );
                    sqlx::query(&update)
                        .bind(id.as_uuid())
                        .bind(Json(&fields))
                        .execute(&mut *tx)
                        .await?;
                }

                UpdateResult::matched(modified)
            }
            None => {
                // a concurrent upsert may have created the row since the select
                let insert = format!(
                    r#"
                    INSERT INTO {table} (id, doc)
                    VALUES ($1, $2)
                    ON CONFLICT (id) DO UPDATE SET
                        doc = {table}.doc || EXCLUDED.doc,
                        updated_at = NOW();
                    "#,
                    table = self.table
                );
                sqlx::query(&insert)
                    .bind(id.as_uuid())
                    .bind(Json(&updates))
                    .execute(&mut *tx)
                    .await?;

                UpdateResult::upserted(id)
            }
        };

        tx.commit().await?;

        Ok(result)
    }

    async fn set_field(&self, id: DocumentId, key: &str, value: Value) -> Result<Option<Document>> {
        let query = format!(
            r#"
            UPDATE {}
            SET doc = jsonb_set(doc, $2, $3), updated_at = NOW()
            WHERE id = $1
            RETURNING id, doc;
            "#,
            self.table
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id.as_uuid())
            .bind(json_path(&[key]))
            .bind(Json(value))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn delete(&self, id: DocumentId) -> Result<DeleteResult> {
        let query = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&query)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}

#[derive(Debug, Clone)]
pub struct PgListingStore {
    collection: PgCollection,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            collection: PgCollection {
                pool,
                table: LISTINGS_TABLE,
            },
        }
    }
}

impl ListingStore for PgListingStore {
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>> {
        Box::pin(self.collection.find(filter))
    }

    fn find_by_id(&self, id: DocumentId) -> BoxFuture<'_, Result<Option<Document>>> {
        Box::pin(self.collection.find_by_id(id))
    }

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>> {
        Box::pin(self.collection.insert(fields))
    }

    fn upsert(
        &self,
        id: DocumentId,
        fields: ListingFields,
    ) -> BoxFuture<'_, Result<UpdateResult>> {
        Box::pin(self.collection.upsert(id, fields.into_map()))
    }

    fn set_status(
        &self,
        id: DocumentId,
        status: String,
    ) -> BoxFuture<'_, Result<Option<Document>>> {
        Box::pin(async move {
            self.collection
                .set_field(id, FOOD_STATUS, Value::String(status))
                .await
        })
    }

    fn delete(&self, id: DocumentId) -> BoxFuture<'_, Result<DeleteResult>> {
        Box::pin(self.collection.delete(id))
    }
}

#[derive(Debug, Clone)]
pub struct PgRequestStore {
    collection: PgCollection,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            collection: PgCollection {
                pool,
                table: REQUESTS_TABLE,
            },
        }
    }
}

impl RequestStore for PgRequestStore {
    fn find(&self, filter: Option<FieldMatch>) -> BoxFuture<'_, Result<Vec<Document>>> {
        Box::pin(self.collection.find(filter))
    }

    fn insert(&self, fields: Map<String, Value>) -> BoxFuture<'_, Result<InsertResult>> {
        Box::pin(self.collection.insert(fields))
    }
}
