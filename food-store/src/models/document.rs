use std::str::FromStr;

use derive_more::{Display, Error};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Key under which a document's identifier is serialized.
pub const ID_KEY: &str = "_id";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Display, Error)]
#[display("`{raw}` is not a valid document id")]
pub struct InvalidDocumentId {
    raw: String,
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self).map_err(|_| InvalidDocumentId {
            raw: raw.to_owned(),
        })
    }
}

/// A stored record: a generated id plus whatever fields the client sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Client-supplied `_id` keys are dropped, the store owns identifiers.
    pub fn new(id: DocumentId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_KEY);
        Self { id, fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Walks nested objects, `["donor", "email"]` reads `donor.email`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.fields.get(*first)?, |value, key| value.get(*key))
    }
}

/// Overwrites `updates` onto `fields`, returning whether anything changed.
pub fn merge_fields(fields: &mut Map<String, Value>, updates: Map<String, Value>) -> bool {
    let mut modified = false;

    for (key, value) in updates {
        if fields.get(&key) != Some(&value) {
            fields.insert(key, value);
            modified = true;
        }
    }

    modified
}

/// Exact string equality on a (possibly nested) document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    path: &'static [&'static str],
    value: String,
}

impl FieldMatch {
    pub fn new(path: &'static [&'static str], value: impl Into<String>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }

    pub fn path(&self) -> &'static [&'static str] {
        self.path
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, document: &Document) -> bool {
        document
            .get_path(self.path)
            .and_then(Value::as_str)
            .is_some_and(|value| value == self.value)
    }
}
