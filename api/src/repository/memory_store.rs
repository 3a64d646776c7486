use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use tokio::sync::RwLock;

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, StoreResult,
    UpdateOutcome,
};

/// In-process document store.
///
/// Understands the subset of the MongoDB query language the marketplace
/// issues: top-level field equality, `$eq`/`$ne` operators and `$set`
/// updates. Anything else is rejected with [`StoreError::UnsupportedOperator`].
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<CollectionName, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held by `collection`.
    pub async fn count(&self, collection: CollectionName) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    async fn update(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
        limit: Option<usize>,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(UpdateOutcome::new(0, 0));
        };

        let mut matched = 0;
        let mut modified = 0;
        for document in documents.iter_mut() {
            if limit.is_some_and(|limit| matched >= limit) {
                break;
            }
            if !matches(document, &filter)? {
                continue;
            }
            matched += 1;
            if apply_update(document, &update)? {
                modified += 1;
            }
        }
        Ok(UpdateOutcome::new(matched as u64, modified as u64))
    }
}

fn field_equals(actual: Option<&Bson>, expected: &Bson) -> bool {
    match actual {
        Some(value) => value == expected,
        None => matches!(expected, Bson::Null),
    }
}

fn is_operator_document(value: &Bson) -> Option<&Document> {
    match value {
        Bson::Document(inner) if !inner.is_empty() && inner.keys().all(|k| k.starts_with('$')) => {
            Some(inner)
        }
        _ => None,
    }
}

fn matches(document: &Document, filter: &Document) -> StoreResult<bool> {
    for (field, expected) in filter {
        let actual = document.get(field);
        let Some(operators) = is_operator_document(expected) else {
            if !field_equals(actual, expected) {
                return Ok(false);
            }
            continue;
        };

        for (operator, operand) in operators {
            let satisfied = match operator.as_str() {
                "$eq" => field_equals(actual, operand),
                "$ne" => !field_equals(actual, operand),
                other => return Err(StoreError::UnsupportedOperator(other.to_string())),
            };
            if !satisfied {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Applies an update document in place, returning whether anything changed.
fn apply_update(document: &mut Document, update: &Document) -> StoreResult<bool> {
    let mut modified = false;
    for (operator, fields) in update {
        if operator != "$set" {
            return Err(StoreError::UnsupportedOperator(operator.clone()));
        }
        let Bson::Document(fields) = fields else {
            return Err(StoreError::UnsupportedOperator(format!("{operator} with non-document operand")));
        };
        for (field, value) in fields {
            if document.get(field) != Some(value) {
                document.insert(field.clone(), value.clone());
                modified = true;
            }
        }
    }
    Ok(modified)
}

#[rocket::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: CollectionName, filter: Document) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut found = Vec::new();
        for document in collections.get(&collection).into_iter().flatten() {
            if matches(document, &filter)? {
                found.push(document.clone());
            }
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        for document in collections.get(&collection).into_iter().flatten() {
            if matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut document: Document,
    ) -> StoreResult<InsertOutcome> {
        let id = document
            .remove("_id")
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
        let mut stored = doc! { "_id": id.clone() };
        stored.extend(document);

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.iter().any(|existing| existing.get("_id") == Some(&id)) {
            return Err(StoreError::DuplicateKey {
                collection,
                key: id.to_string(),
            });
        }
        documents.push(stored);
        Ok(InsertOutcome::new(id))
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome> {
        self.update(collection, filter, update, Some(1)).await
    }

    async fn update_many(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome> {
        self.update(collection, filter, update, None).await
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<DeleteOutcome> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteOutcome::new(0));
        };
        let mut position = None;
        for (index, document) in documents.iter().enumerate() {
            if matches(document, &filter)? {
                position = Some(index);
                break;
            }
        }
        match position {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteOutcome::new(1))
            }
            None => Ok(DeleteOutcome::new(0)),
        }
    }
}
