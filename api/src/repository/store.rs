use std::fmt;
use std::sync::Arc;

use mongodb::bson::{Bson, Document};
use serde::Serialize;

use crate::models::document::{serialize_bson, serialize_optional_bson};

/// Named collections of the marketplace database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Products,
    Categories,
    Users,
    Bookings,
    Payments,
    AdvertisedItems,
    ReportedItems,
    NewArrivalProducts,
}

impl CollectionName {
    pub const fn as_str(self) -> &'static str {
        match self {
            CollectionName::Products => "products",
            CollectionName::Categories => "categories",
            CollectionName::Users => "users",
            CollectionName::Bookings => "bookings",
            CollectionName::Payments => "payments",
            CollectionName::AdvertisedItems => "advertisedItems",
            CollectionName::ReportedItems => "reportedItems",
            CollectionName::NewArrivalProducts => "newArrivalProducts",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database operation failed: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("unsupported query operator `{0}`")]
    UnsupportedOperator(String),

    #[error("duplicate key {key} in collection {collection}")]
    DuplicateKey { collection: CollectionName, key: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an insert, shaped like the driver acknowledgement clients expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

impl InsertOutcome {
    pub fn new(inserted_id: Bson) -> Self {
        InsertOutcome {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(serialize_with = "serialize_optional_bson")]
    pub upserted_id: Option<Bson>,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        UpdateOutcome {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        DeleteOutcome {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Untyped document storage over named collections.
///
/// Filters are MongoDB query documents and updates are MongoDB update
/// documents. Implementations return the raw documents; nothing is
/// validated or transformed on the way in or out.
#[rocket::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: CollectionName, filter: Document) -> StoreResult<Vec<Document>>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<Option<Document>>;

    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> StoreResult<InsertOutcome>;

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome>;

    async fn update_many(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome>;

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<DeleteOutcome>;
}

/// Shared handle opened once at startup and handed to every repository.
pub type StoreHandle = Arc<dyn DocumentStore>;
