use mongodb::bson::{doc, Document};

use crate::repository::store::{
    CollectionName, DeleteOutcome, InsertOutcome, StoreHandle, StoreResult,
};

pub struct ReportRepository {
    store: StoreHandle,
}

impl ReportRepository {
    const COLLECTION: CollectionName = CollectionName::ReportedItems;

    pub fn new(store: &StoreHandle) -> Self {
        ReportRepository {
            store: store.clone(),
        }
    }

    pub async fn add_report(&self, report: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(Self::COLLECTION, report).await
    }

    pub async fn get_all_reports(&self) -> StoreResult<Vec<Document>> {
        self.store.find(Self::COLLECTION, Document::new()).await
    }

    pub async fn find_report(&self, item_id: &str) -> StoreResult<Option<Document>> {
        let filter = doc! { "id": item_id };
        self.store.find_one(Self::COLLECTION, filter).await
    }

    pub async fn delete_report(&self, item_id: &str) -> StoreResult<DeleteOutcome> {
        let filter = doc! { "id": item_id };
        self.store.delete_one(Self::COLLECTION, filter).await
    }
}
