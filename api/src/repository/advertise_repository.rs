use mongodb::bson::{doc, Bson, Document};

use crate::models::product::STATUS_SOLD;
use crate::repository::store::{
    CollectionName, DeleteOutcome, InsertOutcome, StoreHandle, StoreResult, UpdateOutcome,
};

/// Advertised items reference their product through a plain string `id`,
/// not through the product's ObjectId.
pub struct AdvertiseRepository {
    store: StoreHandle,
}

impl AdvertiseRepository {
    const COLLECTION: CollectionName = CollectionName::AdvertisedItems;

    pub fn new(store: &StoreHandle) -> Self {
        AdvertiseRepository {
            store: store.clone(),
        }
    }

    pub async fn add_item(&self, item: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(Self::COLLECTION, item).await
    }

    pub async fn find_unsold_items(&self) -> StoreResult<Vec<Document>> {
        let filter = doc! { "status": { "$ne": STATUS_SOLD } };
        self.store.find(Self::COLLECTION, filter).await
    }

    pub async fn mark_sold(&self, product_id: &str, transaction_id: &Bson) -> StoreResult<UpdateOutcome> {
        let filter = doc! { "id": product_id };
        let update = doc! {
            "$set": { "status": STATUS_SOLD, "transactionId": transaction_id.clone() }
        };
        self.store.update_one(Self::COLLECTION, filter, update).await
    }

    pub async fn delete_item(&self, product_id: &str) -> StoreResult<DeleteOutcome> {
        let filter = doc! { "id": product_id };
        self.store.delete_one(Self::COLLECTION, filter).await
    }
}
