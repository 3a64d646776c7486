use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};

use crate::models::product::{is_sold, STATUS_SOLD};
use crate::repository::store::{
    CollectionName, DeleteOutcome, InsertOutcome, StoreHandle, StoreResult, UpdateOutcome,
};

pub struct ProductRepository {
    store: StoreHandle,
}

impl ProductRepository {
    const COLLECTION: CollectionName = CollectionName::Products;

    pub fn new(store: &StoreHandle) -> Self {
        ProductRepository {
            store: store.clone(),
        }
    }

    pub async fn add_product(&self, product: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(Self::COLLECTION, product).await
    }

    /// Products with the given name that are still for sale.
    pub async fn find_available_by_name(&self, name: &str) -> StoreResult<Vec<Document>> {
        let filter = doc! { "name": name };
        let products = self.store.find(Self::COLLECTION, filter).await?;
        Ok(products.into_iter().filter(|p| !is_sold(p)).collect())
    }

    pub async fn find_products_by_seller(&self, email: &str) -> StoreResult<Vec<Document>> {
        let filter = doc! { "sellerEmail": email };
        self.store.find(Self::COLLECTION, filter).await
    }

    pub async fn verify_seller_products(&self, seller_email: &str) -> StoreResult<UpdateOutcome> {
        let filter = doc! { "sellerEmail": seller_email };
        let update = doc! { "$set": { "seller_verify": true } };
        self.store.update_many(Self::COLLECTION, filter, update).await
    }

    pub async fn mark_sold(
        &self,
        product_id: ObjectId,
        transaction_id: &Bson,
    ) -> StoreResult<UpdateOutcome> {
        let filter = doc! { "_id": product_id };
        let update = doc! {
            "$set": { "status": STATUS_SOLD, "transactionId": transaction_id.clone() }
        };
        self.store.update_one(Self::COLLECTION, filter, update).await
    }

    pub async fn delete_product(&self, product_id: ObjectId) -> StoreResult<DeleteOutcome> {
        let filter = doc! { "_id": product_id };
        self.store.delete_one(Self::COLLECTION, filter).await
    }
}
