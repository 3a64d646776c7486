// src/repository/user_repository.rs
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};

use crate::repository::store::{
    CollectionName, DeleteOutcome, InsertOutcome, StoreHandle, StoreResult, UpdateOutcome,
};

pub struct UserRepository {
    store: StoreHandle,
}

impl UserRepository {
    const COLLECTION: CollectionName = CollectionName::Users;

    pub fn new(store: &StoreHandle) -> Self {
        UserRepository {
            store: store.clone(),
        }
    }

    pub async fn create_user(&self, user: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(Self::COLLECTION, user).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<Document>> {
        let filter = doc! { "email": email };
        self.store.find_one(Self::COLLECTION, filter).await
    }

    /// Users whose stored role equals `role`, e.g. every seller.
    pub async fn find_users_by_role(&self, role: &str) -> StoreResult<Vec<Document>> {
        let filter = doc! { "role": role };
        self.store.find(Self::COLLECTION, filter).await
    }

    // Verification only ever flips to true.
    pub async fn verify_seller(&self, user_id: ObjectId) -> StoreResult<UpdateOutcome> {
        let filter = doc! { "_id": user_id };
        let update = doc! { "$set": { "seller_verify": true } };
        self.store.update_one(Self::COLLECTION, filter, update).await
    }

    pub async fn delete_user(&self, user_id: ObjectId) -> StoreResult<DeleteOutcome> {
        let filter = doc! { "_id": user_id };
        self.store.delete_one(Self::COLLECTION, filter).await
    }
}
