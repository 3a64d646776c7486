use mongodb::bson::Document;

use crate::repository::store::{CollectionName, InsertOutcome, StoreHandle, StoreResult};

/// Append-only log of settled payments.
pub struct PaymentRepository {
    store: StoreHandle,
}

impl PaymentRepository {
    pub fn new(store: &StoreHandle) -> Self {
        PaymentRepository {
            store: store.clone(),
        }
    }

    pub async fn add_payment(&self, payment: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(CollectionName::Payments, payment).await
    }
}
