use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};

use crate::repository::store::{
    CollectionName, InsertOutcome, StoreHandle, StoreResult, UpdateOutcome,
};

pub struct BookingRepository {
    store: StoreHandle,
}

impl BookingRepository {
    const COLLECTION: CollectionName = CollectionName::Bookings;

    pub fn new(store: &StoreHandle) -> Self {
        BookingRepository {
            store: store.clone(),
        }
    }

    pub async fn add_booking(&self, booking: Document) -> StoreResult<InsertOutcome> {
        self.store.insert_one(Self::COLLECTION, booking).await
    }

    pub async fn find_bookings_by_email(&self, email: &str) -> StoreResult<Vec<Document>> {
        let filter = doc! { "email": email };
        self.store.find(Self::COLLECTION, filter).await
    }

    pub async fn find_booking_by_id(&self, booking_id: ObjectId) -> StoreResult<Option<Document>> {
        let filter = doc! { "_id": booking_id };
        self.store.find_one(Self::COLLECTION, filter).await
    }

    pub async fn mark_paid(
        &self,
        booking_id: ObjectId,
        transaction_id: &Bson,
    ) -> StoreResult<UpdateOutcome> {
        let filter = doc! { "_id": booking_id };
        let update = doc! {
            "$set": { "paid": true, "transactionId": transaction_id.clone() }
        };
        self.store.update_one(Self::COLLECTION, filter, update).await
    }
}
