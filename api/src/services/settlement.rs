//! Payment settlement across products, advertisements, bookings and payments.
//!
//! The four writes run one after another with no transaction around them. A
//! failed update is logged and the sequence carries on, so a settlement can
//! be partially applied. Nothing deduplicates repeated submissions: every
//! call appends a payment record.

use mongodb::bson::oid::ObjectId;

use crate::models::payment::SettlementRequest;
use crate::repository::advertise_repository::AdvertiseRepository;
use crate::repository::booking_repository::BookingRepository;
use crate::repository::payment_repository::PaymentRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::store::{InsertOutcome, StoreError, StoreResult, UpdateOutcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StepOutcome = Result<UpdateOutcome, StepError>;

#[derive(Debug)]
pub struct SettlementReport {
    pub product: StepOutcome,
    pub advertisement: StepOutcome,
    pub booking: StepOutcome,
    pub payment: InsertOutcome,
}

impl SettlementReport {
    pub fn is_complete(&self) -> bool {
        [&self.product, &self.advertisement, &self.booking]
            .iter()
            .all(|step| step.as_ref().is_ok_and(|outcome| outcome.matched_count > 0))
    }
}

pub struct Settlement<'a> {
    products: &'a ProductRepository,
    adverts: &'a AdvertiseRepository,
    bookings: &'a BookingRepository,
    payments: &'a PaymentRepository,
}

fn object_id(id: &str) -> Result<ObjectId, StepError> {
    ObjectId::parse_str(id).map_err(|_| StepError::InvalidId(id.to_string()))
}

fn record(step: &'static str, outcome: StepOutcome) -> StepOutcome {
    match &outcome {
        Ok(update) if update.matched_count == 0 => {
            tracing::warn!(step, "settlement step matched no document");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(step, error = %e, "settlement step failed, continuing"),
    }
    outcome
}

impl<'a> Settlement<'a> {
    pub fn new(
        products: &'a ProductRepository,
        adverts: &'a AdvertiseRepository,
        bookings: &'a BookingRepository,
        payments: &'a PaymentRepository,
    ) -> Self {
        Settlement {
            products,
            adverts,
            bookings,
            payments,
        }
    }

    /// Runs the settlement for `product_id`. Only the final payment insert
    /// can fail the call.
    pub async fn settle(
        &self,
        product_id: &str,
        request: SettlementRequest,
    ) -> StoreResult<SettlementReport> {
        let SettlementRequest {
            order_id,
            transaction_id,
            payment,
        } = request;

        let product = match object_id(product_id) {
            Ok(id) => self
                .products
                .mark_sold(id, &transaction_id)
                .await
                .map_err(StepError::from),
            Err(e) => Err(e),
        };
        let product = record("mark_product_sold", product);

        let advertisement = self
            .adverts
            .mark_sold(product_id, &transaction_id)
            .await
            .map_err(StepError::from);
        let advertisement = record("mirror_advertisement", advertisement);

        let booking = match object_id(&order_id) {
            Ok(id) => self
                .bookings
                .mark_paid(id, &transaction_id)
                .await
                .map_err(StepError::from),
            Err(e) => Err(e),
        };
        let booking = record("mark_booking_paid", booking);

        let payment = self.payments.add_payment(payment).await?;

        let report = SettlementReport {
            product,
            advertisement,
            booking,
            payment,
        };
        tracing::info!(
            product_id,
            order_id = %order_id,
            complete = report.is_complete(),
            "payment settled"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mongodb::bson::{doc, Bson, Document};

    use super::*;
    use crate::repository::memory_store::MemoryStore;
    use crate::repository::store::{CollectionName, DeleteOutcome, DocumentStore, StoreHandle};

    struct Fixture {
        store: Arc<MemoryStore>,
        products: ProductRepository,
        adverts: AdvertiseRepository,
        bookings: BookingRepository,
        payments: PaymentRepository,
    }

    /// Delegates to a memory store but fails every update on `broken`.
    struct BrokenUpdates {
        inner: Arc<MemoryStore>,
        broken: Vec<CollectionName>,
    }

    impl BrokenUpdates {
        fn check(&self, collection: CollectionName) -> StoreResult<()> {
            if self.broken.contains(&collection) {
                Err(StoreError::UnsupportedOperator(format!("{} unavailable", collection.as_str())))
            } else {
                Ok(())
            }
        }
    }

    #[rocket::async_trait]
    impl DocumentStore for BrokenUpdates {
        async fn find(&self, collection: CollectionName, filter: Document) -> StoreResult<Vec<Document>> {
            self.inner.find(collection, filter).await
        }

        async fn find_one(
            &self,
            collection: CollectionName,
            filter: Document,
        ) -> StoreResult<Option<Document>> {
            self.inner.find_one(collection, filter).await
        }

        async fn insert_one(
            &self,
            collection: CollectionName,
            document: Document,
        ) -> StoreResult<InsertOutcome> {
            self.inner.insert_one(collection, document).await
        }

        async fn update_one(
            &self,
            collection: CollectionName,
            filter: Document,
            update: Document,
        ) -> StoreResult<UpdateOutcome> {
            self.check(collection)?;
            self.inner.update_one(collection, filter, update).await
        }

        async fn update_many(
            &self,
            collection: CollectionName,
            filter: Document,
            update: Document,
        ) -> StoreResult<UpdateOutcome> {
            self.check(collection)?;
            self.inner.update_many(collection, filter, update).await
        }

        async fn delete_one(
            &self,
            collection: CollectionName,
            filter: Document,
        ) -> StoreResult<DeleteOutcome> {
            self.inner.delete_one(collection, filter).await
        }
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let handle: StoreHandle = store.clone();
            Self::over(store, handle)
        }

        fn with_broken_updates(broken: Vec<CollectionName>) -> Self {
            let store = Arc::new(MemoryStore::new());
            let handle: StoreHandle = Arc::new(BrokenUpdates {
                inner: store.clone(),
                broken,
            });
            Self::over(store, handle)
        }

        fn over(store: Arc<MemoryStore>, handle: StoreHandle) -> Self {
            Fixture {
                products: ProductRepository::new(&handle),
                adverts: AdvertiseRepository::new(&handle),
                bookings: BookingRepository::new(&handle),
                payments: PaymentRepository::new(&handle),
                store,
            }
        }

        fn settlement(&self) -> Settlement<'_> {
            Settlement::new(&self.products, &self.adverts, &self.bookings, &self.payments)
        }
    }

    fn request(order_id: &str, transaction_id: &str) -> SettlementRequest {
        SettlementRequest::from_document(doc! {
            "orderId": order_id,
            "transactionId": transaction_id,
        })
        .unwrap()
    }

    #[rocket::async_test]
    async fn settles_every_collection() {
        let fixture = Fixture::new();
        let product_id = ObjectId::new();
        let order_id = ObjectId::new();
        fixture
            .store
            .insert_one(CollectionName::Products, doc! { "_id": product_id, "status": "active" })
            .await
            .unwrap();
        fixture
            .store
            .insert_one(
                CollectionName::AdvertisedItems,
                doc! { "id": product_id.to_hex(), "status": "active" },
            )
            .await
            .unwrap();
        fixture
            .store
            .insert_one(CollectionName::Bookings, doc! { "_id": order_id, "paid": false })
            .await
            .unwrap();

        let report = fixture
            .settlement()
            .settle(&product_id.to_hex(), request(&order_id.to_hex(), "pi_1"))
            .await
            .unwrap();

        assert!(report.is_complete());
        let advert = fixture
            .store
            .find_one(CollectionName::AdvertisedItems, doc! { "id": product_id.to_hex() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(advert.get_str("status").unwrap(), "sold");
        assert_eq!(advert.get_str("transactionId").unwrap(), "pi_1");
    }

    #[rocket::async_test]
    async fn invalid_ids_do_not_block_the_payment_record() {
        let fixture = Fixture::new();

        let report = fixture
            .settlement()
            .settle("not-an-object-id", request("also-bad", "pi_2"))
            .await
            .unwrap();

        assert!(matches!(report.product, Err(StepError::InvalidId(_))));
        assert_eq!(report.advertisement.as_ref().unwrap().matched_count, 0);
        assert!(matches!(report.booking, Err(StepError::InvalidId(_))));
        assert!(!report.is_complete());
        assert_eq!(fixture.store.count(CollectionName::Payments).await, 1);
        let payment = fixture
            .store
            .find_one(CollectionName::Payments, doc! { "_id": report.payment.inserted_id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.get("transactionId"), Some(&Bson::String("pi_2".into())));
    }

    #[rocket::async_test]
    async fn store_failures_in_earlier_steps_still_record_the_payment() {
        let fixture =
            Fixture::with_broken_updates(vec![CollectionName::Products, CollectionName::Bookings]);
        let product_id = ObjectId::new();
        let order_id = ObjectId::new();
        fixture
            .store
            .insert_one(CollectionName::Products, doc! { "_id": product_id, "status": "active" })
            .await
            .unwrap();
        fixture
            .store
            .insert_one(
                CollectionName::AdvertisedItems,
                doc! { "id": product_id.to_hex(), "status": "active" },
            )
            .await
            .unwrap();
        fixture
            .store
            .insert_one(CollectionName::Bookings, doc! { "_id": order_id, "paid": false })
            .await
            .unwrap();

        let report = fixture
            .settlement()
            .settle(&product_id.to_hex(), request(&order_id.to_hex(), "pi_4"))
            .await
            .unwrap();

        assert!(matches!(report.product, Err(StepError::Store(_))));
        assert!(matches!(report.booking, Err(StepError::Store(_))));
        assert_eq!(report.advertisement.as_ref().unwrap().modified_count, 1);
        assert!(!report.is_complete());

        let payment = fixture
            .store
            .find_one(CollectionName::Payments, doc! { "_id": report.payment.inserted_id })
            .await
            .unwrap();
        assert!(payment.is_some());
        let product = fixture
            .store
            .find_one(CollectionName::Products, doc! { "_id": product_id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.get_str("status").unwrap(), "active");
    }

    #[rocket::async_test]
    async fn repeated_submissions_append_duplicate_payments() {
        let fixture = Fixture::new();
        let product_id = ObjectId::new().to_hex();
        let order_id = ObjectId::new().to_hex();

        for _ in 0..2 {
            fixture
                .settlement()
                .settle(&product_id, request(&order_id, "pi_3"))
                .await
                .unwrap();
        }

        let payments = fixture
            .store
            .find(CollectionName::Payments, doc! { "transactionId": "pi_3" })
            .await
            .unwrap();
        assert_eq!(payments.len(), 2);
    }
}
