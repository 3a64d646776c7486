//! Test harness: the full Rocket application over an in-memory store and a
//! recording payment gateway. No database or network access is needed.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::Duration;
use ebuy::jwt::jwt_helper::TokenService;
use ebuy::repository::memory_store::MemoryStore;
use ebuy::repository::store::{CollectionName, DocumentStore, StoreHandle};
use ebuy::services::payment_gateway::{PaymentError, PaymentGateway, PaymentIntent};
use ebuy::{build_rocket, AppContext};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use rocket::config::LogLevel;
use rocket::http::Header;
use rocket::local::asynchronous::Client;

pub const SECRET: &[u8] = b"test-access-token-secret";

#[derive(Default)]
pub struct RecordingGateway {
    pub amounts: Mutex<Vec<i64>>,
}

#[rocket::async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, PaymentError> {
        self.amounts.lock().unwrap().push(amount);
        Ok(PaymentIntent {
            id: "pi_test".to_string(),
            client_secret: format!("pi_test_secret_{amount}"),
        })
    }
}

pub struct TestApp {
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<RecordingGateway>,
    tokens: TokenService,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let gateway = Arc::new(RecordingGateway::default());
        Self::spawn_with_gateway(gateway.clone(), gateway).await
    }

    pub async fn spawn_with_gateway(
        gateway: Arc<dyn PaymentGateway>,
        recording: Arc<RecordingGateway>,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        let handle: StoreHandle = store.clone();
        let context = AppContext {
            store: handle,
            tokens: TokenService::new(SECRET),
            gateway,
        };
        let config = rocket::Config {
            log_level: LogLevel::Off,
            ..rocket::Config::debug_default()
        };
        let client = Client::tracked(build_rocket(config, context))
            .await
            .expect("valid rocket instance");

        TestApp {
            client,
            store,
            gateway: recording,
            tokens: TokenService::new(SECRET),
        }
    }

    pub fn bearer(&self, email: &str) -> Header<'static> {
        let token = self.tokens.create_token(email).expect("token");
        Header::new("Authorization", format!("Bearer {token}"))
    }

    pub fn expired_bearer(&self, email: &str) -> Header<'static> {
        let token = TokenService::with_ttl(SECRET, Duration::hours(-2))
            .create_token(email)
            .expect("token");
        Header::new("Authorization", format!("Bearer {token}"))
    }

    pub async fn seed(&self, collection: CollectionName, document: Document) -> Bson {
        self.store
            .insert_one(collection, document)
            .await
            .expect("seed insert")
            .inserted_id
    }

    pub async fn seed_user(&self, email: &str, role: &str) -> ObjectId {
        let id = ObjectId::new();
        self.seed(
            CollectionName::Users,
            doc! { "_id": id, "email": email, "role": role, "seller_verify": false },
        )
        .await;
        id
    }

    pub async fn find(&self, collection: CollectionName, filter: Document) -> Vec<Document> {
        self.store.find(collection, filter).await.expect("find")
    }

    pub async fn find_one(&self, collection: CollectionName, filter: Document) -> Option<Document> {
        self.store.find_one(collection, filter).await.expect("find_one")
    }
}
