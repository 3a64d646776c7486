use std::sync::Arc;

use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;

use crate::config::settings::{Settings, StoreKind};
use crate::repository::memory_store::MemoryStore;
use crate::repository::mongo_store::MongoStore;
use crate::repository::store::{StoreHandle, StoreResult};

pub async fn setup_mongo(settings: &Settings) -> StoreResult<Client> {
    let mut client_options = ClientOptions::parse(&settings.mongo_uri).await?;
    client_options.app_name = Some("ebuy-server".to_string());

    if let Some(user) = &settings.db_user {
        let mut credential = Credential::default();
        credential.username = Some(user.clone());
        credential.password = settings.db_password.clone();
        client_options.credential = Some(credential);
    }

    Ok(Client::with_options(client_options)?)
}

/// Opens the configured store once; the handle is shared by every repository.
pub async fn open_store(settings: &Settings) -> StoreResult<StoreHandle> {
    match settings.store {
        StoreKind::Memory => {
            tracing::warn!("using the in-memory store, data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Mongo => {
            let client = setup_mongo(settings).await?;
            tracing::info!(db = %settings.db_name, "connected to MongoDB");
            Ok(Arc::new(MongoStore::new(&client, &settings.db_name)))
        }
    }
}
